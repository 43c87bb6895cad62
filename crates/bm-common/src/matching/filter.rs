use serde::Deserialize;

use super::scoring::ScoredCandidate;
use crate::{Profile, TagSet};

/// 一覧画面の絞り込み条件
///
/// 空文字・空集合の条件は「指定なし」として扱う。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// 業界（完全一致・大文字小文字を区別）
    pub industry: Option<String>,
    /// 地域（完全一致・大文字小文字を区別）
    pub location: Option<String>,
    /// いずれか1つでも一致すれば通過
    pub skills: TagSet,
    /// いずれか1つでも一致すれば通過
    pub interests: TagSet,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        active(self.industry.as_deref()).is_none()
            && active(self.location.as_deref()).is_none()
            && self.skills.is_empty()
            && self.interests.is_empty()
    }

    pub fn matches(&self, profile: &Profile) -> bool {
        exact_match(self.industry.as_deref(), profile.industry.as_deref())
            && exact_match(self.location.as_deref(), profile.location.as_deref())
            && any_match(&self.skills, &profile.skills)
            && any_match(&self.interests, &profile.interests)
    }
}

fn active(expected: Option<&str>) -> Option<&str> {
    expected.filter(|value| !value.is_empty())
}

fn exact_match(expected: Option<&str>, actual: Option<&str>) -> bool {
    match active(expected) {
        None => true,
        Some(expected) => actual == Some(expected),
    }
}

fn any_match(wanted: &TagSet, actual: &TagSet) -> bool {
    wanted.is_empty() || actual.intersects(wanted)
}

/// 条件を満たす候補者だけを新しい Vec で返す（入力順を保持）
pub fn filter(candidates: &[ScoredCandidate], criteria: &FilterCriteria) -> Vec<ScoredCandidate> {
    if criteria.is_empty() {
        return candidates.to_vec();
    }
    candidates
        .iter()
        .filter(|candidate| criteria.matches(candidate.profile()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, industry: Option<&str>, skills: &str, interests: &str) -> ScoredCandidate {
        let profile = Profile {
            id: id.into(),
            industry: industry.map(str::to_string),
            skills: TagSet::parse(skills),
            interests: TagSet::parse(interests),
            ..Profile::default()
        };
        ScoredCandidate::new(profile, 50, vec![])
    }

    fn ids(candidates: &[ScoredCandidate]) -> Vec<&str> {
        candidates.iter().map(ScoredCandidate::id).collect()
    }

    #[test]
    fn empty_criteria_keeps_everything() {
        let all = vec![scored("a", None, "", ""), scored("b", Some("金融"), "AI", "")];
        assert_eq!(ids(&filter(&all, &FilterCriteria::default())), ["a", "b"]);

        let blank = FilterCriteria {
            industry: Some(String::new()),
            ..FilterCriteria::default()
        };
        assert!(blank.is_empty());
        assert_eq!(filter(&all, &blank).len(), 2);
    }

    #[test]
    fn industry_is_exact_and_case_sensitive() {
        let all = vec![
            scored("a", Some("Finance"), "", ""),
            scored("b", Some("finance"), "", ""),
            scored("c", None, "", ""),
        ];
        let criteria = FilterCriteria {
            industry: Some("Finance".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(&all, &criteria)), ["a"]);
    }

    #[test]
    fn location_filter_excludes_missing_location() {
        let mut tokyo = scored("a", None, "", "").into_profile();
        tokyo.location = Some("東京".into());
        let all = vec![
            ScoredCandidate::new(tokyo, 70, vec![]),
            scored("b", None, "", ""),
        ];
        let criteria = FilterCriteria {
            location: Some("東京".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(&all, &criteria)), ["a"]);
    }

    #[test]
    fn skills_and_interests_use_any_of_semantics() {
        let all = vec![
            scored("a", None, "AI,IoT", "投資"),
            scored("b", None, "Marketing", "投資"),
            scored("c", None, "IoT", "協業"),
        ];
        let criteria = FilterCriteria {
            skills: TagSet::parse("IoT,クラウド"),
            interests: TagSet::parse("投資,採用"),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(&all, &criteria)), ["a"]);
    }

    #[test]
    fn filter_does_not_touch_input() {
        let all = vec![scored("a", Some("金融"), "", ""), scored("b", None, "", "")];
        let criteria = FilterCriteria {
            industry: Some("金融".into()),
            ..FilterCriteria::default()
        };
        let filtered = filter(&all, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn empty_candidate_list_yields_empty_result() {
        let criteria = FilterCriteria {
            skills: TagSet::parse("AI"),
            ..FilterCriteria::default()
        };
        assert!(filter(&[], &criteria).is_empty());
    }
}

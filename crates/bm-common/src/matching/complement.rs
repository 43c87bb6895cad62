use serde::{Deserialize, Serialize};

use crate::TagSet;

use super::config::RankingConfigError;

/// 経営課題 → それを解決できるスキルの既定対応表
const DEFAULT_COMPLEMENTS: &[(&str, &[&str])] = &[
    ("DX推進", &["AI・機械学習", "IoT", "クラウド", "ビッグデータ"]),
    (
        "新規顧客獲得",
        &["デジタルマーケティング", "SNSマーケティング", "SEO/SEM"],
    ),
    ("人材採用", &["人材開発", "組織開発", "採用"]),
    ("新規事業開発", &["事業開発", "ビジネスモデル構築", "市場開拓"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplementEntry {
    pub challenge: String,
    pub skills: Vec<String>,
}

/// 課題とスキルの補完関係
///
/// 要件側（依頼者）の課題に対して、候補者のスキルが役立つかを判定する。
/// 判定は完全一致のみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplementTable {
    entries: Vec<ComplementEntry>,
}

impl Default for ComplementTable {
    fn default() -> Self {
        Self::from_entries(DEFAULT_COMPLEMENTS.iter().map(|(challenge, skills)| {
            ComplementEntry {
                challenge: (*challenge).to_string(),
                skills: skills.iter().map(|s| (*s).to_string()).collect(),
            }
        }))
    }
}

/// 1つの課題に対して候補者が持つ補完スキル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplementMatch<'a> {
    pub challenge: &'a str,
    pub skills: Vec<&'a str>,
}

impl ComplementTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ComplementEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[ComplementEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, challenge: &str) -> Option<&ComplementEntry> {
        self.entries.iter().find(|entry| entry.challenge == challenge)
    }

    pub fn is_complementary(&self, challenge: &str, skill: &str) -> bool {
        self.lookup(challenge)
            .is_some_and(|entry| entry.skills.iter().any(|s| s == skill))
    }

    /// 課題ごとの補完スキルを列挙する
    ///
    /// 課題は `challenges` の宣言順、スキルは `skills`（候補者側）の宣言順。
    /// 補完スキルが1つもない課題は含めない。
    pub fn complements<'a>(
        &'a self,
        challenges: &'a TagSet,
        skills: &'a TagSet,
    ) -> Vec<ComplementMatch<'a>> {
        challenges
            .iter()
            .filter_map(|challenge| {
                let entry = self.lookup(challenge)?;
                let matched: Vec<&str> = skills
                    .iter()
                    .filter(|skill| entry.skills.iter().any(|s| s == skill))
                    .collect();
                (!matched.is_empty()).then_some(ComplementMatch {
                    challenge,
                    skills: matched,
                })
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), RankingConfigError> {
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.challenge.trim().is_empty() {
                return Err(RankingConfigError::EmptyChallenge);
            }
            if self.entries[..idx]
                .iter()
                .any(|prev| prev.challenge == entry.challenge)
            {
                return Err(RankingConfigError::DuplicateChallenge(
                    entry.challenge.clone(),
                ));
            }
        }
        Ok(())
    }
}

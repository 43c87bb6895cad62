use bm_common::matching::{
    filter, paginate, score, sort, FilterCriteria, ProfileMatchRanker, RankQuery, RankingConfig,
    ScoredCandidate, SortKey,
};
use bm_common::{Profile, TagSet};
use chrono::{TimeZone, Utc};

const SKILL_POOL: &[&str] = &["AI", "Cloud", "IoT", "Rust", "Marketing", "AI・機械学習", "採用"];
const INTEREST_POOL: &[&str] = &["投資", "協業", "海外展開"];
const INDUSTRIES: &[Option<&str>] = &[Some("IT"), Some("金融"), None];

fn score_ok(requester: &Profile, candidate: &Profile, config: &RankingConfig) -> ScoredCandidate {
    score(requester, candidate, config).unwrap()
}

fn requester() -> Profile {
    Profile {
        id: "me".into(),
        skills: TagSet::parse("AI,Cloud,Rust"),
        interests: TagSet::parse("投資,協業"),
        business_challenges: TagSet::parse("DX推進,人材採用"),
        industry: Some("IT".into()),
        ..Profile::default()
    }
}

// Picks skills, interests and industry from the pools by bit pattern so the
// fixture set covers overlapping, disjoint and empty profiles.
fn fixture(seed: usize) -> Profile {
    let skills: Vec<&str> = SKILL_POOL
        .iter()
        .enumerate()
        .filter(|(bit, _)| seed & (1 << bit) != 0)
        .map(|(_, skill)| *skill)
        .collect();
    let interests: Vec<&str> = INTEREST_POOL
        .iter()
        .enumerate()
        .filter(|(bit, _)| (seed / 7) & (1 << bit) != 0)
        .map(|(_, interest)| *interest)
        .collect();
    Profile {
        id: format!("c{seed:03}"),
        skills: skills.into_iter().collect(),
        interests: interests.into_iter().collect(),
        industry: INDUSTRIES[seed % INDUSTRIES.len()].map(str::to_string),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 1 + (seed % 28) as u32, 0, 0, 0)
            .single(),
        last_active_at: (seed % 4 != 0)
            .then(|| Utc.with_ymd_and_hms(2024, 6, 1 + (seed % 5) as u32, 0, 0, 0).single())
            .flatten(),
        ..Profile::default()
    }
}

fn fixtures() -> Vec<Profile> {
    (0..128).map(fixture).collect()
}

fn scored_fixtures() -> Vec<ScoredCandidate> {
    let config = RankingConfig::default();
    let me = requester();
    fixtures().iter().map(|c| score_ok(&me, c, &config)).collect()
}

fn criteria_grid() -> Vec<FilterCriteria> {
    let mut grid = vec![FilterCriteria::default()];
    for industry in [None, Some("IT"), Some("金融"), Some("")] {
        for skills in ["", "AI", "IoT,採用"] {
            for interests in ["", "投資"] {
                grid.push(FilterCriteria {
                    industry: industry.map(str::to_string),
                    skills: TagSet::parse(skills),
                    interests: TagSet::parse(interests),
                    ..FilterCriteria::default()
                });
            }
        }
    }
    grid
}

#[test]
fn scoring_is_deterministic() {
    let config = RankingConfig::default();
    let me = requester();
    for candidate in fixtures() {
        let first = score_ok(&me, &candidate, &config);
        let second = score_ok(&me, &candidate, &config);
        assert_eq!(first.match_score(), second.match_score());
        assert_eq!(first.match_reasons(), second.match_reasons());
    }
}

#[test]
fn score_stays_within_bounds() {
    let generous = RankingConfig {
        base_score: 90.0,
        ..RankingConfig::default()
    };
    let me = requester();
    for candidate in fixtures() {
        assert!(score_ok(&me, &candidate, &RankingConfig::default()).match_score() <= 100);
        assert!(score_ok(&me, &candidate, &generous).match_score() <= 100);
    }
}

#[test]
fn adding_a_shared_skill_never_lowers_the_score() {
    let config = RankingConfig::default();
    let me = requester();
    for candidate in fixtures() {
        let before = score_ok(&me, &candidate, &config).match_score();
        for shared in me.skills.iter() {
            let mut richer = candidate.clone();
            richer.skills = richer.skills.iter().chain([shared]).collect();
            assert!(score_ok(&me, &richer, &config).match_score() >= before);
        }
    }
}

#[test]
fn filter_keeps_exactly_the_satisfying_candidates() {
    let scored = scored_fixtures();
    for criteria in criteria_grid() {
        let kept = filter(&scored, &criteria);
        assert!(kept.iter().all(|c| criteria.matches(c.profile())));
        let expected: Vec<&str> = scored
            .iter()
            .filter(|c| criteria.matches(c.profile()))
            .map(ScoredCandidate::id)
            .collect();
        let kept_ids: Vec<&str> = kept.iter().map(ScoredCandidate::id).collect();
        assert_eq!(kept_ids, expected);
    }
}

#[test]
fn sorting_keeps_equal_keys_in_input_order() {
    let scored = scored_fixtures();
    let position = |id: &str| scored.iter().position(|c| c.id() == id);

    for key in [SortKey::Score, SortKey::Newest, SortKey::Active, SortKey::Name] {
        let sorted = sort(&scored, key);
        assert_eq!(sorted.len(), scored.len());
        for pair in sorted.windows(2) {
            let same_key = match key {
                SortKey::Score => pair[0].match_score() == pair[1].match_score(),
                SortKey::Newest => pair[0].profile().created_at == pair[1].profile().created_at,
                SortKey::Active => {
                    pair[0].profile().last_active_at == pair[1].profile().last_active_at
                }
                SortKey::Name => pair[0].profile().name == pair[1].profile().name,
            };
            if same_key {
                assert!(position(pair[0].id()) < position(pair[1].id()));
            }
        }
    }
}

#[test]
fn pages_cover_the_input_exactly_once() {
    let sorted = sort(&scored_fixtures(), SortKey::Score);
    for page_size in [1, 5, 6, 7, 128, 200] {
        let first = paginate(&sorted, 1, page_size).unwrap();
        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages {
            rebuilt.extend(paginate(&sorted, page, page_size).unwrap().items);
        }
        assert_eq!(rebuilt, sorted);

        let beyond = paginate(&sorted, first.total_pages + 1, page_size).unwrap();
        assert!(beyond.items.is_empty());
    }
}

#[test]
fn one_shared_skill_scores_sixty() {
    let me = Profile {
        id: "me".into(),
        skills: TagSet::parse("AI,Cloud"),
        ..Profile::default()
    };
    let candidate = Profile {
        id: "c".into(),
        skills: TagSet::parse("AI,Marketing"),
        ..Profile::default()
    };

    let scored = score_ok(&me, &candidate, &RankingConfig::default());

    assert_eq!(scored.match_score(), 60);
    assert_eq!(scored.match_reasons().len(), 1);
    assert!(scored.match_reasons()[0].contains("AI"));
    assert!(!scored.match_reasons()[0].contains("Cloud"));
    assert!(!scored.match_reasons()[0].contains("Marketing"));
}

#[test]
fn complement_bonus_is_granted_once() {
    let me = Profile {
        id: "me".into(),
        business_challenges: TagSet::parse("DX推進"),
        ..Profile::default()
    };
    let one = Profile {
        id: "one".into(),
        skills: TagSet::parse("AI・機械学習"),
        ..Profile::default()
    };
    let two = Profile {
        id: "two".into(),
        skills: TagSet::parse("AI・機械学習,IoT"),
        ..Profile::default()
    };

    let config = RankingConfig::default();
    assert_eq!(score_ok(&me, &one, &config).match_score(), 65);
    assert_eq!(score_ok(&me, &two, &config).match_score(), 65);
    assert_eq!(score_ok(&me, &two, &config).match_reasons().len(), 1);
}

#[test]
fn empty_inputs_yield_empty_results() {
    for criteria in criteria_grid() {
        assert!(filter(&[], &criteria).is_empty());
    }
    let page = paginate::<ScoredCandidate>(&[], 1, 10).unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[test]
fn thirteen_candidates_make_three_pages() {
    let scored: Vec<ScoredCandidate> = scored_fixtures().into_iter().take(13).collect();
    let page = paginate(&scored, 3, 6).unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id(), scored[12].id());
}

#[test]
fn tied_scores_keep_input_order() {
    let tied = |id: &str| {
        ScoredCandidate::new(
            Profile {
                id: id.into(),
                ..Profile::default()
            },
            75,
            vec![],
        )
    };
    let sorted = sort(&[tied("B"), tied("A")], SortKey::Score);
    let ids: Vec<&str> = sorted.iter().map(ScoredCandidate::id).collect();
    assert_eq!(ids, ["B", "A"]);
}

#[test]
fn ranker_is_shareable_across_threads() {
    let ranker = ProfileMatchRanker::default();
    let me = requester();
    let candidates = fixtures();
    let expected = ranker.rank(&me, &candidates, &RankQuery::default()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| ranker.rank(&me, &candidates, &RankQuery::default())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}

#[test]
fn scoring_rejects_invalid_config_up_front() {
    let me = requester();
    let candidate = fixture(1);

    let mut negative = RankingConfig::default();
    negative.weights.skill = -10.0;
    assert!(score(&me, &candidate, &negative).is_err());
    assert!(ProfileMatchRanker::new(negative).is_err());

    let nan_base = RankingConfig {
        base_score: f64::NAN,
        ..RankingConfig::default()
    };
    assert!(score(&me, &candidate, &nan_base).is_err());
}

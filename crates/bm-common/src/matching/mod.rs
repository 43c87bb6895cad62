pub mod complement;
pub mod config;
pub mod filter;
pub mod pagination;
pub mod ranker;
pub mod scoring;
pub mod sort;
pub mod weights;

pub use complement::{ComplementEntry, ComplementMatch, ComplementTable};
pub use config::{load_ranking_config_from_env, EnvConfigError, RankingConfig, RankingConfigError};
pub use filter::{filter, FilterCriteria};
pub use pagination::{
    page_window, paginate, Page, PaginationError, DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE,
};
pub use ranker::{ProfileMatchRanker, RankQuery};
pub use scoring::{score, score_all, ScoredCandidate};
pub use sort::{sort, SortKey};
pub use weights::{ScoreWeights, DEFAULT_BASE_SCORE, DEFAULT_WEIGHTS};

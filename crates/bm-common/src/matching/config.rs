use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    complement::ComplementTable,
    weights::{ScoreWeights, DEFAULT_BASE_SCORE},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidWeight { field: &'static str, value: f64 },
    #[error("complement table contains a blank challenge name")]
    EmptyChallenge,
    #[error("complement table lists challenge {0:?} more than once")]
    DuplicateChallenge(String),
}

/// マッチングのスコア設定
///
/// 生成後は読み取り専用。ランカーに値として渡し、グローバルには置かない。
/// 省略されたフィールドは既定値（基本50 / スキル10 / 興味8 / 補完15）で埋まる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub base_score: f64,
    pub weights: ScoreWeights,
    pub complements: ComplementTable,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            base_score: DEFAULT_BASE_SCORE,
            weights: ScoreWeights::default(),
            complements: ComplementTable::default(),
        }
    }
}

impl RankingConfig {
    /// 負の値・NaN・無限大はクランプせずエラーにする
    pub fn validate(&self) -> Result<(), RankingConfigError> {
        let fields = std::iter::once(("base_score", self.base_score)).chain(self.weights.named());
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RankingConfigError::InvalidWeight { field, value });
            }
        }
        self.complements.validate()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvConfigError {
    #[error("{var} must be a number (got {value:?})")]
    Unparsable { var: &'static str, value: String },
    #[error("invalid ranking configuration: {0}")]
    Invalid(#[from] RankingConfigError),
}

const ENV_BASE_SCORE: &str = "BM_BASE_SCORE";
const ENV_SKILL_WEIGHT: &str = "BM_SKILL_WEIGHT";
const ENV_INTEREST_WEIGHT: &str = "BM_INTEREST_WEIGHT";
const ENV_COMPLEMENT_BONUS: &str = "BM_COMPLEMENT_BONUS";
const ENV_INDUSTRY_WEIGHT: &str = "BM_INDUSTRY_WEIGHT";
const ENV_LOCATION_WEIGHT: &str = "BM_LOCATION_WEIGHT";

/// 環境変数からスコア設定を読み込み
///
/// 未設定の項目は既定値。設定されているのに数値として読めない・負の値の場合はエラー。
pub fn load_ranking_config_from_env() -> Result<RankingConfig, EnvConfigError> {
    load_ranking_config_with(|var| std::env::var(var).ok())
}

pub(crate) fn load_ranking_config_with<F>(lookup: F) -> Result<RankingConfig, EnvConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |var: &'static str, default: f64| -> Result<f64, EnvConfigError> {
        match lookup(var) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| EnvConfigError::Unparsable { var, value: raw }),
        }
    };

    let defaults = RankingConfig::default();
    let config = RankingConfig {
        base_score: read(ENV_BASE_SCORE, defaults.base_score)?,
        weights: ScoreWeights {
            skill: read(ENV_SKILL_WEIGHT, defaults.weights.skill)?,
            interest: read(ENV_INTEREST_WEIGHT, defaults.weights.interest)?,
            complement_bonus: read(ENV_COMPLEMENT_BONUS, defaults.weights.complement_bonus)?,
            industry: read(ENV_INDUSTRY_WEIGHT, defaults.weights.industry)?,
            location: read(ENV_LOCATION_WEIGHT, defaults.weights.location)?,
        },
        complements: defaults.complements,
    };
    config.validate()?;

    debug!(
        base_score = config.base_score,
        skill = config.weights.skill,
        interest = config.weights.interest,
        complement_bonus = config.weights.complement_bonus,
        industry = config.weights.industry,
        location = config.weights.location,
        "ranking config loaded from environment"
    );
    Ok(config)
}

use serde::{Deserialize, Serialize};

/// 基本スコア（共通点が何もなくてもこの点数から始まる）
pub const DEFAULT_BASE_SCORE: f64 = 50.0;

/// スコアの上限
pub const MAX_SCORE: f64 = 100.0;

/// 既定の配点
/// - 共通スキル 1件につき +10
/// - 共通の興味 1件につき +8
/// - 経営課題を補完できるスキルがあれば一度だけ +15
/// - 業界・地域の一致は既定では加点しない（0 で無効）
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    skill: 10.0,
    interest: 8.0,
    complement_bonus: 15.0,
    industry: 0.0,
    location: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub skill: f64,
    pub interest: f64,
    pub complement_bonus: f64,
    pub industry: f64,
    pub location: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl ScoreWeights {
    /// 検証・ログ出力用に (項目名, 値) を列挙する
    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("weights.skill", self.skill),
            ("weights.interest", self.interest),
            ("weights.complement_bonus", self.complement_bonus),
            ("weights.industry", self.industry),
            ("weights.location", self.location),
        ]
    }
}

pub mod connections;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use normalize::{RawProfile, TagSet};

// Member profile as consumed by the matching functions.
// Deserialization goes through `RawProfile` so every source shape is normalized once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProfile")]
pub struct Profile {
    pub id: String,
    pub name: Option<String>,
    pub skills: TagSet,
    pub interests: TagSet,
    pub business_challenges: TagSet,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_active_at: Option<DateTime<Utc>>,
}

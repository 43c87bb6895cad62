use std::collections::HashSet;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Profile;

/// 半角・全角カンマのどちらでも区切れるようにする
static RE_TAG_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,，]").unwrap());

/// 正規化済みのタグ集合（スキル / 興味 / 経営課題）
///
/// - 前後の空白を除去し、空要素は捨てる
/// - 重複は最初の出現だけを残す
/// - 宣言順を保持する（理由文の並びはこの順序に従う）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// カンマ区切り文字列から構築（"AI, クラウド,,IoT" → [AI, クラウド, IoT]）
    pub fn parse(text: &str) -> Self {
        RE_TAG_SEPARATOR.split(text).collect()
    }

    /// バックエンドから届いた任意の JSON 値から構築する。
    ///
    /// 文字列はカンマ区切りとして扱い、配列は文字列要素だけを拾う。
    /// それ以外の形（数値・オブジェクト・null）は空集合。
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::parse(text),
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// `other` にも含まれる要素を、self の宣言順のまま返す
    pub fn intersection_in_order<'a>(&'a self, other: &TagSet) -> Vec<&'a str> {
        if other.is_empty() {
            return Vec::new();
        }
        let lookup: HashSet<&str> = other.iter().collect();
        self.iter().filter(|tag| lookup.contains(tag)).collect()
    }

    pub fn intersects(&self, other: &TagSet) -> bool {
        self.iter().any(|tag| other.contains(tag))
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for raw in iter {
            let tag = raw.as_ref().trim();
            if tag.is_empty() || !seen.insert(tag.to_string()) {
                continue;
            }
            tags.push(tag.to_string());
        }
        Self(tags)
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Value> for TagSet {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0
    }
}

/// 空白のみの任意文字列は未設定として扱う
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// profiles テーブルの行そのままの形
///
/// skills / interests / business_challenges は配列で届くこともカンマ区切り文字列で
/// 届くこともあるため、`Value` のまま受けて [`Profile`] への変換時に正規化する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Option<Value>,
    #[serde(default)]
    pub interests: Option<Value>,
    #[serde(default)]
    pub business_challenges: Option<Value>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
    /// last_active_at 列が無い古い行ではこちらを最終アクティブとみなす
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn tags_from(value: Option<&Value>) -> TagSet {
    value.map(TagSet::from_value).unwrap_or_default()
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Profile {
            skills: tags_from(raw.skills.as_ref()),
            interests: tags_from(raw.interests.as_ref()),
            business_challenges: tags_from(raw.business_challenges.as_ref()),
            id: raw.id,
            name: normalize_optional_text(raw.name),
            industry: normalize_optional_text(raw.industry),
            location: normalize_optional_text(raw.location),
            created_at: raw.created_at,
            last_active_at: raw.last_active_at.or(raw.updated_at),
        }
    }
}

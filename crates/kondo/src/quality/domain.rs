use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier wrapper for Kondo listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KondoId(pub u64);

impl fmt::Display for KondoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat attribute snapshot of a Kondo as supplied by the persistence layer.
///
/// Attributes are kept by name so unknown fields pass through untouched; scoring only
/// reads the names listed in the tier tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KondoRecord {
    attributes: Map<String, Value>,
}

impl KondoRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// An attribute is present when it exists, is not null and, for strings, has
    /// non-whitespace content. `false` and `0` count as present.
    pub fn is_present(&self, name: &str) -> bool {
        match self.attribute(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(_) => true,
        }
    }
}

impl From<Map<String, Value>> for KondoRecord {
    fn from(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// Publication readiness of an uploaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    Draft,
    Final,
    #[serde(other)]
    Other,
}

/// Media asset attached to a Kondo. Only `type` and `status` feed scoring.
///
/// Fields of the wrong JSON type read as absent so one malformed record never rejects
/// the rest of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub media_type: Option<MediaType>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<MediaStatus>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub filename: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

impl MediaRecord {
    pub fn new(media_type: MediaType, status: MediaStatus) -> Self {
        Self {
            media_type: Some(media_type),
            status: Some(status),
            filename: None,
        }
    }

    pub fn is_final(&self) -> bool {
        self.status == Some(MediaStatus::Final)
    }
}

/// Raw per-category content accumulations before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBreakdown {
    pub basic_info: f64,
    pub pricing: f64,
    pub conveniences: f64,
    pub details: f64,
}

impl ContentBreakdown {
    pub fn total(&self) -> f64 {
        self.basic_info + self.pricing + self.conveniences + self.details
    }
}

/// Raw per-category media accumulations before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaBreakdown {
    pub images: f64,
    pub quality: f64,
    pub videos: f64,
    pub recency: f64,
}

impl MediaBreakdown {
    pub fn total(&self) -> f64 {
        self.images + self.quality + self.videos + self.recency
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub content: ContentBreakdown,
    pub media: MediaBreakdown,
}

/// Scoring result handed to the listing-update service and publication gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub kondo_id: KondoId,
    pub content_quality: f64,
    pub media_quality: f64,
    pub overall_quality: f64,
    pub meets_threshold: bool,
    pub last_updated: DateTime<Utc>,
    pub breakdown: QualityBreakdown,
}

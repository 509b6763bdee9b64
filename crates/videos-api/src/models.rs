use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::media;

/// Sentinel category meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Placeholder shown when a record carries no duration.
pub const DURATION_PLACEHOLDER: &str = "--:--";

/// Opaque identifier assigned by the data service.
///
/// The service may hand out UUID strings or integer keys; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VideoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// A single catalog entry as returned by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: VideoId,
    pub title: String,
    #[serde(rename = "youtube_id")]
    pub media_id: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_views")]
    pub views: u64,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

impl VideoRecord {
    /// Explicit thumbnail, or the one derived from the media identifier.
    pub fn thumbnail(&self) -> String {
        non_blank(self.thumbnail_url.as_deref())
            .map(str::to_owned)
            .unwrap_or_else(|| media::thumbnail_url(&self.media_id))
    }

    pub fn duration_label(&self) -> &str {
        non_blank(self.duration.as_deref()).unwrap_or(DURATION_PLACEHOLDER)
    }

    pub fn channel(&self) -> Option<&str> {
        non_blank(self.channel_name.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create payload for the collection. Service-assigned fields are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVideo {
    pub title: String,
    #[serde(rename = "youtube_id")]
    pub media_id: String,
    pub channel_name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Category restriction for list requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Tag(String),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Tag(tag) => tag,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Tag(tag) => Some(tag),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Tag(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Tag(value)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn deserialize_views<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Accepts RFC 3339 timestamps and offset-less ISO timestamps (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // timestamptz columns come back as "+00:00" offsets, plain timestamp columns
    // come back without one.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FULL_RECORD: &str = r#"{
        "id": "5b1c2a6e-0000-4000-8000-000000000001",
        "title": "Lo-fi mix",
        "youtube_id": "jfKfPfyJRdk",
        "channel_name": "Lofi Girl",
        "category": "music",
        "views": 1500,
        "duration": "10:30",
        "thumbnail_url": null,
        "created_at": "2024-05-01T12:00:00.123456+00:00",
        "description": "beats to relax to"
    }"#;

    #[test]
    fn decodes_full_record() {
        let record: VideoRecord = serde_json::from_str(FULL_RECORD).unwrap();
        assert_eq!(record.id.as_str(), "5b1c2a6e-0000-4000-8000-000000000001");
        assert_eq!(record.media_id, "jfKfPfyJRdk");
        assert_eq!(record.channel(), Some("Lofi Girl"));
        assert_eq!(record.views, 1500);
        assert_eq!(record.duration_label(), "10:30");
        assert_eq!(
            record.thumbnail(),
            "https://img.youtube.com/vi/jfKfPfyJRdk/hqdefault.jpg"
        );
        assert_eq!(
            record.created_at.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn integer_ids_and_missing_optionals() {
        let json = r#"{
            "id": 42,
            "title": "t",
            "youtube_id": "abc",
            "category": "gaming",
            "views": null,
            "duration": "  ",
            "thumbnail_url": "",
            "created_at": "2024-05-01T12:00:00"
        }"#;
        let record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, VideoId::new("42"));
        assert_eq!(record.views, 0);
        assert_eq!(record.channel(), None);
        assert_eq!(record.duration_label(), DURATION_PLACEHOLDER);
        assert_eq!(record.thumbnail(), "https://img.youtube.com/vi/abc/hqdefault.jpg");
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn explicit_thumbnail_wins() {
        let mut record: VideoRecord = serde_json::from_str(FULL_RECORD).unwrap();
        record.thumbnail_url = Some("https://cdn.example.com/t.jpg".to_string());
        assert_eq!(record.thumbnail(), "https://cdn.example.com/t.jpg");
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{"id": 1, "title": "t", "category": "music", "created_at": "2024-05-01T12:00:00Z"}"#;
        assert!(serde_json::from_str::<VideoRecord>(json).is_err());
    }

    #[test]
    fn negative_views_are_rejected() {
        let json = r#"{"id": 1, "title": "t", "youtube_id": "a", "category": "music",
            "views": -3, "created_at": "2024-05-01T12:00:00Z"}"#;
        assert!(serde_json::from_str::<VideoRecord>(json).is_err());
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let json = r#"{"id": 1, "title": "t", "youtube_id": "a", "category": "music",
            "created_at": "yesterday"}"#;
        assert!(serde_json::from_str::<VideoRecord>(json).is_err());
    }

    #[test]
    fn category_filter_sentinel() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("music"),
            CategoryFilter::Tag("music".to_string())
        );
        assert_eq!(CategoryFilter::All.tag(), None);
        assert_eq!(CategoryFilter::from("All").tag(), Some("All"));
    }

    #[test]
    fn new_video_omits_unset_placeholders() {
        let video = NewVideo {
            title: "t".to_string(),
            media_id: "abc".to_string(),
            channel_name: "c".to_string(),
            category: "music".to_string(),
            description: None,
            thumbnail_url: media::thumbnail_url("abc"),
            views: None,
            duration: None,
        };
        let value = serde_json::to_value(&video).unwrap();
        assert_eq!(value["youtube_id"], "abc");
        assert!(value.get("views").is_none());
        assert!(value.get("duration").is_none());
        assert!(value.get("description").is_none());
    }
}

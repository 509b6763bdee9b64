use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use videos_api::{NewVideo, media};

static DURATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+:)?[0-5]?[0-9]:[0-5][0-9]$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("duration {0:?} is not in MM:SS form")]
    InvalidDuration(String),
    #[error("{0:?} is not a video id or link")]
    InvalidMediaId(String),
}

/// Values the service does not assign on create and the form does not ask for.
///
/// Both are omitted from the create request unless configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitDefaults {
    #[serde(default)]
    pub default_views: Option<u64>,
    #[serde(default)]
    pub default_duration: Option<String>,
}

impl SubmitDefaults {
    /// A configured duration must have the same form as a user-typed one.
    pub fn validate(&self) -> Result<(), DraftError> {
        match &self.default_duration {
            Some(duration) if !DURATION_REGEX.is_match(duration) => {
                Err(DraftError::InvalidDuration(duration.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// What the user typed into the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDraft {
    pub title: String,
    /// Bare id or a link to the video on the platform.
    pub media_id: String,
    pub channel_name: String,
    pub category: String,
    pub description: String,
    pub thumbnail_url: String,
    pub duration: String,
}

impl VideoDraft {
    pub fn into_new_video(self, defaults: &SubmitDefaults) -> Result<NewVideo, DraftError> {
        let title = required("title", &self.title)?;
        let raw_media_id = required("media_id", &self.media_id)?;
        let channel_name = required("channel_name", &self.channel_name)?;
        let category = required("category", &self.category)?;

        let media_id = media::parse_media_id(&raw_media_id)
            .ok_or(DraftError::InvalidMediaId(raw_media_id))?;

        let duration = match optional(&self.duration) {
            Some(duration) if !DURATION_REGEX.is_match(&duration) => {
                return Err(DraftError::InvalidDuration(duration));
            }
            Some(duration) => Some(duration),
            None => defaults.default_duration.clone(),
        };

        let thumbnail_url =
            optional(&self.thumbnail_url).unwrap_or_else(|| media::thumbnail_url(&media_id));

        Ok(NewVideo {
            title,
            media_id,
            channel_name,
            category,
            description: optional(&self.description),
            thumbnail_url,
            views: defaults.default_views,
            duration,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DraftError> {
    optional(value).ok_or(DraftError::MissingField(field))
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Submission form: visibility plus the user's unsent input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub visible: bool,
    pub draft: VideoDraft,
}

impl UploadForm {
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the form and clears its fields.
    pub fn close(&mut self) {
        self.visible = false;
        self.draft = VideoDraft::default();
    }
}

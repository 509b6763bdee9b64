use serde::{Deserialize, Serialize};

use crate::upload::DraftError;

/// Language of every user-visible string the catalog produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    pub fn loading(self) -> &'static str {
        match self {
            Self::Ru => "Загрузка видео...",
            Self::En => "Loading videos...",
        }
    }

    pub fn no_results(self) -> &'static str {
        match self {
            Self::Ru => "Видео не найдены",
            Self::En => "No videos found",
        }
    }

    pub fn load_failed(self) -> &'static str {
        match self {
            Self::Ru => "Ошибка загрузки видео",
            Self::En => "Failed to load videos",
        }
    }

    pub fn search_failed(self) -> &'static str {
        match self {
            Self::Ru => "Ошибка поиска",
            Self::En => "Search failed",
        }
    }

    pub fn submit_succeeded(self) -> &'static str {
        match self {
            Self::Ru => "Видео успешно добавлено!",
            Self::En => "Video added!",
        }
    }

    pub fn submit_failed(self) -> &'static str {
        match self {
            Self::Ru => "Ошибка добавления видео",
            Self::En => "Failed to add video",
        }
    }

    /// Explanation of why a submission draft was rejected.
    pub fn draft_error(self, err: &DraftError) -> String {
        match (err, self) {
            (DraftError::MissingField(field), Self::Ru) => {
                format!("заполните поле «{}»", self.field_name(field))
            }
            (DraftError::MissingField(field), Self::En) => {
                format!("{} is required", self.field_name(field))
            }
            (DraftError::InvalidDuration(value), Self::Ru) => {
                format!("длительность «{value}» должна быть в формате ММ:СС")
            }
            (DraftError::InvalidDuration(value), Self::En) => {
                format!("duration \"{value}\" is not in MM:SS form")
            }
            (DraftError::InvalidMediaId(value), Self::Ru) => {
                format!("«{value}» не похоже на ID или ссылку на видео")
            }
            (DraftError::InvalidMediaId(value), Self::En) => {
                format!("\"{value}\" is not a video id or link")
            }
        }
    }

    fn field_name(self, field: &str) -> &str {
        match (field, self) {
            ("title", Self::Ru) => "название",
            ("title", Self::En) => "title",
            ("media_id", Self::Ru) => "ID видео",
            ("media_id", Self::En) => "video id",
            ("channel_name", Self::Ru) => "канал",
            ("channel_name", Self::En) => "channel",
            ("category", Self::Ru) => "категория",
            ("category", Self::En) => "category",
            (other, _) => other,
        }
    }

    pub(crate) fn thousands_suffix(self) -> &'static str {
        match self {
            Self::Ru => " тыс",
            Self::En => "K",
        }
    }

    pub(crate) fn millions_suffix(self) -> &'static str {
        match self {
            Self::Ru => " млн",
            Self::En => "M",
        }
    }
}

/// Plural category of a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Plural {
    One,
    Few,
    Many,
}

impl Plural {
    pub(crate) fn of(locale: Locale, n: u64) -> Self {
        match locale {
            Locale::Ru => {
                let (tens, units) = (n % 100, n % 10);
                if units == 1 && tens != 11 {
                    Self::One
                } else if (2..=4).contains(&units) && !(12..=14).contains(&tens) {
                    Self::Few
                } else {
                    Self::Many
                }
            }
            Locale::En => {
                if n == 1 {
                    Self::One
                } else {
                    Self::Many
                }
            }
        }
    }

    pub(crate) fn pick<'a>(self, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
        match self {
            Self::One => one,
            Self::Few => few,
            Self::Many => many,
        }
    }
}

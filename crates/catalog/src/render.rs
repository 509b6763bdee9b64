//! Projection of catalog records into the grid fragment.

use chrono::{DateTime, Utc};
use videos_api::{VideoId, VideoRecord};

use crate::format::{format_relative_age, format_views_label};
use crate::locale::Locale;
use crate::player::PlayRequest;

/// Generic 320x180 "NO PREVIEW" graphic, used when a thumbnail fails to load.
pub const PLACEHOLDER_THUMBNAIL: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSIzMjAiIGhlaWdodD0iMTgwIiB2aWV3Qm94PSIwIDAgMzIwIDE4MCI+PHJlY3Qgd2lkdGg9IjMyMCIgaGVpZ2h0PSIxODAiIGZpbGw9IiMyNzI3MjciLz48dGV4dCB4PSIxNjAiIHk9Ijk1IiBmaWxsPSIjNjY2IiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMTQiIHRleHQtYW5jaG9yPSJtaWRkbGUiPk5PIFBSRVZJRVc8L3RleHQ+PC9zdmc+";

/// Avatar letter for records without a channel.
pub const DEFAULT_AVATAR: &str = "C";

/// What the grid area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    Loading(String),
    Error(String),
    Empty(String),
    Cards(Vec<VideoCard>),
}

impl GridView {
    pub fn cards(&self) -> &[VideoCard] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Loading(message) => format!(r#"<div class="loading">{}</div>"#, html_escape(message)),
            Self::Error(message) => format!(r#"<div class="error">{}</div>"#, html_escape(message)),
            Self::Empty(message) => {
                format!(r#"<div class="no-results">{}</div>"#, html_escape(message))
            }
            Self::Cards(cards) => cards
                .iter()
                .map(VideoCard::to_html)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// One tile of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCard {
    pub id: VideoId,
    pub media_id: String,
    pub title: String,
    pub channel_name: String,
    pub avatar: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub views: u64,
    pub views_label: String,
    pub age: String,
}

impl VideoCard {
    pub fn from_record(record: &VideoRecord, now: DateTime<Utc>, locale: Locale) -> Self {
        let channel = record.channel();
        Self {
            id: record.id.clone(),
            media_id: record.media_id.clone(),
            title: record.title.clone(),
            channel_name: channel.unwrap_or_default().to_string(),
            avatar: channel_initial(channel),
            thumbnail_url: record.thumbnail(),
            duration: record.duration_label().to_string(),
            views: record.views,
            views_label: format_views_label(record.views, locale),
            age: format_relative_age(record.created_at, now, locale),
        }
    }

    /// `"1.5 тыс просмотров • вчера"`
    pub fn meta_line(&self) -> String {
        format!("{} • {}", self.views_label, self.age)
    }

    /// Arguments for starting playback when the card is clicked.
    pub fn play_request(&self) -> PlayRequest {
        PlayRequest {
            media_id: self.media_id.clone(),
            title: self.title.clone(),
            channel_name: Some(self.channel_name.clone()).filter(|c| !c.is_empty()),
            views: self.views,
        }
    }

    /// Card markup. The `data-video-id` attribute identifies the card for
    /// [`CatalogViewModel::play_card`](crate::CatalogViewModel::play_card).
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="video-card" data-video-id="{id}" data-media-id="{media_id}" data-title="{title}" data-channel="{channel}" data-views="{views}">
    <div class="thumbnail">
        <img src="{thumbnail}" alt="{title}" onerror="this.onerror=null;this.src='{placeholder}'">
        <div class="duration">{duration}</div>
    </div>
    <div class="video-info">
        <div class="channel-avatar">{avatar}</div>
        <div class="video-details">
            <div class="video-title">{title}</div>
            <div class="channel-name">{channel}</div>
            <div class="video-meta">{meta}</div>
        </div>
    </div>
</div>"#,
            id = html_escape(self.id.as_str()),
            media_id = html_escape(&self.media_id),
            title = html_escape(&self.title),
            channel = html_escape(&self.channel_name),
            views = self.views,
            thumbnail = html_escape(&self.thumbnail_url),
            placeholder = PLACEHOLDER_THUMBNAIL,
            duration = html_escape(&self.duration),
            avatar = html_escape(&self.avatar),
            meta = html_escape(&self.meta_line()),
        )
    }
}

pub(crate) fn channel_initial(channel: Option<&str>) -> String {
    channel
        .and_then(|c| c.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string())
}

/// Cards for `records`, or the "no results" placeholder when there are none.
pub fn render_records(records: &[VideoRecord], now: DateTime<Utc>, locale: Locale) -> GridView {
    if records.is_empty() {
        return GridView::Empty(locale.no_results().to_string());
    }
    GridView::Cards(
        records
            .iter()
            .map(|record| VideoCard::from_record(record, now, locale))
            .collect(),
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn record(id: i64, title: &str, channel: Option<&str>, views: u64, age_days: i64) -> VideoRecord {
        VideoRecord {
            id: VideoId::new(id.to_string()),
            title: title.to_string(),
            media_id: format!("media{id}"),
            channel_name: channel.map(str::to_string),
            category: "music".to_string(),
            views,
            duration: None,
            thumbnail_url: None,
            created_at: now() - Duration::days(age_days),
            description: None,
        }
    }

    #[test]
    fn empty_records_render_no_results() {
        let view = render_records(&[], now(), Locale::Ru);
        assert_eq!(view, GridView::Empty("Видео не найдены".to_string()));
        assert_eq!(view.to_html(), r#"<div class="no-results">Видео не найдены</div>"#);
        assert!(view.cards().is_empty());
    }

    #[test]
    fn one_card_per_record() {
        let records = vec![
            record(1, "First", Some("alpha"), 1_500, 1),
            record(2, "Second", Some("Beta"), 12, 0),
            record(3, "Third", None, 2_500_000, 45),
        ];
        let view = render_records(&records, now(), Locale::Ru);
        let cards = view.cards();
        assert_eq!(cards.len(), 3);

        assert_eq!(cards[0].title, "First");
        assert_eq!(cards[0].channel_name, "alpha");
        assert_eq!(cards[0].avatar, "A");
        assert_eq!(cards[0].meta_line(), "1.5 тыс просмотров • вчера");
        assert_eq!(cards[0].duration, "--:--");
        assert_eq!(
            cards[0].thumbnail_url,
            "https://img.youtube.com/vi/media1/hqdefault.jpg"
        );

        assert_eq!(cards[1].meta_line(), "12 просмотров • сегодня");
        assert_eq!(cards[2].avatar, DEFAULT_AVATAR);
        assert_eq!(cards[2].channel_name, "");
        assert_eq!(cards[2].meta_line(), "2.5 млн просмотров • 1 месяц назад");

        let html = view.to_html();
        assert_eq!(html.matches(r#"class="video-card""#).count(), 3);
        assert!(html.contains(PLACEHOLDER_THUMBNAIL));
    }

    #[test]
    fn card_text_is_escaped() {
        let records = vec![record(
            7,
            r#"<script>alert("x")</script>"#,
            Some("Tom & Jerry's"),
            5,
            3,
        )];
        let html = render_records(&records, now(), Locale::En).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry&#39;s"));
        assert!(html.contains("5 views • 3 days ago"));
        assert!(html.contains(r#"data-video-id="7""#));
    }

    #[test]
    fn play_request_carries_card_fields() {
        let card = VideoCard::from_record(&record(4, "Clip", Some("chan"), 99, 2), now(), Locale::En);
        let request = card.play_request();
        assert_eq!(request.media_id, "media4");
        assert_eq!(request.title, "Clip");
        assert_eq!(request.channel_name.as_deref(), Some("chan"));
        assert_eq!(request.views, 99);

        let anonymous = VideoCard::from_record(&record(5, "Clip", None, 0, 2), now(), Locale::En);
        assert_eq!(anonymous.play_request().channel_name, None);
    }

    #[test]
    fn status_placeholders() {
        assert_eq!(
            GridView::Loading(Locale::En.loading().to_string()).to_html(),
            r#"<div class="loading">Loading videos...</div>"#
        );
        assert_eq!(
            GridView::Error("<oops>".to_string()).to_html(),
            r#"<div class="error">&lt;oops&gt;</div>"#
        );
    }
}

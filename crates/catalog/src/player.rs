use videos_api::media;

use crate::format::format_views_label;
use crate::locale::Locale;
use crate::render::{channel_initial, html_escape};

/// Everything needed to start playback of one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub media_id: String,
    pub title: String,
    pub channel_name: Option<String>,
    pub views: u64,
}

/// Modal hosting the embedded third-party player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerModal {
    pub visible: bool,
    /// Source of the embed frame. Kept after closing so the frame can stay
    /// mounted without playing.
    pub embed_src: Option<String>,
    pub title: String,
    pub channel_name: String,
    pub avatar: String,
    pub views_label: String,
}

impl PlayerModal {
    pub fn open(&mut self, request: &PlayRequest, locale: Locale) {
        let channel = request.channel_name.as_deref().filter(|c| !c.trim().is_empty());
        self.visible = true;
        self.embed_src = Some(media::embed_url(&request.media_id, true));
        self.title = request.title.clone();
        self.channel_name = channel.unwrap_or_default().to_string();
        self.avatar = channel_initial(channel);
        self.views_label = format_views_label(request.views, locale);
    }

    /// Hides the modal and stops playback by dropping the autoplay directive.
    pub fn close(&mut self) {
        self.visible = false;
        if let Some(src) = self.embed_src.as_mut() {
            *src = media::without_autoplay(src.as_str());
        }
    }

    pub fn is_autoplaying(&self) -> bool {
        self.embed_src
            .as_deref()
            .is_some_and(|src| src != media::without_autoplay(src))
    }

    pub fn embed_html(&self) -> Option<String> {
        self.embed_src.as_ref().map(|src| {
            format!(
                r#"<iframe width="100%" height="100%" src="{}" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>"#,
                html_escape(src)
            )
        })
    }
}

//! Catalog page state and the operations that drive it.
//!
//! All operations take `&self`; state sits behind a mutex that is never held
//! across a service call. Every list or search request is tagged with a
//! sequence number and only the most recently issued request may update the
//! records, so a slow response can never overwrite a newer one.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use videos_api::{CategoryFilter, RestVideoService, VideoId, VideoRecord, VideoService};

use crate::clock::{Clock, SystemClock};
use crate::config::{CatalogConfig, CatalogSettings};
use crate::error::Result;
use crate::nav::NavTarget;
use crate::player::{PlayRequest, PlayerModal};
use crate::render::{GridView, render_records};
use crate::upload::{DraftError, UploadForm, VideoDraft};

/// Result of a list or search operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the displayed records.
    Applied { count: usize },
    /// The request failed; the grid shows the error placeholder.
    Failed,
    /// A newer request was issued before this one completed.
    Superseded,
    /// Nothing was requested.
    Skipped,
}

/// Result of submitting the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected(DraftError),
    Failed,
}

/// One-shot user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum GridStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug)]
struct CatalogState {
    records: Vec<VideoRecord>,
    grid: GridStatus,
    active_filter: CategoryFilter,
    active_nav: NavTarget,
    latest_request: u64,
    player: PlayerModal,
    upload: UploadForm,
    notice: Option<Notice>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            grid: GridStatus::Loading,
            active_filter: CategoryFilter::All,
            active_nav: NavTarget::Home,
            latest_request: 0,
            player: PlayerModal::default(),
            upload: UploadForm::default(),
            notice: None,
        }
    }
}

impl CatalogState {
    fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.grid = GridStatus::Loading;
        self.latest_request
    }
}

pub struct CatalogViewModel<S> {
    service: S,
    clock: Arc<dyn Clock>,
    settings: CatalogSettings,
    state: Mutex<CatalogState>,
}

impl CatalogViewModel<RestVideoService> {
    /// Builds a view-model talking to the configured REST collection.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let service = RestVideoService::new(&config.service)?;
        Ok(Self::new(service, config.settings()))
    }
}

impl<S: VideoService> CatalogViewModel<S> {
    pub fn new(service: S, settings: CatalogSettings) -> Self {
        Self::with_clock(service, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(service: S, settings: CatalogSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            service,
            clock,
            settings,
            state: Mutex::new(CatalogState::default()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Initial page load: the unfiltered catalog.
    pub async fn init(&self) -> LoadOutcome {
        self.navigate(NavTarget::Home).await
    }

    /// Marks `target` active and loads its listing.
    pub async fn navigate(&self, target: NavTarget) -> LoadOutcome {
        let filter = target.filter();
        debug!(nav = %target, "navigating");
        self.state.lock().active_nav = target;
        self.load(filter).await
    }

    /// Loads the catalog, newest first, restricted to `category` unless it
    /// is [`CategoryFilter::All`].
    pub async fn load(&self, category: impl Into<CategoryFilter>) -> LoadOutcome {
        let filter = category.into();
        let token = {
            let mut state = self.state.lock();
            state.active_filter = filter.clone();
            state.begin_request()
        };

        debug!(filter = %filter, token, "loading videos");
        let result = self.service.list(&filter).await;
        self.apply(token, result, self.settings.locale.load_failed())
    }

    /// Case-insensitive substring search on titles. Blank queries are ignored.
    pub async fn search(&self, query: &str) -> LoadOutcome {
        let query = query.trim();
        if query.is_empty() {
            return LoadOutcome::Skipped;
        }

        let token = self.state.lock().begin_request();
        debug!(query, token, "searching videos");
        let result = self.service.search(query).await;
        self.apply(token, result, self.settings.locale.search_failed())
    }

    fn apply(
        &self,
        token: u64,
        result: videos_api::Result<Vec<VideoRecord>>,
        failure: &str,
    ) -> LoadOutcome {
        let mut state = self.state.lock();
        if token != state.latest_request {
            debug!(
                token,
                latest = state.latest_request,
                "discarding superseded response"
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                info!(count, "videos loaded");
                state.records = records;
                state.grid = GridStatus::Ready;
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                warn!(error = %e, transport = e.is_transport(), "video request failed");
                state.grid = GridStatus::Failed(failure.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Validates and sends `draft`.
    ///
    /// On success the form is closed and cleared, the category that was
    /// active before submission is reloaded once, and a success notice is
    /// queued. On failure the form keeps its input.
    pub async fn submit(&self, draft: VideoDraft) -> SubmitOutcome {
        let locale = self.settings.locale;
        let reload_filter = {
            let mut state = self.state.lock();
            state.upload.draft = draft.clone();
            state.active_filter.clone()
        };

        let video = match draft.into_new_video(&self.settings.submit) {
            Ok(video) => video,
            Err(err) => {
                debug!(error = %err, "rejecting draft");
                self.state.lock().notice = Some(Notice::Error(format!(
                    "{}: {}",
                    locale.submit_failed(),
                    locale.draft_error(&err)
                )));
                return SubmitOutcome::Rejected(err);
            }
        };

        if let Err(e) = self.service.create(&video).await {
            warn!(error = %e, title = %video.title, "failed to create video");
            self.state.lock().notice = Some(Notice::Error(locale.submit_failed().to_string()));
            return SubmitOutcome::Failed;
        }

        debug!(title = %video.title, "reloading after create");
        self.state.lock().upload.close();
        self.load(reload_filter).await;
        self.state.lock().notice = Some(Notice::Success(locale.submit_succeeded().to_string()));
        SubmitOutcome::Created
    }

    /// Submits whatever the form currently holds.
    pub async fn submit_form(&self) -> SubmitOutcome {
        let draft = self.state.lock().upload.draft.clone();
        self.submit(draft).await
    }

    /// Current grid: a placeholder or one card per record, in service order.
    pub fn render(&self) -> GridView {
        let locale = self.settings.locale;
        let state = self.state.lock();
        match &state.grid {
            GridStatus::Loading => GridView::Loading(locale.loading().to_string()),
            GridStatus::Failed(message) => GridView::Error(message.clone()),
            GridStatus::Ready => render_records(&state.records, self.clock.now(), locale),
        }
    }

    /// Opens the player on `media_id` with autoplay.
    pub fn play_video(&self, media_id: &str, title: &str, channel_name: Option<&str>, views: u64) {
        self.play(&PlayRequest {
            media_id: media_id.to_string(),
            title: title.to_string(),
            channel_name: channel_name.map(str::to_string),
            views,
        });
    }

    /// Opens the player on the displayed record with `id`, as a card click
    /// does. Returns `false` when no such record is displayed.
    pub fn play_card(&self, id: &VideoId) -> bool {
        let locale = self.settings.locale;
        let mut state = self.state.lock();
        let Some(record) = state.records.iter().find(|r| &r.id == id) else {
            debug!(%id, "no displayed record to play");
            return false;
        };
        let request = PlayRequest {
            media_id: record.media_id.clone(),
            title: record.title.clone(),
            channel_name: record.channel().map(str::to_string),
            views: record.views,
        };
        debug!(media_id = %request.media_id, "opening player");
        state.player.open(&request, locale);
        true
    }

    pub fn play(&self, request: &PlayRequest) {
        debug!(media_id = %request.media_id, "opening player");
        self.state.lock().player.open(request, self.settings.locale);
    }

    /// Hides the player and stops playback.
    pub fn close_video(&self) {
        self.state.lock().player.close();
    }

    pub fn show_upload_form(&self) {
        self.state.lock().upload.show();
    }

    /// Hides the form and discards its input.
    pub fn close_upload_form(&self) {
        self.state.lock().upload.close();
    }

    pub fn edit_draft(&self, edit: impl FnOnce(&mut VideoDraft)) {
        edit(&mut self.state.lock().upload.draft);
    }

    /// Removes and returns the pending notice, if any.
    pub fn take_notice(&self) -> Option<Notice> {
        self.state.lock().notice.take()
    }

    pub fn records(&self) -> Vec<VideoRecord> {
        self.state.lock().records.clone()
    }

    pub fn active_filter(&self) -> CategoryFilter {
        self.state.lock().active_filter.clone()
    }

    pub fn active_nav(&self) -> NavTarget {
        self.state.lock().active_nav.clone()
    }

    pub fn player(&self) -> PlayerModal {
        self.state.lock().player.clone()
    }

    pub fn upload_form(&self) -> UploadForm {
        self.state.lock().upload.clone()
    }
}

//! View-model for a video catalog page.
//!
//! [`CatalogViewModel`] owns the page state (the displayed records, the
//! active category, the player and upload modals) and drives it through a
//! [`videos_api::VideoService`]. Rendering produces plain values
//! ([`GridView`], [`VideoCard`], [`PlayerModal`]) that a host can draw or turn
//! into markup with their `to_html` helpers.
//!
//! ```rust,ignore
//! use video_catalog::{CatalogConfig, CatalogViewModel, logging};
//!
//! # async fn run() -> video_catalog::Result<()> {
//! logging::init_logging(None)?;
//! let config = CatalogConfig::load(None)?;
//! let catalog = CatalogViewModel::from_config(&config)?;
//! catalog.init().await;
//! println!("{}", catalog.render().to_html());
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod locale;
pub mod logging;
pub mod nav;
pub mod player;
pub mod render;
pub mod upload;
pub mod view_model;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CatalogConfig, CatalogSettings};
pub use error::{CatalogError, Result};
pub use format::{format_relative_age, format_view_count, format_views_label};
pub use locale::Locale;
pub use nav::NavTarget;
pub use player::{PlayRequest, PlayerModal};
pub use render::{GridView, VideoCard, render_records};
pub use upload::{DraftError, SubmitDefaults, UploadForm, VideoDraft};
pub use view_model::{CatalogViewModel, LoadOutcome, Notice, SubmitOutcome};

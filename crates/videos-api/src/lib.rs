//! Typed access to a hosted REST collection of video records.
//!
//! The collection follows PostgREST conventions: reads are filtered through
//! query parameters (`category=eq.music`, `title=ilike.%cats%`), inserts are
//! JSON bodies, and every request carries the project's static API key.
//!
//! ```rust,ignore
//! use videos_api::{CategoryFilter, RestVideoService, ServiceConfig, VideoService};
//!
//! # async fn run() -> videos_api::Result<()> {
//! let service = RestVideoService::new(&ServiceConfig::from_env()?)?;
//! let newest = service.list(&CategoryFilter::All).await?;
//! let music = service.list(&CategoryFilter::from("music")).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod models;

pub use client::{RestVideoService, VideoService};
pub use config::ServiceConfig;
pub use error::{ApiError, Result};
pub use models::{CategoryFilter, NewVideo, VideoId, VideoRecord};
pub use reqwest::StatusCode;

//! Subscriber setup for hosts embedding the catalog.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CatalogError, Result};

/// Default log filter directive.
pub const DEFAULT_LOG_FILTER: &str = "video_catalog=info,videos_api=info";

/// Installs a global `fmt` subscriber.
///
/// The filter is `directive` when given, otherwise `RUST_LOG`, otherwise
/// [`DEFAULT_LOG_FILTER`]. Fails if a global subscriber is already set.
pub fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| CatalogError::Logging(format!("invalid filter directive: {e}")))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| CatalogError::Logging(e.to_string()))
}

// ── Runtime service configuration ──
//
// Describes *where* the hero collection lives and how the client talks
// to it. Never touches disk: heroes-config (or a test) builds one and
// hands it to `HeroService::new`.

use std::time::Duration;

use url::Url;

use heroes_api::client::DEFAULT_COLLECTION_PATH;

/// Debounce applied to search-box input before a search is issued.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Configuration for talking to one hero collection service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service base URL (e.g., `http://localhost:3000`).
    pub url: Url,
    /// Collection path relative to `url` (defaults to `api/heroes`).
    pub collection_path: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Quiet period before search input turns into a request.
    pub search_debounce: Duration,
}

impl ServiceConfig {
    /// Config for `url` with the default collection path and no timeout.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            collection_path: DEFAULT_COLLECTION_PATH.into(),
            timeout: None,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

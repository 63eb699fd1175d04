//! Pipeline configuration, constructed once and injected.

use std::time::Duration;

/// Messages kept per thread when no override is given.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Enrichment cap: candidates beyond this are not searched.
pub const DEFAULT_MAX_MENU_ITEMS: usize = 10;

/// Settings forwarded on every completion request.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// Configuration for the turn pipeline.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Messages kept per thread.
    pub max_history: usize,
    /// Cap on candidates passed to photo enrichment.
    pub max_menu_items: usize,
    /// Per-call timeout for each image search.
    pub search_timeout: Duration,
    /// Completion request settings.
    pub settings: ChatSettings,
    /// Override the completion endpoint base URL (tests, proxies).
    pub completion_base_url: Option<String>,
    /// Override the image-search endpoint base URL (tests, proxies).
    pub search_base_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            max_menu_items: DEFAULT_MAX_MENU_ITEMS,
            search_timeout: Duration::from_secs(10),
            settings: ChatSettings::default(),
            completion_base_url: None,
            search_base_url: None,
        }
    }
}

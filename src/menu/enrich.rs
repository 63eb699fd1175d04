//! Per-candidate photo enrichment with incremental delivery.

use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::RelayError;
use crate::sink::DeliverySink;
use crate::util::timeout::with_timeout;

use super::search::ImageSearcher;

/// Outcome of one candidate's enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedItem {
    pub name: String,
    pub photo_url: Option<String>,
    pub status: EnrichStatus,
}

/// Per-item enrichment status. Only `Found` carries a deliverable link;
/// everything else is a visible but non-fatal degradation.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichStatus {
    Found,
    NotFound,
    SearchFailed { status: u16 },
    Timeout,
    Error,
    /// No search credential was available; the search was skipped.
    Skipped,
}

/// Enriches candidates one by one, streaming a formatted message per item.
///
/// Searches run sequentially in candidate order, each with its own bounded
/// timeout. One item's failure never aborts the rest, and no item is ever
/// retried.
pub struct PhotoEnricher {
    search_timeout: Duration,
}

impl PhotoEnricher {
    pub fn new(search_timeout: Duration) -> Self {
        Self { search_timeout }
    }

    /// Enrich `candidates` (already capped by the caller) and deliver one
    /// message per item, in candidate order. `searcher` is `None` when no
    /// search credential was supplied; every item is then delivered plain,
    /// with zero external calls.
    pub async fn enrich(
        &self,
        candidates: &[String],
        searcher: Option<&dyn ImageSearcher>,
        sink: &dyn DeliverySink,
        response_id: Uuid,
    ) -> Vec<EnrichedItem> {
        let mut items = Vec::with_capacity(candidates.len());

        for name in candidates {
            let item = match searcher {
                Some(searcher) => self.enrich_one(name, searcher).await,
                None => EnrichedItem {
                    name: name.clone(),
                    photo_url: None,
                    status: EnrichStatus::Skipped,
                },
            };
            sink.stream_chunk(response_id, &format_item(&item)).await;
            items.push(item);
        }

        items
    }

    async fn enrich_one(&self, name: &str, searcher: &dyn ImageSearcher) -> EnrichedItem {
        let query = format!("{name} food photo");
        let result = with_timeout(self.search_timeout, searcher.top_image(&query)).await;

        let (photo_url, status) = match result {
            Ok(Some(hit)) => match hit.best_url() {
                Some(url) => (Some(url.to_string()), EnrichStatus::Found),
                None => (None, EnrichStatus::NotFound),
            },
            Ok(None) => (None, EnrichStatus::NotFound),
            Err(e) if e.is_timeout() => {
                warn!(item = name, "photo search timed out");
                (None, EnrichStatus::Timeout)
            }
            Err(e) => {
                warn!(item = name, error = %e, "photo search failed");
                match e.status() {
                    Some(status) => (None, EnrichStatus::SearchFailed { status }),
                    None => (None, EnrichStatus::Error),
                }
            }
        };

        debug!(item = name, ?status, "enriched candidate");
        EnrichedItem {
            name: name.to_string(),
            photo_url,
            status,
        }
    }
}

/// One streamed line per item.
fn format_item(item: &EnrichedItem) -> String {
    match (&item.status, &item.photo_url) {
        (EnrichStatus::Found, Some(url)) => format!("{}: {}\n", item.name, url),
        (EnrichStatus::Skipped, _) => format!("{}\n", item.name),
        (EnrichStatus::NotFound, _) => format!("{} (no photo found)\n", item.name),
        (EnrichStatus::Timeout, _) => format!("{} (photo search timed out)\n", item.name),
        _ => format!("{} (photo search failed)\n", item.name),
    }
}

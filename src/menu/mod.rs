//! Menu post-processing: candidate extraction and photo enrichment.

pub mod enrich;
pub mod extract;
pub mod search;
pub mod serper;

pub use enrich::{EnrichStatus, EnrichedItem, PhotoEnricher};
pub use extract::extract_candidates;
pub use search::{ImageHit, ImageSearcher};
pub use serper::SerperImages;

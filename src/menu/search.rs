//! Image-search seam.

use async_trait::async_trait;

use crate::error::RelayError;

/// One image-search result candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageHit {
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub link: Option<String>,
}

impl ImageHit {
    /// Best link to deliver: full image, then thumbnail, then source link.
    pub fn best_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .or(self.thumbnail_url.as_deref())
            .or(self.link.as_deref())
    }
}

/// A provider of single top-result image searches.
#[async_trait]
pub trait ImageSearcher: Send + Sync {
    /// Query for the top image result. `Ok(None)` means the search succeeded
    /// but returned nothing.
    async fn top_image(&self, query: &str) -> Result<Option<ImageHit>, RelayError>;
}

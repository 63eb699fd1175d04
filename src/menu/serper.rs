//! Serper image-search client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

use crate::error::RelayError;
use crate::provider::http::shared_client;

use super::search::{ImageHit, ImageSearcher};

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";

pub struct SerperImages {
    api_key: String,
    base_url: String,
}

impl SerperImages {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(val) = HeaderValue::from_str(&self.api_key) {
            headers.insert("X-API-KEY", val);
        }
        headers
    }
}

#[async_trait]
impl ImageSearcher for SerperImages {
    async fn top_image(&self, query: &str) -> Result<Option<ImageHit>, RelayError> {
        let url = format!("{}/images", self.base_url);
        let body = serde_json::json!({ "q": query, "num": 1 });

        debug!(%query, "Serper image search");

        let resp = shared_client()
            .post(&url)
            .headers(self.headers())
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            // keep the status visible: the enricher records it per item
            let body_text = resp.text().await.unwrap_or_default();
            return Err(RelayError::api(status, body_text));
        }

        let data: SerperImagesResponse = resp.json().await?;
        Ok(data.images.into_iter().next().map(|img| ImageHit {
            image_url: img.image_url,
            thumbnail_url: img.thumbnail_url,
            link: img.link,
        }))
    }
}

// Serper API response types (internal)

#[derive(Deserialize)]
struct SerperImagesResponse {
    #[serde(default)]
    images: Vec<SerperImage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerperImage {
    image_url: Option<String>,
    thumbnail_url: Option<String>,
    link: Option<String>,
}

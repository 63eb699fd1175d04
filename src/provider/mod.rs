//! Completion provider seam and implementations.

pub mod http;
pub mod openai;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::ChatSettings;
use crate::error::RelayError;
use crate::types::{ModelMessage, TextStreamDelta};

/// One completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ModelMessage>,
    pub model: String,
    pub settings: ChatSettings,
}

/// A source of streamed chat completions.
///
/// Implementations return a single-pass, ordered, finite stream of deltas
/// which the pipeline reads to exhaustion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn stream_chat(
        &self,
        request: &CompletionRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, RelayError>>, RelayError>;
}

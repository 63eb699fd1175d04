//! Shared test helpers: scripted provider, searcher, and recording sink.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use uuid::Uuid;

use tabletalk::error::RelayError;
use tabletalk::menu::{ImageHit, ImageSearcher};
use tabletalk::provider::{CompletionProvider, CompletionRequest};
use tabletalk::sink::DeliverySink;
use tabletalk::types::{TextStreamDelta, Usage};

/// Provider that replays scripted delta sequences and records requests.
pub struct ScriptedProvider {
    scripts: Mutex<Vec<Vec<Result<TextStreamDelta, RelayError>>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a stream made of plain text deltas, with usage on the last one.
    pub fn queue_text(&self, chunks: &[&str], usage: Option<Usage>) {
        let mut deltas: Vec<Result<TextStreamDelta, RelayError>> = chunks
            .iter()
            .map(|c| Ok(TextStreamDelta::text(*c)))
            .collect();
        if let Some(u) = usage {
            deltas.push(Ok(TextStreamDelta {
                text: String::new(),
                finish_reason: None,
                usage: Some(u),
            }));
        }
        self.scripts.lock().unwrap().push(deltas);
    }

    /// Queue a stream that yields some text and then an error.
    pub fn queue_text_then_error(&self, chunks: &[&str], message: &str) {
        let mut deltas: Vec<Result<TextStreamDelta, RelayError>> = chunks
            .iter()
            .map(|c| Ok(TextStreamDelta::text(*c)))
            .collect();
        deltas.push(Err(RelayError::Stream(message.to_string())));
        self.scripts.lock().unwrap().push(deltas);
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn stream_chat(
        &self,
        request: &CompletionRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, RelayError>>, RelayError> {
        self.requests.lock().unwrap().push(request.clone());
        let script = self.scripts.lock().unwrap().pop().unwrap_or_default();
        Ok(tokio_stream::iter(script).boxed())
    }
}

/// What a scripted searcher does for one query.
pub enum SearchScript {
    Hit(ImageHit),
    Miss,
    Fail(u16),
    /// Sleeps past any sane timeout.
    Hang,
}

/// Searcher that consumes scripts in call order and records queries.
pub struct ScriptedSearcher {
    scripts: Mutex<Vec<SearchScript>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedSearcher {
    /// Scripts are consumed front-to-back, one per call.
    pub fn new(scripts: Vec<SearchScript>) -> Self {
        Self {
            scripts: Mutex::new(scripts),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageSearcher for ScriptedSearcher {
    async fn top_image(&self, query: &str) -> Result<Option<ImageHit>, RelayError> {
        self.queries.lock().unwrap().push(query.to_string());
        let script = {
            let mut scripts = self.scripts.lock().unwrap();
            if scripts.is_empty() {
                SearchScript::Miss
            } else {
                scripts.remove(0)
            }
        };
        match script {
            SearchScript::Hit(hit) => Ok(Some(hit)),
            SearchScript::Miss => Ok(None),
            SearchScript::Fail(status) => Err(RelayError::api(status, "scripted failure")),
            SearchScript::Hang => {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Ok(None)
            }
        }
    }
}

pub fn hit(url: &str) -> ImageHit {
    ImageHit {
        image_url: Some(url.to_string()),
        thumbnail_url: None,
        link: None,
    }
}

/// One delivery-sink call, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Chunk(String),
    Complete { text: String, usage: Option<Usage> },
    Error(String),
}

/// Sink that records every call.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn chunks(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Chunk(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> Vec<(String, Option<Usage>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Complete { text, usage } => Some((text, usage)),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl DeliverySink for RecordingSink {
    async fn stream_chunk(&self, _response_id: Uuid, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Chunk(text.to_string()));
    }

    async fn complete(&self, _response_id: Uuid, full_text: &str, usage: Option<&Usage>) {
        self.events.lock().unwrap().push(SinkEvent::Complete {
            text: full_text.to_string(),
            usage: usage.cloned(),
        });
    }

    async fn report_error(&self, _response_id: Uuid, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Error(message.to_string()));
    }
}

//! Turn orchestration: one inbound message through to the terminal signal.

pub mod consume;
pub mod finalize;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::history::HistoryStore;
use crate::menu::{extract_candidates, EnrichedItem, PhotoEnricher, SerperImages};
use crate::menu::search::ImageSearcher;
use crate::prompt::{self, PromptMode, NOT_A_MENU_SENTINEL};
use crate::provider::openai::OpenAiChat;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::sink::DeliverySink;
use crate::types::{Attachment, IncomingTurn, Role, Usage};

type ProviderFactory = Box<dyn Fn(&str) -> Arc<dyn CompletionProvider> + Send + Sync>;
type SearcherFactory = Box<dyn Fn(&str) -> Arc<dyn ImageSearcher> + Send + Sync>;

/// What kind of cycle a turn turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Chat,
    MenuDeclined,
    Menu,
}

/// Result of one successfully processed turn.
#[derive(Debug)]
pub struct TurnOutcome {
    pub kind: TurnKind,
    /// The text stored in history and sent with the terminal signal.
    pub canonical_text: String,
    pub usage: Option<Usage>,
    pub items: Vec<EnrichedItem>,
}

/// Processes inbound turns. Holds the only shared mutable state (the
/// history store); everything else is per-turn.
///
/// Turns for different threads may run concurrently; the stages within one
/// turn are strictly sequential.
pub struct TurnPipeline {
    history: Arc<HistoryStore>,
    config: RelayConfig,
    provider_factory: ProviderFactory,
    searcher_factory: SearcherFactory,
}

impl TurnPipeline {
    /// Pipeline with the real OpenAI and Serper backends.
    pub fn new(history: Arc<HistoryStore>, config: RelayConfig) -> Self {
        let completion_base = config.completion_base_url.clone();
        let search_base = config.search_base_url.clone();
        Self {
            history,
            config,
            provider_factory: Box::new(move |api_key| {
                Arc::new(OpenAiChat::new(api_key.to_string(), completion_base.clone()))
            }),
            searcher_factory: Box::new(move |api_key| {
                Arc::new(SerperImages::new(api_key.to_string(), search_base.clone()))
            }),
        }
    }

    /// Swap the completion backend (tests, alternative providers).
    pub fn with_provider_factory(mut self, factory: ProviderFactory) -> Self {
        self.provider_factory = factory;
        self
    }

    /// Swap the image-search backend (tests, alternative providers).
    pub fn with_searcher_factory(mut self, factory: SearcherFactory) -> Self {
        self.searcher_factory = factory;
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Task boundary: process one turn, reporting any failure through the
    /// sink exactly once. The user message appended mid-cycle is not rolled
    /// back; partial streamed text is discarded on failure.
    pub async fn run(&self, turn: IncomingTurn, sink: &dyn DeliverySink) {
        match self.process(&turn, sink).await {
            Ok(outcome) => {
                info!(
                    thread_id = %turn.thread_id,
                    response_id = %turn.response_id,
                    kind = ?outcome.kind,
                    "turn completed"
                );
            }
            Err(e) => {
                warn!(
                    thread_id = %turn.thread_id,
                    response_id = %turn.response_id,
                    error = %e,
                    "turn failed"
                );
                sink.report_error(turn.response_id, &format!("Error processing message: {e}"))
                    .await;
            }
        }
    }

    /// The inner flow. Exposed so callers and tests can observe the outcome;
    /// most callers want [`run`](Self::run).
    pub async fn process(
        &self,
        turn: &IncomingTurn,
        sink: &dyn DeliverySink,
    ) -> Result<TurnOutcome> {
        // Credential check happens before any history mutation.
        let api_key = turn.variables.completion_key().ok_or_else(|| {
            RelayError::Configuration("completion API key not found in variables".to_string())
        })?;

        info!(
            thread_id = %turn.thread_id,
            response_id = %turn.response_id,
            model = %turn.model,
            "processing turn"
        );

        let mode = match turn.attachment {
            Attachment::Image { .. } => PromptMode::MenuAnalysis,
            Attachment::None => PromptMode::General,
        };

        // Window is read before the append so the new message appears in the
        // prompt exactly once, as the final user entry.
        let window = self.history.window(&turn.thread_id);
        self.history
            .append(&turn.thread_id, Role::User, turn.message.as_str());

        let messages = prompt::attach_image(
            prompt::build_prompt(
                mode,
                &turn.system_message,
                turn.project_system_message.as_deref(),
                &window,
                &turn.message,
            ),
            &turn.attachment,
        );

        let provider = (self.provider_factory)(api_key);
        let request = CompletionRequest {
            messages,
            model: turn.model.clone(),
            settings: self.config.settings.clone(),
        };
        let stream = provider.stream_chat(&request).await?;

        // Menu cycles suppress raw streaming: a partial item list without
        // photo links would be delivered otherwise.
        let suppress = mode == PromptMode::MenuAnalysis;
        let (full_text, usage) =
            consume::consume_stream(stream, sink, turn.response_id, suppress).await?;

        let outcome = match mode {
            PromptMode::General => TurnOutcome {
                kind: TurnKind::Chat,
                canonical_text: full_text,
                usage,
                items: Vec::new(),
            },
            PromptMode::MenuAnalysis => {
                self.finish_menu_cycle(turn, sink, full_text, usage).await
            }
        };

        self.history.append(
            &turn.thread_id,
            Role::Assistant,
            outcome.canonical_text.as_str(),
        );
        sink.complete(turn.response_id, &outcome.canonical_text, outcome.usage.as_ref())
            .await;

        Ok(outcome)
    }

    async fn finish_menu_cycle(
        &self,
        turn: &IncomingTurn,
        sink: &dyn DeliverySink,
        full_text: String,
        usage: Option<Usage>,
    ) -> TurnOutcome {
        if full_text.trim_start().starts_with(NOT_A_MENU_SENTINEL) {
            // Decline: deliver the suppressed text in one piece, no searches.
            sink.stream_chunk(turn.response_id, &full_text).await;
            return TurnOutcome {
                kind: TurnKind::MenuDeclined,
                canonical_text: full_text,
                usage,
                items: Vec::new(),
            };
        }

        let mut candidates = extract_candidates(&full_text);
        candidates.truncate(self.config.max_menu_items);

        if candidates.is_empty() {
            return TurnOutcome {
                kind: TurnKind::Menu,
                canonical_text: finalize::menu_summary(&candidates),
                usage,
                items: Vec::new(),
            };
        }

        let searcher = match turn.variables.search_key() {
            Some(key) => Some((self.searcher_factory)(key)),
            None => {
                warn!(
                    thread_id = %turn.thread_id,
                    "no search credential, delivering items without photos"
                );
                None
            }
        };

        sink.stream_chunk(turn.response_id, finalize::menu_header(searcher.is_some()))
            .await;

        let enricher = PhotoEnricher::new(self.config.search_timeout);
        let items = enricher
            .enrich(
                &candidates,
                searcher.as_deref(),
                sink,
                turn.response_id,
            )
            .await;

        TurnOutcome {
            kind: TurnKind::Menu,
            canonical_text: finalize::menu_summary(&candidates),
            usage,
            items,
        }
    }
}

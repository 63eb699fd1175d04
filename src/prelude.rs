//! Convenience re-exports for common use.

pub use crate::config::{ChatSettings, RelayConfig};
pub use crate::error::{RelayError, Result};
pub use crate::history::{HistoryStore, StoredMessage};
pub use crate::menu::{EnrichStatus, EnrichedItem, ImageSearcher};
pub use crate::pipeline::{TurnKind, TurnOutcome, TurnPipeline};
pub use crate::provider::CompletionProvider;
pub use crate::sink::DeliverySink;
pub use crate::types::{
    Attachment, ContentPart, IncomingTurn, ModelMessage, Role, TextStreamDelta, Usage, Variables,
};

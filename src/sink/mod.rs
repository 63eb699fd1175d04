//! Delivery sink seam.

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::Usage;

/// Where streamed output and terminal signals go.
///
/// Delivery is fire-and-forget and at-most-once per call: the core does not
/// wait on acknowledgement, and implementations absorb their own transport
/// failures (log, drop). Every call carries the turn's response correlation
/// id.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Deliver one incremental text chunk.
    async fn stream_chunk(&self, response_id: Uuid, text: &str);

    /// Deliver the terminal "complete" signal with the canonical full text.
    async fn complete(&self, response_id: Uuid, full_text: &str, usage: Option<&Usage>);

    /// Report a human-readable error for the turn.
    async fn report_error(&self, response_id: Uuid, message: &str);
}

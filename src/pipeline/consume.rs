//! Completion stream consumption.

use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::debug;
use uuid::Uuid;

use crate::error::RelayError;
use crate::sink::DeliverySink;
use crate::types::{TextStreamDelta, Usage};

/// Drive a completion delta stream to exhaustion.
///
/// Every non-empty delta is appended to the accumulator in arrival order
/// and, unless `suppress` is set, forwarded verbatim to the sink. Usage is
/// captured from whichever delta carries it (absent is a valid terminal
/// state). A stream error propagates immediately; the caller discards the
/// partial accumulator on that path.
pub async fn consume_stream(
    mut stream: BoxStream<'static, Result<TextStreamDelta, RelayError>>,
    sink: &dyn DeliverySink,
    response_id: Uuid,
    suppress: bool,
) -> Result<(String, Option<Usage>), RelayError> {
    let mut full_text = String::new();
    let mut usage = None;

    while let Some(delta) = stream.next().await {
        let delta = delta?;
        if !delta.text.is_empty() {
            full_text.push_str(&delta.text);
            if !suppress {
                sink.stream_chunk(response_id, &delta.text).await;
            }
        }
        if let Some(u) = delta.usage {
            usage = Some(u);
        }
    }

    debug!(chars = full_text.len(), "completion stream drained");
    Ok((full_text, usage))
}

//! Tabletalk — streaming chat-completion relay core.
//!
//! Receives a message plus thread metadata, keeps bounded per-thread
//! conversation memory, streams a completion back through a delivery sink,
//! and — for turns carrying a menu photo — post-processes the output into
//! food items enriched with searched photo links, streamed per item.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tabletalk::prelude::*;
//!
//! # async fn example(turn: IncomingTurn, sink: &dyn DeliverySink) {
//! let history = Arc::new(HistoryStore::new(10));
//! let pipeline = TurnPipeline::new(history, RelayConfig::default());
//! pipeline.run(turn, sink).await;
//! # }
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod menu;
pub mod pipeline;
pub mod prelude;
pub mod prompt;
pub mod provider;
pub mod sink;
pub mod types;
pub mod util;

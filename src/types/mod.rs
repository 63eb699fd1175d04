//! Core types for tabletalk.

pub mod message;
pub mod stream;
pub mod turn;
pub mod usage;

pub use message::*;
pub use stream::*;
pub use turn::*;
pub use usage::*;

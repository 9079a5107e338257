//! Shared identity types and telemetry setup.
//!
//! Everything else in the workspace builds on the channel/message ids
//! defined here; `logging` installs the global tracing subscriber.

pub mod ids;
pub mod logging;

pub use ids::{ChannelId, MessageId, MessageRef};

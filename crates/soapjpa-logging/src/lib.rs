//! soapjpa-logging - Console logging and warning capture
//!
//! This crate provides:
//! - [`SinkLayer`] tracing layer that captures events into a [`LogSink`]
//! - [`LogSink`] global, level-filtered record buffer with an optional callback
//! - [`init_logging`] to install console output and the sink layer

mod layer;
mod sink;

pub use layer::{SinkLayer, init_logging};
pub use sink::{LogCallback, LogRecord, LogSink};
pub use soapjpa_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, LogRecord, LogSink, SinkLayer, init_logging};
}

//! Tracing layer that forwards events into the [`LogSink`]

use crate::sink::LogSink;
use soapjpa_core::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Tracing layer that captures events into a [`LogSink`]
pub struct SinkLayer {
    sink: &'static LogSink,
}

impl SinkLayer {
    /// Create a layer using the global sink
    pub fn new() -> Self {
        Self {
            sink: LogSink::global(),
        }
    }

    /// Create a layer with a specific sink
    pub fn with_sink(sink: &'static LogSink) -> Self {
        Self { sink }
    }

    /// Convert tracing Level to our LogLevel
    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for SinkLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for SinkLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.sink.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let message = visitor.message.unwrap_or_default();
        self.sink.log(level, metadata.target(), &message);
    }
}

/// Visitor to extract the message field from tracing events
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(value.to_string());
        }
    }
}

/// Directive for the console filter when `RUST_LOG` is not set
fn default_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
        LogLevel::Off => "off",
    }
}

/// Initialize logging: console output on stderr filtered by `RUST_LOG` (or
/// `level`), plus the [`SinkLayer`] capturing warnings and errors.
///
/// Call once at startup. Returns `false` when a global subscriber was
/// already installed.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let subscriber = tracing_subscriber::registry()
        .with(console)
        .with(SinkLayer::new());

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;

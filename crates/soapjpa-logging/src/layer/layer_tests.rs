#![allow(non_snake_case)]

use super::*;
use tracing_subscriber::prelude::*;

fn leaked_sink() -> &'static LogSink {
    Box::leak(Box::new(LogSink::new()))
}

fn with_sink_layer(sink: &'static LogSink, body: impl FnOnce()) {
    let subscriber = tracing_subscriber::registry().with(SinkLayer::with_sink(sink));
    tracing::subscriber::with_default(subscriber, body);
}

// SinkLayer tests

#[test]
fn SinkLayer___convert_level___all_levels() {
    assert_eq!(SinkLayer::convert_level(&Level::TRACE), LogLevel::Trace);
    assert_eq!(SinkLayer::convert_level(&Level::DEBUG), LogLevel::Debug);
    assert_eq!(SinkLayer::convert_level(&Level::INFO), LogLevel::Info);
    assert_eq!(SinkLayer::convert_level(&Level::WARN), LogLevel::Warn);
    assert_eq!(SinkLayer::convert_level(&Level::ERROR), LogLevel::Error);
}

#[test]
fn SinkLayer___on_event___captures_warning_message() {
    let sink = leaked_sink();

    with_sink_layer(sink, || {
        tracing::warn!("no entity for COMPLEX_TYPE type x.Unknown");
    });

    let records = sink.drain();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Warn);
    assert_eq!(records[0].message, "no entity for COMPLEX_TYPE type x.Unknown");
}

#[test]
fn SinkLayer___on_event___filters_below_sink_level() {
    let sink = leaked_sink();

    with_sink_layer(sink, || {
        tracing::info!("3 files were generated");
        tracing::debug!("entity context built");
    });

    assert!(sink.drain().is_empty());
}

#[test]
fn SinkLayer___on_event___lowered_level_captures_info() {
    let sink = leaked_sink();
    sink.set_level(LogLevel::Info);

    with_sink_layer(sink, || {
        tracing::info!(entities = 3, "generation plan ready");
    });

    let records = sink.drain();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "generation plan ready");
}

#[test]
fn SinkLayer___on_event___fields_only_uses_first_field() {
    let sink = leaked_sink();

    with_sink_layer(sink, || {
        tracing::error!(path = "out/a/BJPA.java");
    });

    let records = sink.drain();
    assert_eq!(records[0].message, "out/a/BJPA.java");
}

#[test]
fn default_directive___matches_level_names() {
    assert_eq!(default_directive(LogLevel::Debug), "debug");
    assert_eq!(default_directive(LogLevel::Off), "off");
}

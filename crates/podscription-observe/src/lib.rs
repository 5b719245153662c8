//! Observability setup for Podscription.
//!
//! Installs the global `tracing` subscriber: human-readable or JSON log
//! output, `RUST_LOG`-aware filtering, and optional OpenTelemetry span export.

pub mod tracing_setup;

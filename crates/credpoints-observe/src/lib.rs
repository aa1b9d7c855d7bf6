//! Observability setup for credpoints: log filtering, the tracing
//! subscriber, and optional OpenTelemetry span export.

pub mod tracing_setup;

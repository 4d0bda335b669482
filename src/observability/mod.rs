//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → JSON lines
//! ```
//!
//! - **File-Based Export**: `~/.local/share/zellij/userdeck/userdeck-otlp.json`
//! - **Rotation**: at 10 MB, into `.1` .. `.3`
//! - **OTLP/JSON**: one `ExportTraceServiceRequest` per line
//! - **Cross-event traces**: a directory fetch carries its trace context in
//!   the web request context, so request and response share one trace
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and tracer provider
//! - [`span_formatter`]: OTLP/JSON encoding
//! - [`file_writer`]: Rotating line writer

pub mod exporter;
pub mod file_writer;
pub mod init;
pub mod span_formatter;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};

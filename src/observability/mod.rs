//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider
//!                → FileSpanExporter → OTLP/JSON lines → flagfinder-otlp.json
//! ```
//!
//! The trace file lives in the plugin data dir and rotates at 10 MB, keeping
//! three numbered backups. The filter level comes from the `trace_level`
//! plugin option and defaults to `info`.
//!
//! - [`init`]: Subscriber installation
//! - [`exporter`]: Span exporter and tracer provider
//! - [`otlp`]: OTLP/JSON encoding
//! - [`rotation`]: Size-rotated file writer

pub mod exporter;
pub mod init;
pub mod otlp;
pub mod rotation;

pub use init::init_tracing;

//! Span exporter writing OTLP/JSON lines to a rotating file.

use super::otlp;
use super::rotation::RotatingWriter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Exports every finished span batch as one line of the trace file.
#[derive(Debug)]
pub struct FileSpanExporter {
    writer: RotatingWriter,
    resource: Resource,
    is_shutdown: bool,
}

impl FileSpanExporter {
    #[must_use]
    pub const fn new(writer: RotatingWriter, resource: Resource) -> Self {
        Self {
            writer,
            resource,
            is_shutdown: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown {
            return Err(TraceError::from("exporter is shut down"));
        }

        let line = otlp::encode_batch(&self.resource, batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports synchronously to `trace_file`.
///
/// The simple (unbatched) processor is used because the plugin runs without
/// an async runtime.
#[must_use]
pub fn create_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(RotatingWriter::new(trace_file), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

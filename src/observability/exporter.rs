//! File-backed OpenTelemetry span exporter.
//!
//! Zellij plugins run in a WASI sandbox without sockets, so instead of an OTLP
//! network exporter spans are encoded as OTLP/JSON and appended, one batch per
//! line, to a rotating file on the host.

use super::file_writer::RotatingWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

#[derive(Debug)]
pub struct FileSpanExporter {
    writer: RotatingWriter,
    formatter: SpanFormatter,
    is_shutdown: bool,
}

impl FileSpanExporter {
    #[must_use]
    pub fn new(writer: RotatingWriter, formatter: SpanFormatter) -> Self {
        Self {
            writer,
            formatter,
            is_shutdown: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown {
            return Err(TraceError::from("exporter is shut down"));
        }

        let line = serde_json::to_string(&self.formatter.format_batch(batch))
            .map_err(|e| TraceError::from(e.to_string()))?;
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
}

/// Builds a provider that exports every finished span synchronously.
///
/// The simple (non-batching) processor is used because the plugin has no
/// async runtime to drive a batch worker.
#[must_use]
pub fn create_tracer_provider(
    file_path: PathBuf,
    resource: Resource,
    scope: &str,
) -> TracerProvider {
    let exporter = FileSpanExporter::new(
        RotatingWriter::new(file_path),
        SpanFormatter::new(resource.clone(), scope),
    );

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use opentelemetry::KeyValue;

    fn exporter(path: PathBuf) -> FileSpanExporter {
        let resource = Resource::new(vec![KeyValue::new("service.name", "UserDeck")]);
        FileSpanExporter::new(
            RotatingWriter::new(path),
            SpanFormatter::new(resource, "UserDeck"),
        )
    }

    #[test]
    fn writes_one_line_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userdeck-otlp.json");
        let mut exporter = exporter(path.clone());

        exporter.export(vec![]).now_or_never().unwrap().unwrap();
        exporter.export(vec![]).now_or_never().unwrap().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(first["resourceSpans"].is_array());
    }

    #[test]
    fn rejects_exports_after_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = exporter(dir.path().join("userdeck-otlp.json"));

        exporter.shutdown();
        let result = exporter.export(vec![]).now_or_never().unwrap();
        assert!(result.is_err());
    }
}

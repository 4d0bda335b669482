//! OTLP/JSON encoding of finished spans.
//!
//! Each exported batch becomes one `ExportTraceServiceRequest` document, which
//! any OTLP-aware tool (otel-cli, Jaeger's file import, `jq`) can read. The
//! document is built from typed `serde` structs; field names follow the
//! protobuf JSON mapping (camelCase, 64-bit integers as strings).

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: ResourceJson,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct ResourceJson {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<SpanJson>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanJson {
    pub trace_id: String,
    pub span_id: String,
    /// Empty for root spans.
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<EventJson>,
    pub links: Vec<LinkJson>,
    pub status: StatusJson,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventJson {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkJson {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct StatusJson {
    pub code: u8,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AnyValue,
}

/// OTLP `AnyValue`, externally tagged the way the JSON mapping expects.
#[derive(Debug, PartialEq, Serialize)]
pub enum AnyValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "arrayValue")]
    Array { values: Vec<AnyValue> },
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        use opentelemetry::Array;

        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(array) => {
                let values = match array {
                    Array::Bool(items) => items.iter().map(|b| Self::Bool(*b)).collect(),
                    Array::I64(items) => items.iter().map(|i| Self::Int(i.to_string())).collect(),
                    Array::F64(items) => items.iter().map(|f| Self::Double(*f)).collect(),
                    Array::String(items) => {
                        items.iter().map(|s| Self::String(s.to_string())).collect()
                    }
                };
                Self::Array { values }
            }
        }
    }
}

/// Encodes span batches for one service.
pub struct SpanFormatter {
    resource: Resource,
    scope: String,
}

impl SpanFormatter {
    #[must_use]
    pub fn new(resource: Resource, scope: impl Into<String>) -> Self {
        Self {
            resource,
            scope: scope.into(),
        }
    }

    #[must_use]
    pub fn format_batch(&self, batch: &[SpanData]) -> ExportRequest {
        let attributes = self
            .resource
            .iter()
            .map(|(key, value)| Attribute {
                key: key.to_string(),
                value: value.into(),
            })
            .collect();

        ExportRequest {
            resource_spans: vec![ResourceSpans {
                resource: ResourceJson { attributes },
                scope_spans: vec![ScopeSpans {
                    scope: Scope {
                        name: self.scope.clone(),
                    },
                    spans: batch.iter().map(format_span).collect(),
                }],
            }],
        }
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

fn format_span(span: &SpanData) -> SpanJson {
    SpanJson {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id: if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        name: span.name.to_string(),
        kind: kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: attributes(&span.attributes),
        events: span
            .events
            .iter()
            .map(|event| EventJson {
                time_unix_nano: unix_nanos(event.timestamp),
                name: event.name.to_string(),
                attributes: attributes(&event.attributes),
            })
            .collect(),
        links: span
            .links
            .iter()
            .map(|link| LinkJson {
                trace_id: format!("{:032x}", link.span_context.trace_id()),
                span_id: format!("{:016x}", link.span_context.span_id()),
                attributes: attributes(&link.attributes),
            })
            .collect(),
        status: status(&span.status),
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<Attribute> {
    pairs
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: (&kv.value).into(),
        })
        .collect()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> StatusJson {
    match status {
        Status::Unset => StatusJson {
            code: 0,
            message: String::new(),
        },
        Status::Ok => StatusJson {
            code: 1,
            message: String::new(),
        },
        Status::Error { description } => StatusJson {
            code: 2,
            message: description.to_string(),
        },
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn any_value_uses_otlp_json_tags() {
        let json = |value: Value| serde_json::to_value(AnyValue::from(&value)).unwrap();

        assert_eq!(json(Value::Bool(true)), serde_json::json!({"boolValue": true}));
        assert_eq!(json(Value::I64(42)), serde_json::json!({"intValue": "42"}));
        assert_eq!(json(Value::F64(0.5)), serde_json::json!({"doubleValue": 0.5}));
        assert_eq!(
            json(Value::from("users")),
            serde_json::json!({"stringValue": "users"})
        );
        assert_eq!(
            json(Value::Array(vec![1_i64, 2].into())),
            serde_json::json!({"arrayValue": {"values": [{"intValue": "1"}, {"intValue": "2"}]}})
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(status(&Status::Unset).code, 0);
        assert_eq!(status(&Status::Ok).code, 1);
        let error = status(&Status::error("fetch failed"));
        assert_eq!(error.code, 2);
        assert_eq!(error.message, "fetch failed");
    }

    #[test]
    fn empty_batch_still_carries_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "UserDeck")]);
        let formatter = SpanFormatter::new(resource, "UserDeck");
        let json = serde_json::to_value(formatter.format_batch(&[])).unwrap();

        let resource_spans = &json["resourceSpans"][0];
        let attributes = resource_spans["resource"]["attributes"].as_array().unwrap();
        assert!(attributes.contains(&serde_json::json!({
            "key": "service.name",
            "value": {"stringValue": "UserDeck"}
        })));
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "UserDeck");
        assert_eq!(
            resource_spans["scopeSpans"][0]["spans"],
            serde_json::json!([])
        );
    }

    #[test]
    fn timestamps_are_nanosecond_strings() {
        let time = UNIX_EPOCH + Duration::from_millis(1500);
        assert_eq!(unix_nanos(time), "1500000000");
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(1)), "0");
    }
}

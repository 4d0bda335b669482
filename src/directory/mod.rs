//! Remote directory access.
//!
//! - `client`: endpoint, request construction and response decoding
//! - `request`: request envelope with id and trace context propagation

pub mod client;
pub mod request;

pub use client::{DirectoryClient, DirectorySnapshot, DEFAULT_ENDPOINT};
pub use request::{request_id_from_context, FetchRequest, TraceContext};

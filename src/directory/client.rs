//! Remote directory client.
//!
//! The client never touches the network itself: it describes the request the
//! host should issue and decodes whatever the host hands back. That keeps the
//! fetch contract (`all users, or a FetchError`) testable without a runtime.

use super::request::{FetchRequest, TraceContext};
use crate::domain::{FetchError, UserRecord};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Public JSON placeholder directory used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Builds directory requests against a fixed endpoint and decodes responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryClient {
    endpoint: String,
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl DirectoryClient {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Describes a fetch of the whole directory.
    ///
    /// The request is idempotent; retries simply issue another one with a
    /// fresh id.
    #[must_use]
    pub fn request(&self, request_id: u64) -> FetchRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        FetchRequest {
            request_id,
            url: self.endpoint.clone(),
            headers,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Turns a raw HTTP result into the full record list.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Status`] for any non-2xx status
    /// - [`FetchError::Malformed`] if the body is not a JSON array of users
    pub fn decode(status: u16, body: &[u8]) -> Result<Vec<UserRecord>, FetchError> {
        if !(200..300).contains(&status) {
            tracing::debug!(status, body_len = body.len(), "directory fetch failed");
            return Err(FetchError::Status(status));
        }

        let records: Vec<UserRecord> =
            serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        tracing::debug!(record_count = records.len(), "directory decoded");
        Ok(records)
    }
}

/// One successful fetch, stamped with the time it landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub records: Vec<UserRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    #[must_use]
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
        }
    }

    /// Wall-clock time of the fetch, formatted for the header.
    #[must_use]
    pub fn fetched_label(&self) -> String {
        self.fetched_at.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &[u8] = br#"[
        {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
         "address": {"city": "Gwenborough"}, "phone": "1-770-736-8031", "website": "hildegard.org",
         "company": {"name": "Romaguera-Crona"}},
        {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv",
         "address": {"city": "Wisokyburgh"}, "phone": "010-692-6593", "website": "anastasia.net",
         "company": {"name": "Deckow-Crist"}}
    ]"#;

    #[test]
    fn request_targets_configured_endpoint() {
        let client = DirectoryClient::new("https://example.test/people");
        let request = client.request(4);
        assert_eq!(request.url, "https://example.test/people");
        assert_eq!(request.request_id, 4);
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn decodes_successful_response() {
        let records = DirectoryClient::decode(200, FIXTURE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].username, "Antonette");
    }

    #[test]
    fn non_success_status_is_an_error() {
        assert_eq!(
            DirectoryClient::decode(500, FIXTURE),
            Err(FetchError::Status(500))
        );
        assert_eq!(
            DirectoryClient::decode(404, b""),
            Err(FetchError::Status(404))
        );
    }

    #[test]
    fn malformed_body_is_an_error() {
        let result = DirectoryClient::decode(200, br#"{"users": []}"#);
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[test]
    fn default_client_uses_placeholder_endpoint() {
        assert_eq!(DirectoryClient::default().endpoint(), DEFAULT_ENDPOINT);
    }
}

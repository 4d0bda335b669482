//! Error types for the userdeck plugin.
//!
//! This module defines the centralized error type [`UserDeckError`], the
//! fetch-specific [`FetchError`] surfaced to the presentation layer, and the
//! [`ParamError`] produced when an address parameter names an unknown value.
//! All errors are implemented with `thiserror`.

use thiserror::Error;

/// Message shown to the user whenever the directory cannot be loaded.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch users. Please try again.";

/// Message shown when the host refused web access, so no fetch can run.
pub const NETWORK_DENIED_MESSAGE: &str = "Web access was denied. Users cannot be loaded.";

/// The main error type for userdeck operations.
///
/// # Examples
///
/// ```
/// use userdeck::UserDeckError;
///
/// let err = UserDeckError::Theme("invalid colour \"#zz\"".to_string());
/// assert_eq!(err.to_string(), "Theme error: invalid colour \"#zz\"");
/// ```
#[derive(Debug, Error)]
pub enum UserDeckError {
    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single directory fetch.
///
/// The variant carries the diagnostic detail for logs; the presentation layer
/// only ever shows [`FetchError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status code.
    ///
    /// Zellij reports transport failures (DNS, refused connections) as a
    /// failed status as well, so this also covers the network-down case.
    #[error("directory endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body was not a JSON array of user records.
    #[error("directory response could not be decoded: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Returns the user-facing message for this failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// An address parameter named a value outside its recognised set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Sort key other than `name` or `email`.
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Sort direction other than `asc` or `desc`.
    #[error("unknown sort direction: {0}")]
    UnknownSortDirection(String),
}

/// A specialized `Result` type for userdeck operations.
pub type Result<T> = std::result::Result<T, UserDeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_share_one_user_message() {
        assert_eq!(FetchError::Status(503).user_message(), FETCH_FAILED_MESSAGE);
        assert_eq!(
            FetchError::Malformed("eof".into()).user_message(),
            FETCH_FAILED_MESSAGE
        );
    }

    #[test]
    fn io_errors_convert_into_crate_error() {
        let err: UserDeckError = std::io::Error::other("disk full").into();
        assert!(matches!(err, UserDeckError::Io(_)));
        assert_eq!(err.to_string(), "IO error: disk full");
    }
}

//! User record domain model.
//!
//! A [`UserRecord`] is one entry of the remote directory. Only `id`, `name`
//! and `email` carry meaning for the view pipeline; the remaining fields are
//! passed through to the detail popup untouched. The `address` and `company`
//! blocks are kept as opaque JSON so their shape can change upstream without
//! breaking decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the remote directory.
///
/// `name` and `email` are what the search box matches and the table sorts by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Identity, unique within one fetch.
    pub id: u64,
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,

    /// Postal address block, carried verbatim.
    #[serde(default)]
    pub address: Value,
    /// Employer block, carried verbatim.
    #[serde(default)]
    pub company: Value,
}

impl UserRecord {
    /// Creates a record with only the fields the view pipeline inspects.
    ///
    /// Passthrough fields are left empty. Mostly useful for fixtures.
    ///
    /// ```
    /// use userdeck::UserRecord;
    ///
    /// let user = UserRecord::new(1, "Leanne Graham", "sincere@april.biz");
    /// assert_eq!(user.name, "Leanne Graham");
    /// assert!(user.address.is_null());
    /// ```
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            username: String::new(),
            phone: String::new(),
            website: String::new(),
            address: Value::Null,
            company: Value::Null,
        }
    }

    /// Returns `true` if `needle` (already case-folded) occurs in the
    /// case-folded name or email.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

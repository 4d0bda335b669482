//! Domain layer for the userdeck plugin.
//!
//! Core types independent of Zellij APIs: the directory record, the view
//! parameters that drive the table, and the error taxonomy.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`params`]: Search/sort/page parameters
//! - [`user`]: Directory record model

pub mod error;
pub mod params;
pub mod user;

pub use error::{
    FetchError, ParamError, Result, UserDeckError, FETCH_FAILED_MESSAGE, NETWORK_DENIED_MESSAGE,
};
pub use params::{SortDirection, SortKey, ViewParameters};
pub use user::UserRecord;

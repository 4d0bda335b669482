//! Address state codec.
//!
//! The address is the shareable query-string form of the current
//! [`ViewParameters`](crate::domain::ViewParameters). The plugin publishes it
//! as its pane title after every settled change and accepts it back through
//! the `address` configuration key, so a view can be bookmarked in a layout.
//!
//! - [`codec`]: `parse` / `serialize` between parameters and query strings
//! - [`form`]: form-urlencoding of individual components

pub mod codec;
pub mod form;

pub use codec::{parse, serialize};

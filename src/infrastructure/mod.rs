//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij mounts the host filesystem under `/host` inside the plugin sandbox;
//! everything that turns a user-facing path into a sandbox path lives here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};

//! Application layer: the view-state store and its event loop.
//!
//! Sits between the plugin runtime (main.rs) and the domain, address and
//! directory layers.
//!
//! # Architecture
//!
//! ```text
//! User Input / Timer / Fetch Result → Event → handle_event → AppState → Actions
//!      ↑                                                                  │
//!      └──────────── host executes: web_request, set_timeout, rename ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Generation-based quiescence timer
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Input mode state machine types
//! - [`pipeline`]: Pure filter, sort and pagination functions
//! - [`state`]: The store and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod pipeline;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, DEBOUNCE_WINDOW};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use pipeline::{derive_view, DerivedView, PAGE_SIZE};
pub use state::AppState;

//! Side effects requested by the event handler.
//!
//! The handler never talks to Zellij directly. It returns a `Vec<Action>` and
//! the host shim executes them in order, which keeps every state transition
//! testable without a plugin runtime.

use crate::directory::FetchRequest;
use std::time::Duration;

/// Commands executed by the plugin runtime after an event has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly asks to leave (e.g. pressing 'q').
    CloseFocus,

    /// Issues the directory fetch described by the request.
    ///
    /// The request id travels in the web request context and comes back with
    /// the response so superseded fetches can be discarded.
    FetchDirectory(FetchRequest),

    /// Starts a host timer that reports `generation` back when it expires.
    ArmDebounce {
        /// Generation handed out by the store's debouncer.
        generation: u64,
        /// Length of the quiescence window.
        after: Duration,
    },

    /// Writes the serialized view parameters to the navigable address.
    ///
    /// In Zellij the address is the plugin pane title.
    PublishAddress {
        /// Query string without the leading `?`.
        query: String,
    },
}

//! Input mode state machine.
//!
//! The mode decides which keybindings the host shim maps to which events and
//! which footer hints are shown.
//!
//! - **Normal**: cursor, paging, sorting, retry
//! - **Search**: editing the query, or browsing results with the query kept
//! - **Detail**: the detail popup for one record is open

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the search query.
    ///
    /// Accepts characters and backspace; enter switches to `Navigating`.
    Typing,

    /// The query is kept and normal navigation keys are active again.
    ///
    /// `/` returns to `Typing`, escape clears the query.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and command mode.
    #[default]
    Normal,

    /// Search mode with focus state.
    Search(SearchFocus),

    /// Detail popup for the selected record.
    Detail,
}

impl InputMode {
    /// Whether plain characters should go to the search query.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_typing_focus_captures_characters() {
        assert!(InputMode::Search(SearchFocus::Typing).is_typing());
        assert!(!InputMode::Search(SearchFocus::Navigating).is_typing());
        assert!(!InputMode::Normal.is_typing());
        assert!(!InputMode::Detail.is_typing());
    }
}

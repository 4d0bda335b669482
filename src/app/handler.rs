//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one entry point through which the host shim feeds
//! user input, timer expiries and fetch results into the store. It mutates
//! [`AppState`] and returns whether a redraw is needed together with the
//! side effects to execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `CloseFocus`
//! - **Search**: `SearchMode`, `Char`, `Backspace`, `FocusSearchBar`,
//!   `FocusResults`, `ExitSearch`
//! - **View parameters**: `SortBy`, `NextPage`, `PrevPage`, `GoToPage`
//! - **Rows and detail**: `KeyDown`, `KeyUp`, `OpenDetail`, `CloseDetail`
//! - **Directory**: `Retry`, `NetworkDenied`, `DirectoryFetched`
//! - **Timer**: `DebounceElapsed`
//!
//! # Example
//!
//! ```rust
//! use userdeck::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (redraw, actions) = handle_event(&mut state, &Event::Mount { address: String::new() })?;
//! assert!(redraw);
//! assert!(matches!(actions[0], Action::FetchDirectory(_)));
//! # Ok::<(), userdeck::UserDeckError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{FetchError, SortKey, UserRecord};

/// Events triggered by user input, timers or fetch completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Plugin is ready; adopt `address` and start the first fetch.
    Mount {
        /// Initial address query string, possibly empty.
        address: String,
    },
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus, keeping the current query.
    SearchMode,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Returns focus from the results to the search input.
    FocusSearchBar,
    /// Leaves the search input, keeping the query.
    FocusResults,
    /// Clears the query and returns to normal mode.
    ExitSearch,

    /// Sorts by a column, toggling direction on the active one.
    SortBy(SortKey),
    NextPage,
    PrevPage,
    /// Jumps to a page offered by the pagination control.
    GoToPage(u32),

    /// Moves the row cursor down (wraps to top).
    KeyDown,
    /// Moves the row cursor up (wraps to bottom).
    KeyUp,
    /// Opens the detail popup for the row under the cursor.
    OpenDetail,
    CloseDetail,

    /// Fetches the directory again, keeping the view parameters.
    Retry,
    /// The host refused the web access permission.
    NetworkDenied,

    /// A directory response arrived.
    DirectoryFetched {
        /// Id of the request this answers.
        request_id: u64,
        outcome: std::result::Result<Vec<UserRecord>, FetchError>,
    },

    /// A host timer armed by [`Action::ArmDebounce`] expired.
    DebounceElapsed {
        generation: u64,
    },
}

fn arm(state: &AppState, generation: u64) -> Action {
    Action::ArmDebounce {
        generation,
        after: state.debouncer.window(),
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// No event currently fails; the signature leaves room for handlers that
/// touch the filesystem.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount { address } => {
            let request = state.mount(address);
            Ok((true, vec![Action::FetchDirectory(request)]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            let mut query = state.params.search_query.clone();
            query.push(*c);
            let generation = state.set_search(query);
            Ok((true, vec![arm(state, generation)]))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            let mut query = state.params.search_query.clone();
            if query.pop().is_none() {
                return Ok((false, vec![]));
            }
            let generation = state.set_search(query);
            Ok((true, vec![arm(state, generation)]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = if state.params.search_query.is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.params.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            if state.params.search_query.is_empty() {
                return Ok((true, vec![]));
            }
            let generation = state.set_search(String::new());
            Ok((true, vec![arm(state, generation)]))
        }

        Event::SortBy(key) => {
            let generation = state.set_sort(*key);
            Ok((true, vec![arm(state, generation)]))
        }
        Event::NextPage => Ok(state
            .next_page()
            .map_or((false, vec![]), |generation| (true, vec![arm(state, generation)]))),
        Event::PrevPage => Ok(state
            .prev_page()
            .map_or((false, vec![]), |generation| (true, vec![arm(state, generation)]))),
        Event::GoToPage(page) => {
            if *page == 0 || *page > state.total_pages() || *page == state.params.page {
                return Ok((false, vec![]));
            }
            let generation = state.set_page(*page);
            Ok((true, vec![arm(state, generation)]))
        }

        Event::KeyDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::OpenDetail => Ok((state.open_detail(), vec![])),
        Event::CloseDetail => {
            state.close_detail();
            Ok((true, vec![]))
        }

        Event::Retry => Ok(state
            .retry()
            .map_or((false, vec![]), |request| {
                (true, vec![Action::FetchDirectory(request)])
            })),
        Event::NetworkDenied => {
            state.deny_network();
            Ok((true, vec![]))
        }
        Event::DirectoryFetched {
            request_id,
            outcome,
        } => {
            if !state.apply_fetch(*request_id, outcome.clone()) {
                return Ok((false, vec![]));
            }
            let generation = state.debouncer.arm();
            Ok((true, vec![arm(state, generation)]))
        }

        Event::DebounceElapsed { generation } => Ok(state
            .on_debounce(*generation)
            .map_or((false, vec![]), |query| {
                (true, vec![Action::PublishAddress { query }])
            })),
    }
}

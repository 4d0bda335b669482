//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; every decision
//! about what is visible has already been made by the store.
//!
//! # Example
//!
//! ```rust
//! use userdeck::ui::viewmodel::{FooterInfo, PaginationInfo};
//!
//! let pagination = PaginationInfo {
//!     label: "Page 1 of 2 · 7 users".to_string(),
//!     has_prev: false,
//!     has_next: true,
//! };
//! let footer = FooterInfo {
//!     keybindings: "q: quit".to_string(),
//!     address: "userdeck?sortKey=name&sortDirection=asc&page=1".to_string(),
//! };
//! assert!(pagination.has_next);
//! assert!(footer.address.ends_with("page=1"));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar with result count and fetch time.
    pub header: HeaderInfo,

    /// Search input, shown while searching or whenever a query is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Column headers and the rows of the current page.
    pub table: TableInfo,

    /// Replaces the table body while loading, after a failure, or when
    /// nothing matches.
    pub status: Option<StatusPanel>,

    /// Page position line under the table.
    pub pagination: PaginationInfo,

    /// Detail popup for the selected record.
    pub detail: Option<DetailInfo>,

    /// Keybinding hints and the current address.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Secondary line, e.g. "7 of 10 users · fetched 12:04:51".
    pub summary: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub focused: bool,
}

/// Table header cells and body rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<DisplayRow>,
}

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub label: String,

    /// `▲` or `▼` on the active sort column.
    pub marker: Option<char>,
}

/// Display information for one record row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: String,
    pub name: String,
    pub email: String,

    /// Whether the row cursor is on this row.
    pub is_selected: bool,

    /// Character ranges of `name` matching the search query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub name_highlights: Vec<(usize, usize)>,

    /// Character ranges of `email` matching the search query.
    pub email_highlights: Vec<(usize, usize)>,
}

/// Kind of status shown in place of the table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    Empty,
}

/// Message shown in place of the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPanel {
    pub kind: StatusKind,

    /// Primary message (e.g. "No users match \"zed\"").
    pub message: String,

    /// Secondary explanatory text (e.g. "Press r to retry").
    pub hint: String,
}

/// Pagination line information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// "Page x of y · n users".
    pub label: String,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Detail popup content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,

    /// `(label, value)` pairs in display order.
    pub lines: Vec<(String, String)>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,

    /// The published address, as shown in the pane title.
    pub address: String,
}

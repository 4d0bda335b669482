//! Composable UI component renderers.
//!
//! Each component draws one part of the interface at an explicit row and
//! returns the next free row, so the layout below is a plain sequence of
//! calls.
//!
//! # Components
//!
//! - [`header`]: Title bar and result summary
//! - [`search`]: Search input box
//! - [`table`]: ID / NAME / EMAIL rows with sort marker and match highlight
//! - [`status`]: Loading, error and empty messages in place of rows
//! - [`pagination`]: Page position line
//! - [`footer`]: Keybinding hints and current address
//! - [`detail`]: Popup drawn over everything else
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header + summary]
//! [Border]
//! [Search Bar - 3 lines, optional]
//! [Table Headers]
//! [Rows | Status]
//! [Pagination]
//! [Blank padding]
//! [Border]
//! [Footer - 2 lines]
//! ```

mod detail;
mod footer;
mod header;
mod pagination;
mod search;
mod status;
mod table;

use crate::app::PAGE_SIZE;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::{Rgb, Theme};
use crate::ui::viewmodel::UIViewModel;

use detail::render_detail;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Width of the ID column.
pub const ID_COLUMN_WIDTH: usize = 5;
/// Width of the NAME column; EMAIL takes the rest of the line.
pub const NAME_COLUMN_WIDTH: usize = 28;

/// Renders a horizontal border line at `row`. Returns `row + 1`.
fn render_border(row: usize, color: Rgb, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", color.fg());
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for one view model.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, &vm.table.columns, theme);

    let body_start = current_row;
    if let Some(status) = &vm.status {
        render_status(body_start + 1, status, theme, cols);
    } else {
        render_table_rows(body_start, &vm.table.rows, theme, cols);
    }
    render_pagination(body_start + PAGE_SIZE + 1, &vm.pagination, theme, cols);

    let footer_start = rows.saturating_sub(2);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(detail) = &vm.detail {
        render_detail(detail, theme, rows, cols);
    }
}

//! Table component renderer.
//!
//! Three columns (ID, NAME, EMAIL). The active sort column carries a ▲/▼
//! marker; search matches inside names and emails are highlighted.

use super::{ID_COLUMN_WIDTH, NAME_COLUMN_WIDTH};
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, DisplayRow};

/// Renders the column headers at `row`. Returns `row + 1`.
pub fn render_table_headers(row: usize, columns: &[ColumnHeader], theme: &Theme) -> usize {
    let widths = [ID_COLUMN_WIDTH, NAME_COLUMN_WIDTH];

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    for (index, column) in columns.iter().enumerate() {
        print!("{}", theme.colors.header_fg.fg());
        print!("{}", column.label);
        let mut used = column.label.chars().count();
        if let Some(marker) = column.marker {
            print!(" {}{marker}", theme.colors.sort_marker_fg.fg());
            used += 2;
        }
        if let Some(width) = widths.get(index) {
            print!("{}", " ".repeat(width.saturating_sub(used)));
        }
    }
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`. Returns the row after the last one.
pub fn render_table_rows(row: usize, rows: &[DisplayRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in rows {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one record row.
///
/// Selection colours fill the whole line; match highlights are drawn on top
/// and the row colours restored after each one.
fn render_table_row(row: usize, item: &DisplayRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let (fg, bg) = if item.is_selected {
        (theme.colors.selection_fg, Some(theme.colors.selection_bg))
    } else {
        (theme.colors.text_normal, None)
    };
    print!("{}", fg.fg());
    if let Some(bg) = bg {
        print!("{}", bg.bg());
    }

    print!("{:<width$}", item.id, width = ID_COLUMN_WIDTH);

    helpers::render_highlighted_text(&item.name, &item.name_highlights, theme, fg, bg);
    let name_len = item.name.chars().count();
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(name_len)));

    helpers::render_highlighted_text(&item.email, &item.email_highlights, theme, fg, bg);

    let line_len = ID_COLUMN_WIDTH + NAME_COLUMN_WIDTH + item.email.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

//! Header component renderer.
//!
//! Renders the title bar: the plugin name centred in bold, and the result
//! summary dimmed on the line below.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the two-line header starting at `row`.
///
/// Returns the next available row (`row + 2`).
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", theme.colors.header_fg.fg());
    if let Some(bg) = theme.colors.header_bg {
        print!("{}", bg.bg());
    }
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let summary_len = header.summary.chars().count().min(cols);
    let summary_padding = (cols.saturating_sub(summary_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", theme.colors.text_dim.fg());
    print!("{}", " ".repeat(summary_padding));
    print!("{}", header.summary.chars().take(cols).collect::<String>());
    print!("{}", Theme::reset());

    row + 2
}

//! Footer component renderer.
//!
//! Two dimmed lines: keybinding hints, then the current address exactly as
//! published to the pane title.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at `row` and `row + 1`.
///
/// Both lines are truncated to the terminal width. Returns `row + 2`.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", theme.colors.text_dim.fg());
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());

    let address = truncate(&footer.address, cols.saturating_sub(1));
    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", theme.colors.text_dim.fg());
    print!(" {address}");
    print!("{}", Theme::reset());

    row + 2
}

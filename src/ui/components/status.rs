//! Status panel renderer.
//!
//! Shown in place of the table body while loading, after a failed fetch and
//! when the current parameters leave nothing to show.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusPanel};

/// Renders the centred two-line status message at `row` and `row + 1`.
///
/// Errors use `error_fg`; everything else uses `status_fg`. The hint line is
/// always dimmed.
pub fn render_status(row: usize, status: &StatusPanel, theme: &Theme, cols: usize) -> usize {
    let color = match status.kind {
        StatusKind::Error => theme.colors.error_fg,
        StatusKind::Loading | StatusKind::Empty => theme.colors.status_fg,
    };

    let msg_len = status.message.chars().count();
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(row, 1);
    print!("{}", color.fg());
    if status.kind == StatusKind::Error {
        print!("{}", Theme::bold());
    }
    print!("{}", " ".repeat(msg_padding));
    print!("{}", status.message);
    print!("{}", Theme::reset());

    let hint_len = status.hint.chars().count();
    let hint_padding = (cols.saturating_sub(hint_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", theme.colors.text_dim.fg());
    print!("{}", " ".repeat(hint_padding));
    print!("{}", status.hint);
    print!("{}", Theme::reset());

    row + 2
}

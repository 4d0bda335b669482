//! Detail popup renderer.
//!
//! Draws a bordered box over the middle of the pane listing every field of
//! the selected record as `label  value` lines. Lines that do not fit the
//! pane height are dropped from the bottom.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const POPUP_MARGIN: usize = 4;
const LABEL_WIDTH: usize = 22;

pub fn render_detail(detail: &DetailInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(POPUP_MARGIN * 2).max(20);
    let inner = width.saturating_sub(2);
    let max_lines = rows.saturating_sub(6);
    let lines = &detail.lines[..detail.lines.len().min(max_lines)];
    let top = 3;
    let left = POPUP_MARGIN + 1;
    let border = theme.colors.popup_border;

    let title = truncate(&detail.title, inner);
    let title_len = title.chars().count();
    position_cursor(top, left);
    print!("{}┌{}", border.fg(), Theme::bold());
    print!("{title}{}", Theme::reset());
    print!("{}{}┐", border.fg(), "─".repeat(inner.saturating_sub(title_len)));

    for (offset, (label, value)) in lines.iter().enumerate() {
        let label = truncate(label, LABEL_WIDTH - 1);
        let value = truncate(value, inner.saturating_sub(LABEL_WIDTH + 1));
        let used = 1 + LABEL_WIDTH + value.chars().count();

        position_cursor(top + 1 + offset, left);
        print!("{}│{}", border.fg(), Theme::reset());
        print!("{} {label:<width$}", theme.colors.text_dim.fg(), width = LABEL_WIDTH);
        print!("{}{value}", theme.colors.text_normal.fg());
        print!("{}", " ".repeat(inner.saturating_sub(used)));
        print!("{}│{}", border.fg(), Theme::reset());
    }

    position_cursor(top + 1 + lines.len(), left);
    print!("{}└{}┘{}", border.fg(), "─".repeat(inner), Theme::reset());
}

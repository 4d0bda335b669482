//! Pagination line renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders `‹ Page x of y · n users ›` centred at `row`, dimming arrows that
/// lead nowhere. Returns `row + 1`.
pub fn render_pagination(
    row: usize,
    pagination: &PaginationInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let arrow = |enabled: bool| {
        if enabled {
            theme.colors.text_normal.fg()
        } else {
            theme.colors.border.fg()
        }
    };

    let text_len = pagination.label.chars().count() + 4;
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}‹ ", arrow(pagination.has_prev));
    print!("{}{}", theme.colors.text_dim.fg(), pagination.label);
    print!("{} ›", arrow(pagination.has_next));
    print!("{}", Theme::reset());
    row + 1
}

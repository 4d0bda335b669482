//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used across components and by view model computation:
//! cursor positioning, match highlighting, width-aware truncation and the
//! generic flattening of passthrough JSON payloads for the detail popup.
//!
//! All indices handled here are character indices, not byte indices.

use crate::ui::theme::{Rgb, Theme};
use serde_json::Value;

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges.
///
/// Highlighted sections use the match colours; afterwards `base_fg` (and
/// `base_bg`, if any) are restored so the rest of the row keeps its styling.
/// Ranges reaching past the end of `text` are clipped.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base_fg: Rgb,
    base_bg: Option<Rgb>,
) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", theme.colors.match_highlight_fg.fg());
        print!("{}", theme.colors.match_highlight_bg.bg());
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        print!("{}", base_fg.fg());
        if let Some(bg) = base_bg {
            print!("{}", bg.bg());
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Finds the non-overlapping, case-insensitive occurrences of `needle` in
/// `text`, as `(start, end)` character ranges.
///
/// An empty needle matches nothing.
#[must_use]
pub fn substring_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return vec![];
    }

    let folded: Vec<String> = text.chars().map(|c| c.to_lowercase().collect()).collect();
    let mut ranges = Vec::new();
    let mut start = 0;

    while start < folded.len() {
        let mut candidate = String::new();
        let mut end = start;
        while end < folded.len() && candidate.len() < needle.len() {
            candidate.push_str(&folded[end]);
            end += 1;
        }

        if candidate == needle {
            ranges.push((start, end));
            start = end;
        } else {
            start += 1;
        }
    }

    ranges
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }

    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Flattens an arbitrary JSON payload into `(dotted.path, value)` lines.
///
/// Objects contribute their keys in sorted order, arrays their indices.
/// Strings are shown without quotes and `null` leaves are skipped.
pub fn flatten_json(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten_json(&join_path(prefix, key), nested, out);
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                flatten_json(&join_path(prefix, &index.to_string()), nested, out);
            }
        }
        Value::Null => {}
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

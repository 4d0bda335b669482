//! Theme management and ANSI escape sequence generation.
//!
//! Colour schemes are TOML files. Two Catppuccin flavours are compiled in and
//! any other scheme can be loaded from disk through the `theme_file` setting.
//! Colours are parsed into [`Rgb`] once, at load time, so a malformed hex value
//! is a load error rather than a silently white cell.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#181825"          # optional
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! sort_marker_fg = "#89b4fa"
//! status_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! popup_border = "#cba6f7"
//! ```

use crate::domain::{Result, UserDeckError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Name of the theme used when nothing else is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// A 24-bit colour, written as `#rrggbb` in theme files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// ANSI 24-bit foreground escape sequence.
    #[must_use]
    pub fn fg(self) -> String {
        format!("\u{001b}[38;2;{};{};{}m", self.0, self.1, self.2)
    }

    /// ANSI 24-bit background escape sequence.
    #[must_use]
    pub fn bg(self) -> String {
        format!("\u{001b}[48;2;{};{};{}m", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = UserDeckError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(UserDeckError::Theme(format!("invalid colour {s:?}")));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| UserDeckError::Theme(format!("invalid colour {s:?}")))
        };

        Ok(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = UserDeckError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colour scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Colour palette for all UI elements.
    pub colors: ThemeColors,
}

/// Colour definitions for all UI elements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: Rgb,
    #[serde(default)]
    pub header_bg: Option<Rgb>,

    /// Row under the cursor.
    pub selection_fg: Rgb,
    pub selection_bg: Rgb,

    pub text_normal: Rgb,
    /// Footer, pagination line and secondary text.
    pub text_dim: Rgb,

    pub border: Rgb,
    pub search_bar_border: Rgb,

    /// Search query matches inside names and emails.
    pub match_highlight_fg: Rgb,
    pub match_highlight_bg: Rgb,

    /// `▲`/`▼` on the sorted column.
    pub sort_marker_fg: Rgb,

    /// Loading and empty messages.
    pub status_fg: Rgb,
    pub error_fg: Rgb,

    pub popup_border: Rgb,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`UserDeckError::Io`] if the file cannot be read
    /// - [`UserDeckError::Theme`] if the TOML is invalid, a field is missing or
    ///   a colour is not `#rrggbb`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| UserDeckError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Plain palette used if the built-in default ever fails to parse.
    fn monochrome() -> Self {
        let light = Rgb(0xdd, 0xdd, 0xdd);
        let dark = Rgb(0x1e, 0x1e, 0x1e);
        let grey = Rgb(0x80, 0x80, 0x80);
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: light,
                header_bg: None,
                selection_fg: dark,
                selection_bg: light,
                text_normal: light,
                text_dim: grey,
                border: grey,
                search_bar_border: light,
                match_highlight_fg: dark,
                match_highlight_bg: grey,
                sort_marker_fg: light,
                status_fg: light,
                error_fg: light,
                popup_border: light,
            },
        }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!("built-in default theme failed to parse");
            Self::monochrome()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        let mocha = Theme::from_name("catppuccin-mocha").unwrap();
        let latte = Theme::from_name("catppuccin-latte").unwrap();
        assert_eq!(mocha.name, "catppuccin-mocha");
        assert_eq!(latte.name, "catppuccin-latte");
        assert_ne!(mocha.colors.text_normal, latte.colors.text_normal);
    }

    #[test]
    fn default_is_mocha() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn unknown_builtin_is_none() {
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!("#cdd6f4".parse::<Rgb>().unwrap(), Rgb(0xcd, 0xd6, 0xf4));
        assert_eq!("1e1e2e".parse::<Rgb>().unwrap(), Rgb(0x1e, 0x1e, 0x2e));
        assert!("#cdd6".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert_eq!(Rgb(0xcd, 0xd6, 0xf4).to_string(), "#cdd6f4");
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Rgb(1, 2, 3).fg(), "\u{1b}[38;2;1;2;3m");
        assert_eq!(Rgb(1, 2, 3).bg(), "\u{1b}[48;2;1;2;3m");
    }

    #[test]
    fn loads_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mocha = toml::to_string(&Theme::default()).unwrap();
        let custom = mocha.replace("catppuccin-mocha", "custom");
        file.write_all(custom.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.colors, Theme::default().colors);
    }

    #[test]
    fn theme_file_with_bad_colour_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mocha = toml::to_string(&Theme::default()).unwrap();
        let broken = mocha.replacen("#", "#zz", 1);
        file.write_all(broken.as_bytes()).unwrap();

        assert!(matches!(
            Theme::from_file(file.path()),
            Err(UserDeckError::Theme(_))
        ));
    }

    #[test]
    fn missing_theme_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Theme::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(UserDeckError::Io(_))));
    }
}

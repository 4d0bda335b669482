//! UserDeck: a Zellij plugin for browsing a remote user directory.
//!
//! UserDeck fetches the directory once and then works entirely client-side:
//! - Incremental search over names and emails
//! - Sorting by name or email, toggling direction on the active column
//! - Pagination in fixed pages of five rows
//! - A detail popup with the full record
//! - An address (query string) that captures the view and can be bookmarked

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Store
//! │  - Event handling and debounced derivation          │
//! │  - Filter / sort / paginate pipeline                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Directory     │   │ Address       │
//! │ (ui/)         │   │ (directory/)  │   │ (address/)    │
//! │ - Rendering   │   │ - Requests    │   │ - parse       │
//! │ - Theming     │   │ - Decoding    │   │ - serialize   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Records, view parameters, errors (domain/)       │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/userdeck.wasm" {
//!         endpoint "https://jsonplaceholder.typicode.com/users"
//!         address "search=an&sortKey=email&sortDirection=desc&page=1"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use userdeck::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mount { address: String::new() })?;
//! assert!(matches!(actions[0], Action::FetchDirectory(_)));
//! # Ok::<(), userdeck::UserDeckError>(())
//! ```

pub mod address;
pub mod app;
pub mod directory;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use directory::DirectoryClient;
pub use domain::{FetchError, Result, UserDeckError, UserRecord, ViewParameters};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory URL. Default: [`directory::DEFAULT_ENDPOINT`]
    pub endpoint: String,

    /// Initial address query string, e.g. `search=an&page=2`.
    ///
    /// Malformed parts fall back to their defaults. Default: empty
    pub address: String,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file; `~` is resolved against the host mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: directory::DEFAULT_ENDPOINT.to_string(),
            address: String::new(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or blank values keep their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use userdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("address".to_string(), "page=2".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.address, "page=2");
    /// assert_eq!(config.trace_level, "debug");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            endpoint: value("endpoint").unwrap_or(defaults.endpoint),
            address: config
                .get("address")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.address),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level").unwrap_or(defaults.trace_level),
        }
    }
}

/// Builds the store for a configuration.
///
/// The theme comes from `theme_file`, then `theme`, then the default; a theme
/// that fails to load is logged and replaced by the default. No request is
/// issued until the store receives [`Event::Mount`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing userdeck plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(
                    theme_file = %path,
                    error = %e,
                    "failed to load theme from file, using default"
                );
                Theme::default()
            })
        },
    );

    AppState::new(DirectoryClient::new(config.endpoint.clone()), theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = Config::from_zellij(&map(&[("endpoint", "  "), ("trace_level", "")]));
        assert_eq!(config.endpoint, directory::DEFAULT_ENDPOINT);
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "http://localhost:8080/users"),
            ("address", "search=al&page=2"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/deck.toml"),
            ("trace_level", "debug"),
        ]));
        assert_eq!(config.endpoint, "http://localhost:8080/users");
        assert_eq!(config.address, "search=al&page=2");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/deck.toml"));
        assert_eq!(config.trace_level, "debug");
    }

    #[test]
    fn initialize_picks_named_theme() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-latte");
    }

    #[test]
    fn initialize_falls_back_on_unknown_theme() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }

    #[test]
    fn theme_file_overrides_theme_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = toml::to_string(&Theme::default())
            .unwrap()
            .replace("catppuccin-mocha", "from-file");
        file.write_all(custom.as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "from-file");
    }

    #[test]
    fn initialize_targets_configured_endpoint() {
        let config = Config {
            endpoint: "http://localhost/users".to_string(),
            ..Config::default()
        };
        let mut state = initialize(&config);
        let (_, actions) = handle_event(
            &mut state,
            &Event::Mount {
                address: String::new(),
            },
        )
        .unwrap();
        match &actions[..] {
            [Action::FetchDirectory(request)] => assert_eq!(request.url, "http://localhost/users"),
            other => panic!("unexpected actions {other:?}"),
        }
    }
}

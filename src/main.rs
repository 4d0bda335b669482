//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the UserDeck library and the Zellij plugin
//! system: it translates Zellij events into library events and executes the
//! returned actions through the host API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: `WebAccess` for the fetch, `ChangeApplicationState`
//!    for the pane title
//! 3. **Mount**: Once permissions are granted, adopt the configured address
//!    and fetch the directory
//! 4. **Update**: Keys, timers and web responses go through `handle_event`
//! 5. **Render**: Call library render function
//!
//! # Timers
//!
//! Zellij timers cannot be cancelled and carry no payload. Each
//! `ArmDebounce` pushes its generation onto a FIFO queue; every `Timer`
//! event pops the oldest one. All timers share one duration, so they fire in
//! arming order and the queue stays aligned.
//!
//! # Keybindings
//!
//! In normal mode (and when navigating search results):
//! - `j`/`Down`, `k`/`Up`: Move the row cursor
//! - `h`/`Left`, `l`/`Right`: Previous / next page
//! - `1`-`9`: Jump to page
//! - `n`/`e`: Sort by name / email (again to reverse)
//! - `Enter`: Open detail
//! - `/`: Search
//! - `r`: Retry fetch
//! - `q`: Close plugin
//!
//! While typing a search:
//! - Characters edit the query, `Backspace` deletes
//! - `Enter`: Navigate results, keeping the query
//! - `Esc`: Clear the query
//!
//! In the detail popup `Esc`, `Enter` or `q` closes it.

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use userdeck::directory::{request_id_from_context, TraceContext};
use userdeck::domain::SortKey;
use userdeck::{handle_event, Action, Config, DirectoryClient, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: the
/// configured address and the queue of armed timer generations.
struct State {
    /// Core application state from library layer.
    app: userdeck::AppState,

    /// Address adopted on mount.
    initial_address: String,

    /// Generations of armed, not yet fired timers, oldest first.
    pending_timers: VecDeque<u64>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: userdeck::initialize(&Config::default()),
            initial_address: String::new(),
            pending_timers: VecDeque::new(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the store, requests permissions and
    /// subscribes to events. Nothing is fetched until permissions arrive.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        userdeck::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            endpoint = %config.endpoint,
            address = %config.address,
            "parsed configuration"
        );
        self.app = userdeck::initialize(&config);
        self.initial_address = config.address;

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // A response continues the trace of the request that produced it.
        let _remote_parent = match &event {
            zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) => {
                TraceContext::from_context(context).and_then(|trace| trace.attach())
            }
            _ => None,
        };

        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %span_name,
            event_type = %event_name
        );
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => match self.pending_timers.pop_front() {
                Some(generation) => Event::DebounceElapsed { generation },
                None => {
                    tracing::debug!("timer fired with no armed generation");
                    return false;
                }
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match self.map_permission_result(permissions) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        userdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        match self.app.input_mode {
            InputMode::Detail => match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetail),
                _ => None,
            },
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => match key.bare_key {
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Char('/') => Some(Event::FocusSearchBar),
                _ => Self::map_navigation_key(key.bare_key),
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Char('/') => Some(Event::SearchMode),
                _ => Self::map_navigation_key(key.bare_key),
            },
        }
    }

    /// Bindings shared by normal mode and search result navigation.
    fn map_navigation_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Char(c @ '1'..='9') => Event::GoToPage(c.to_digit(10)?),
            BareKey::Char('n') => Event::SortBy(SortKey::Name),
            BareKey::Char('e') => Event::SortBy(SortKey::Email),
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char('r') => Event::Retry,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Mounts the store on the first grant; a denial becomes an error panel.
    fn map_permission_result(&self, permissions: PermissionStatus) -> Option<Event> {
        match permissions {
            PermissionStatus::Granted if !self.app.is_mounted() => {
                tracing::debug!("permissions granted - mounting");
                Some(Event::Mount {
                    address: self.initial_address.clone(),
                })
            }
            PermissionStatus::Granted => None,
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - the directory cannot be fetched");
                Some(Event::NetworkDenied)
            }
        }
    }

    /// Decodes a web response into a fetch outcome for the request it answers.
    fn map_web_result_event(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(request_id) = request_id_from_context(context) else {
            tracing::debug!(status, "web response without request id, ignoring");
            return None;
        };

        tracing::debug!(request_id, status, body_len = body.len(), "directory response");
        Some(Event::DirectoryFetched {
            request_id,
            outcome: DirectoryClient::decode(status, body),
        })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchDirectory(request) => {
                tracing::debug!(
                    request_id = request.request_id,
                    url = %request.url,
                    "fetching directory"
                );
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context(),
                );
            }
            Action::ArmDebounce { generation, after } => {
                self.pending_timers.push_back(*generation);
                set_timeout(after.as_secs_f64());
            }
            Action::PublishAddress { query } => {
                tracing::debug!(address = %query, "publishing address");
                rename_plugin_pane(get_plugin_ids().plugin_id, format!("userdeck?{query}"));
            }
        }
    }
}

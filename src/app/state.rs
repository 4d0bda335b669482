//! The view-state store.
//!
//! [`AppState`] owns the fetched directory, the current [`ViewParameters`], the
//! cached result of the last derivation and the transient UI selection. It is
//! the single source of truth for everything the renderer shows.
//!
//! # Derivation
//!
//! User intents (`set_search`, `set_sort`, `set_page`) and fetch completion
//! only mutate parameters or records and re-arm the [`Debouncer`]. Filtering,
//! sorting, totals, the page reset/clamp and the address write all happen in
//! [`AppState::run_derivation`], which the handler calls once the quiescence
//! window expires. The visible page is re-sliced from the cached
//! filtered/sorted rows on every read, so paging feels immediate while the
//! address write still waits for the window.
//!
//! # Fetching
//!
//! Every fetch gets a fresh request id. Only the response carrying the latest
//! id is applied; anything older lost a race with a retry and is dropped.

use super::debounce::Debouncer;
use super::modes::{InputMode, SearchFocus};
use super::pipeline::{self, DerivedView, PAGE_SIZE};
use crate::address;
use crate::directory::{DirectoryClient, DirectorySnapshot, FetchRequest};
use crate::domain::{
    FetchError, SortDirection, SortKey, UserRecord, ViewParameters, NETWORK_DENIED_MESSAGE,
};
use crate::ui::components::{ID_COLUMN_WIDTH, NAME_COLUMN_WIDTH};
use crate::ui::helpers::{flatten_json, substring_ranges, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnHeader, DetailInfo, DisplayRow, FooterInfo, HeaderInfo, PaginationInfo, SearchBarInfo,
    StatusKind, StatusPanel, TableInfo, UIViewModel,
};

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Last successful fetch. `None` until one lands.
    pub snapshot: Option<DirectorySnapshot>,

    /// A fetch is in flight.
    pub loading: bool,

    /// User-facing message of the last failed fetch.
    pub error: Option<String>,

    /// Parameters as edited by the user.
    pub params: ViewParameters,

    /// Parameters as of the last address write (or the parsed mount address).
    ///
    /// The page-reset rule compares the search query against this.
    pub published: ViewParameters,

    /// Filtered and sorted records from the last derivation.
    derived: DerivedView,

    /// Row cursor within the visible page.
    pub cursor: usize,

    /// Record shown in the detail popup.
    pub selected_record_id: Option<u64>,

    pub input_mode: InputMode,

    pub theme: Theme,

    pub debouncer: Debouncer,

    /// Completed derivation passes; each one wrote the address once.
    pub derivations: u64,

    /// Records landed but have not been through a derivation yet.
    awaiting_derivation: bool,

    /// The first fetch was issued. Retries are refused before that.
    mounted: bool,

    /// The host refused network access; no fetch can succeed.
    network_denied: bool,

    latest_request: u64,

    client: DirectoryClient,
}

impl AppState {
    #[must_use]
    pub fn new(client: DirectoryClient, theme: Theme) -> Self {
        Self {
            snapshot: None,
            loading: false,
            error: None,
            params: ViewParameters::default(),
            published: ViewParameters::default(),
            derived: DerivedView::default(),
            cursor: 0,
            selected_record_id: None,
            input_mode: InputMode::Normal,
            theme,
            debouncer: Debouncer::default(),
            derivations: 0,
            awaiting_derivation: false,
            mounted: false,
            network_denied: false,
            latest_request: 0,
            client,
        }
    }

    /// All records of the last successful fetch (empty before one lands).
    #[must_use]
    pub fn records(&self) -> &[UserRecord] {
        match &self.snapshot {
            Some(snapshot) => &snapshot.records,
            None => &[],
        }
    }

    /// Count of records passing the filter, as of the last derivation.
    #[must_use]
    pub const fn total_matching(&self) -> usize {
        self.derived.total_matching
    }

    /// Page count as of the last derivation, never below one.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.derived.total_pages
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Adopts the parameters encoded in `address` and starts the first fetch.
    ///
    /// Does not arm the debounce: the first derivation follows the fetch.
    pub fn mount(&mut self, address: &str) -> FetchRequest {
        self.mounted = true;
        self.network_denied = false;
        self.params = address::parse(address);
        self.published = self.params.clone();
        tracing::debug!(
            search = %self.params.search_query,
            sort_key = %self.params.sort_key,
            sort_direction = %self.params.sort_direction,
            page = self.params.page,
            "mounted from address"
        );
        self.begin_fetch()
    }

    /// Marks a new fetch in flight and describes it.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_request += 1;
        self.loading = true;
        self.error = None;
        tracing::debug!(request_id = self.latest_request, "directory fetch started");
        self.client.request(self.latest_request)
    }

    /// Re-runs the fetch sequence, keeping the current parameters.
    ///
    /// Returns `None` before mount or once network access was denied, since
    /// the host would drop the request and leave the view loading forever.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if !self.mounted || self.network_denied {
            tracing::debug!(
                mounted = self.mounted,
                network_denied = self.network_denied,
                "retry refused"
            );
            return None;
        }
        tracing::debug!(had_error = self.error.is_some(), "retrying directory fetch");
        Some(self.begin_fetch())
    }

    /// Records that the host refused network access.
    ///
    /// Surfaces as an error panel instead of an empty directory.
    pub fn deny_network(&mut self) {
        tracing::warn!("network access denied, directory cannot be fetched");
        self.network_denied = true;
        self.loading = false;
        self.error = Some(NETWORK_DENIED_MESSAGE.to_string());
    }

    /// Applies a fetch outcome.
    ///
    /// Returns `false` without touching state when `request_id` is not the
    /// latest request.
    pub fn apply_fetch(
        &mut self,
        request_id: u64,
        outcome: Result<Vec<UserRecord>, FetchError>,
    ) -> bool {
        if request_id != self.latest_request {
            tracing::debug!(
                request_id,
                latest = self.latest_request,
                "discarding stale directory response"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(records) => {
                tracing::info!(record_count = records.len(), "directory loaded");
                self.snapshot = Some(DirectorySnapshot::new(records));
                self.error = None;
                self.awaiting_derivation = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "directory fetch failed");
                self.error = Some(e.user_message().to_string());
                self.snapshot = None;
                self.derived = DerivedView::default();
                self.cursor = 0;
            }
        }
        true
    }

    /// Replaces the search query. Returns the debounce generation to arm.
    pub fn set_search(&mut self, query: impl Into<String>) -> u64 {
        self.params.search_query = query.into();
        tracing::trace!(query = %self.params.search_query, "search query updated");
        self.debouncer.arm()
    }

    /// Sorts by `key`; choosing the current key again flips the direction.
    ///
    /// The page is kept. Returns the debounce generation to arm.
    pub fn set_sort(&mut self, key: SortKey) -> u64 {
        if self.params.sort_key == key {
            self.params.sort_direction = self.params.sort_direction.toggled();
        } else {
            self.params.sort_key = key;
            self.params.sort_direction = SortDirection::Asc;
        }
        tracing::debug!(
            sort_key = %self.params.sort_key,
            sort_direction = %self.params.sort_direction,
            "sort changed"
        );
        self.debouncer.arm()
    }

    /// Moves to `page` without validating it against `total_pages`.
    ///
    /// Returns the debounce generation to arm.
    pub fn set_page(&mut self, page: u32) -> u64 {
        self.params.page = page;
        self.cursor = 0;
        self.debouncer.arm()
    }

    /// Advances one page if the last derivation has one.
    pub fn next_page(&mut self) -> Option<u64> {
        (self.params.page < self.total_pages()).then(|| self.set_page(self.params.page + 1))
    }

    /// Goes back one page unless already on the first.
    pub fn prev_page(&mut self) -> Option<u64> {
        (self.params.page > 1).then(|| self.set_page(self.params.page - 1))
    }

    /// Consumes a debounce expiry; runs the derivation if it is current.
    ///
    /// Returns the address query to publish.
    pub fn on_debounce(&mut self, generation: u64) -> Option<String> {
        self.debouncer.fire(generation).then(|| self.run_derivation())
    }

    /// Filter, sort, totals, page reset/clamp, publish.
    ///
    /// Returns the serialized parameters for the address write.
    pub fn run_derivation(&mut self) -> String {
        let _span = tracing::debug_span!(
            "run_derivation",
            total_records = self.records().len(),
            query_len = self.params.search_query.len(),
        )
        .entered();

        self.derived = pipeline::derive_view(self.records(), &self.params);

        if self.params.search_query != self.published.search_query {
            self.params.page = 1;
        }
        self.params.page = self.params.page.max(1);
        if self.snapshot.is_some() && self.params.page > self.derived.total_pages {
            tracing::debug!(
                page = self.params.page,
                total_pages = self.derived.total_pages,
                "clamping page"
            );
            self.params.page = self.derived.total_pages;
        }

        self.awaiting_derivation = false;
        self.clamp_cursor();
        self.published = self.params.clone();
        self.derivations += 1;

        let query = address::serialize(&self.params);
        tracing::debug!(
            total_matching = self.derived.total_matching,
            total_pages = self.derived.total_pages,
            address = %query,
            "derivation published"
        );
        query
    }

    /// Rows of the current page, sliced from the last derivation.
    #[must_use]
    pub fn visible_rows(&self) -> &[UserRecord] {
        self.derived.visible_rows(self.params.page)
    }

    /// Moves the row cursor down, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the row cursor up, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_rows().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Opens the detail popup for the row under the cursor.
    ///
    /// Returns `false` when the page is empty.
    pub fn open_detail(&mut self) -> bool {
        let Some(record) = self.visible_rows().get(self.cursor) else {
            return false;
        };
        tracing::debug!(record_id = record.id, "opening detail");
        self.selected_record_id = Some(record.id);
        self.input_mode = InputMode::Detail;
        true
    }

    pub fn close_detail(&mut self) {
        self.selected_record_id = None;
        if self.input_mode == InputMode::Detail {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Record whose detail popup is open.
    #[must_use]
    pub fn selected_record(&self) -> Option<&UserRecord> {
        let id = self.selected_record_id?;
        self.records().iter().find(|record| record.id == id)
    }

    /// The address as currently published.
    #[must_use]
    pub fn address(&self) -> String {
        address::serialize(&self.published)
    }

    /// Computes a renderable UI view model.
    ///
    /// `cols` drives column truncation; the table never holds more than
    /// [`PAGE_SIZE`] rows, so no windowing is needed.
    #[must_use]
    pub fn compute_viewmodel(&self, _rows: usize, cols: usize) -> UIViewModel {
        let status = self.compute_status();
        let table = TableInfo {
            columns: self.compute_columns(),
            rows: if status.is_some() {
                vec![]
            } else {
                self.compute_rows(cols)
            },
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            table,
            status,
            pagination: self.compute_pagination(),
            detail: self.compute_detail(),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let summary = match &self.snapshot {
            Some(snapshot) => format!(
                "{} of {} users · fetched {}",
                self.total_matching(),
                snapshot.records.len(),
                snapshot.fetched_label()
            ),
            None if self.loading => "fetching directory".to_string(),
            None => "no data".to_string(),
        };

        HeaderInfo {
            title: " UserDeck ".to_string(),
            summary,
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let searching = matches!(self.input_mode, InputMode::Search(_));
        (searching || !self.params.search_query.is_empty()).then(|| SearchBarInfo {
            query: self.params.search_query.clone(),
            focused: self.input_mode.is_typing(),
        })
    }

    fn compute_columns(&self) -> Vec<ColumnHeader> {
        let marker = |key: SortKey| {
            (self.params.sort_key == key).then(|| self.params.sort_direction.marker())
        };
        vec![
            ColumnHeader {
                label: "ID".to_string(),
                marker: None,
            },
            ColumnHeader {
                label: "NAME".to_string(),
                marker: marker(SortKey::Name),
            },
            ColumnHeader {
                label: "EMAIL".to_string(),
                marker: marker(SortKey::Email),
            },
        ]
    }

    fn compute_rows(&self, cols: usize) -> Vec<DisplayRow> {
        let email_width = cols.saturating_sub(ID_COLUMN_WIDTH + NAME_COLUMN_WIDTH + 1);
        let query = &self.params.search_query;

        self.visible_rows()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let name = truncate(&record.name, NAME_COLUMN_WIDTH - 2);
                let email = truncate(&record.email, email_width);
                DisplayRow {
                    id: record.id.to_string(),
                    name_highlights: substring_ranges(&name, query),
                    email_highlights: substring_ranges(&email, query),
                    name,
                    email,
                    is_selected: index == self.cursor,
                }
            })
            .collect()
    }

    fn compute_status(&self) -> Option<StatusPanel> {
        if !self.mounted && !self.network_denied {
            return Some(StatusPanel {
                kind: StatusKind::Loading,
                message: "Waiting for network permission...".to_string(),
                hint: "Grant access in the permission prompt".to_string(),
            });
        }

        if self.loading || self.awaiting_derivation {
            return Some(StatusPanel {
                kind: StatusKind::Loading,
                message: "Loading users...".to_string(),
                hint: self.client.endpoint().to_string(),
            });
        }

        if let Some(error) = &self.error {
            return Some(StatusPanel {
                kind: StatusKind::Error,
                message: error.clone(),
                hint: if self.network_denied {
                    "Grant web access and reload the plugin".to_string()
                } else {
                    "Press r to retry".to_string()
                },
            });
        }

        if self.derived.total_matching == 0 {
            let message = if self.published.search_query.is_empty() {
                "No users".to_string()
            } else {
                format!("No users match \"{}\"", self.published.search_query)
            };
            return Some(StatusPanel {
                kind: StatusKind::Empty,
                message,
                hint: "Esc clears the search".to_string(),
            });
        }

        if self.visible_rows().is_empty() {
            return Some(StatusPanel {
                kind: StatusKind::Empty,
                message: format!("Page {} is empty", self.params.page),
                hint: "Press h to go back".to_string(),
            });
        }

        None
    }

    fn compute_pagination(&self) -> PaginationInfo {
        let total_matching = self.derived.total_matching;
        let total_pages = self.derived.total_pages;
        let noun = if total_matching == 1 { "user" } else { "users" };
        PaginationInfo {
            label: format!(
                "Page {} of {} · {} {noun}",
                self.params.page, total_pages, total_matching
            ),
            has_prev: self.params.page > 1,
            has_next: self.params.page < total_pages,
        }
    }

    fn compute_detail(&self) -> Option<DetailInfo> {
        if self.input_mode != InputMode::Detail {
            return None;
        }
        let record = self.selected_record()?;

        let mut lines = vec![
            ("Name".to_string(), record.name.clone()),
            ("Email".to_string(), record.email.clone()),
            ("Username".to_string(), record.username.clone()),
            ("Phone".to_string(), record.phone.clone()),
            ("Website".to_string(), record.website.clone()),
        ];
        flatten_json("address", &record.address, &mut lines);
        flatten_json("company", &record.company, &mut lines);

        Some(DetailInfo {
            title: format!(" #{} {} ", record.id, record.name),
            lines,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "Type to filter  Backspace: delete  Enter: done  Esc: clear".to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "j/k: move  h/l: page  n/e: sort  Enter: details  /: edit  Esc: clear".to_string()
            }
            InputMode::Detail => "Esc/Enter/q: close".to_string(),
            InputMode::Normal => concat!(
                "j/k: move  h/l: page  1-9: go to  n/e: sort  ",
                "/: search  Enter: details  r: retry  q: quit"
            )
            .to_string(),
        };

        FooterInfo {
            keybindings,
            address: format!("userdeck?{}", self.address()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DirectoryClient::default(), Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seven_users() -> Vec<UserRecord> {
        [
            (1, "Leanne Graham", "sincere@april.biz"),
            (2, "Ervin Howell", "shanna@melissa.tv"),
            (3, "Clementine Bauch", "nathan@yesenia.net"),
            (4, "Patricia Lebsack", "julianne.oconner@kory.org"),
            (5, "Chelsey Dietrich", "lucio_hettinger@annie.ca"),
            (6, "Dennis Schulist", "karley_dach@jasper.info"),
            (7, "Kurtis Weissnat", "telly.hoeger@billy.biz"),
        ]
        .into_iter()
        .map(|(id, name, email)| UserRecord::new(id, name, email))
        .collect()
    }

    fn loaded(address: &str) -> AppState {
        let mut state = AppState::default();
        let request = state.mount(address);
        assert!(state.apply_fetch(request.request_id, Ok(seven_users())));
        state.run_derivation();
        state
    }

    #[test]
    fn mount_adopts_address_and_starts_loading() {
        let mut state = AppState::default();
        let request = state.mount("search=le&sortKey=email&sortDirection=desc&page=2");

        assert!(state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.params.search_query, "le");
        assert_eq!(state.params.sort_key, SortKey::Email);
        assert_eq!(state.params.sort_direction, SortDirection::Desc);
        assert_eq!(state.params.page, 2);
        assert_eq!(request.request_id, 1);
        assert!(!state.debouncer.is_pending());
    }

    #[test]
    fn set_sort_toggles_same_key_and_resets_direction_on_new_key() {
        let mut state = AppState::default();
        state.set_sort(SortKey::Name);
        assert_eq!(state.params.sort_direction, SortDirection::Desc);

        state.set_sort(SortKey::Email);
        assert_eq!(state.params.sort_key, SortKey::Email);
        assert_eq!(state.params.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn search_change_resets_page_after_derivation() {
        let mut state = loaded("search=a&page=2");
        assert_eq!(state.params.page, 2);

        state.set_search("ab");
        state.params.page = 3;
        state.run_derivation();
        assert_eq!(state.params.page, 1);
    }

    #[test]
    fn sort_change_keeps_page_in_range() {
        let mut state = loaded("page=2");
        state.set_sort(SortKey::Name);
        state.run_derivation();
        assert_eq!(state.params.page, 2);
        assert_eq!(state.visible_rows().len(), 2);
    }

    #[test]
    fn out_of_range_page_is_clamped_once_loaded() {
        let state = loaded("page=9");
        assert_eq!(state.params.page, 2);
        assert_eq!(state.published.page, 2);
    }

    #[test]
    fn bookmarked_page_survives_derivation_while_loading() {
        let mut state = AppState::default();
        state.mount("page=4");
        state.run_derivation();
        assert_eq!(state.params.page, 4);
        assert_eq!(state.total_pages(), 1);
        assert!(state.visible_rows().is_empty());
    }

    #[test]
    fn page_changes_reslice_before_derivation() {
        let mut state = loaded("");
        let derivations = state.derivations;
        state.set_page(2);
        assert_eq!(state.visible_rows().len(), 2);
        assert_eq!(state.derivations, derivations);
        assert_eq!(state.published.page, 1);
    }

    #[test]
    fn next_and_prev_page_respect_bounds() {
        let mut state = loaded("");
        assert!(state.prev_page().is_none());
        assert!(state.next_page().is_some());
        assert_eq!(state.params.page, 2);
        assert!(state.next_page().is_none());
    }

    #[test]
    fn cursor_wraps_within_page() {
        let mut state = loaded("page=2");
        state.move_cursor_up();
        assert_eq!(state.cursor, 1);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn stale_fetch_response_is_ignored() {
        let mut state = AppState::default();
        let first = state.mount("");
        let second = state.retry().unwrap();

        assert!(!state.apply_fetch(first.request_id, Err(FetchError::Status(500))));
        assert!(state.loading);
        assert!(state.error.is_none());

        assert!(state.apply_fetch(second.request_id, Ok(seven_users())));
        assert!(!state.loading);
        assert_eq!(state.records().len(), 7);
    }

    #[test]
    fn failed_fetch_surfaces_user_message() {
        let mut state = AppState::default();
        let request = state.mount("");
        state.apply_fetch(request.request_id, Err(FetchError::Malformed("eof".into())));
        state.run_derivation();

        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some(crate::domain::FETCH_FAILED_MESSAGE)
        );
        assert!(state.visible_rows().is_empty());

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Error));
    }

    #[test]
    fn detail_shows_flattened_payloads() {
        let mut state = AppState::default();
        let request = state.mount("");
        let mut record = UserRecord::new(1, "Leanne Graham", "sincere@april.biz");
        record.address = json!({"city": "Gwenborough", "geo": {"lat": "-37.3159"}});
        record.company = json!({"name": "Romaguera-Crona"});
        state.apply_fetch(request.request_id, Ok(vec![record]));
        state.run_derivation();

        assert!(state.open_detail());
        let detail = state.compute_viewmodel(24, 80).detail.unwrap();
        assert!(detail.title.contains("Leanne Graham"));
        assert!(detail
            .lines
            .contains(&("address.geo.lat".to_string(), "-37.3159".to_string())));
        assert!(detail
            .lines
            .contains(&("company.name".to_string(), "Romaguera-Crona".to_string())));

        state.close_detail();
        assert_eq!(state.selected_record_id, None);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn viewmodel_marks_sort_column_and_highlights_matches() {
        let mut state = loaded("search=an&sortDirection=desc");
        state.input_mode = InputMode::Search(SearchFocus::Navigating);
        let vm = state.compute_viewmodel(24, 100);

        assert_eq!(vm.table.columns[1].marker, Some('▼'));
        assert_eq!(vm.table.columns[2].marker, None);
        assert!(vm.status.is_none());
        assert!(vm
            .table
            .rows
            .iter()
            .all(|row| !row.name_highlights.is_empty() || !row.email_highlights.is_empty()));
        assert!(vm.footer.address.starts_with("userdeck?search=an"));
    }

    #[test]
    fn viewmodel_reports_no_matches() {
        let mut state = loaded("");
        state.set_search("nobody");
        state.run_derivation();
        let status = state.compute_viewmodel(24, 80).status.unwrap();
        assert_eq!(status.kind, StatusKind::Empty);
        assert!(status.message.contains("nobody"));
    }

    #[test]
    fn landed_records_show_loading_until_derived() {
        let mut state = AppState::default();
        let request = state.mount("");
        state.apply_fetch(request.request_id, Ok(seven_users()));
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Loading));
    }

    #[test]
    fn failed_retry_drops_previous_rows() {
        let mut state = loaded("page=2");
        assert_eq!(state.visible_rows().len(), 2);

        let request = state.retry().unwrap();
        state.apply_fetch(request.request_id, Err(FetchError::Status(502)));
        assert!(state.visible_rows().is_empty());
        assert!(state.records().is_empty());
        assert_eq!(state.total_matching(), 0);

        state.run_derivation();
        assert!(state.visible_rows().is_empty());
        assert_eq!(state.params.page, 2);
        assert!(state.error.is_some());
    }

    #[test]
    fn unmounted_store_waits_for_permission() {
        let state = AppState::default();
        let status = state.compute_viewmodel(24, 80).status.unwrap();
        assert_eq!(status.kind, StatusKind::Loading);
        assert!(status.message.contains("permission"));
    }

    #[test]
    fn denied_network_is_an_error_without_retry() {
        let mut state = AppState::default();
        state.deny_network();
        assert!(state.retry().is_none());
        assert!(!state.loading);

        let status = state.compute_viewmodel(24, 80).status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, NETWORK_DENIED_MESSAGE);
        assert!(!status.hint.contains("retry"));
    }

    #[test]
    fn mount_after_denial_fetches_again() {
        let mut state = AppState::default();
        state.deny_network();
        state.mount("");
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.retry().is_some());
    }

    #[test]
    fn derivation_caches_the_pipeline_result() {
        let state = loaded("search=an");
        let expected = pipeline::derive_view(&seven_users(), &state.params);
        assert_eq!(state.total_matching(), expected.total_matching);
        assert_eq!(state.visible_rows(), expected.visible_rows(state.params.page));
    }

    #[test]
    fn page_size_bounds_visible_rows() {
        let state = loaded("");
        assert_eq!(state.visible_rows().len(), PAGE_SIZE);
    }
}

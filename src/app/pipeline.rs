//! Pure filter → sort → paginate pipeline.
//!
//! Every function here is total and deterministic; the store only decides
//! *when* to run them.

use crate::domain::{SortDirection, SortKey, UserRecord, ViewParameters};

/// Rows per page.
pub const PAGE_SIZE: usize = 5;

/// Result of filtering and sorting for one set of parameters.
///
/// Holds every matching row rather than one page, so a page change is a
/// re-slice instead of a new pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    /// Filtered and sorted rows across all pages.
    pub matching: Vec<UserRecord>,
    /// Number of records passing the search filter.
    pub total_matching: usize,
    /// Page count, never below one.
    pub total_pages: u32,
}

impl DerivedView {
    /// Rows on `page` (1-based), at most [`PAGE_SIZE`]. Empty when out of range.
    #[must_use]
    pub fn visible_rows(&self, page: u32) -> &[UserRecord] {
        page_slice(&self.matching, page)
    }
}

impl Default for DerivedView {
    fn default() -> Self {
        Self {
            matching: Vec::new(),
            total_matching: 0,
            total_pages: 1,
        }
    }
}

/// Keeps records whose case-folded name or email contains the case-folded
/// query. Input order is preserved.
#[must_use]
pub fn filter_records(records: &[UserRecord], query: &str) -> Vec<UserRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}

/// Stable sort on the case-folded value of `key`.
///
/// Equal keys keep their relative order in both directions.
pub fn sort_records(records: &mut [UserRecord], key: SortKey, direction: SortDirection) {
    let fold = |record: &UserRecord| match key {
        SortKey::Name => record.name.to_lowercase(),
        SortKey::Email => record.email.to_lowercase(),
    };

    records.sort_by_cached_key(|record| fold(record));
    if direction == SortDirection::Desc {
        reverse_keeping_ties(records, fold);
    }
}

/// Reverses an ascending slice while keeping runs of equal keys in their
/// original order, so descending order is still stable.
fn reverse_keeping_ties<F>(records: &mut [UserRecord], fold: F)
where
    F: Fn(&UserRecord) -> String,
{
    let keys: Vec<String> = records.iter().map(&fold).collect();
    records.reverse();

    let mut start = 0;
    let len = records.len();
    while start < len {
        let mut end = start + 1;
        while end < len && keys[len - 1 - end] == keys[len - 1 - start] {
            end += 1;
        }
        records[start..end].reverse();
        start = end;
    }
}

/// `max(1, ceil(total_matching / PAGE_SIZE))`.
#[must_use]
pub fn total_pages(total_matching: usize) -> u32 {
    let pages = total_matching.div_ceil(PAGE_SIZE).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Rows belonging to `page` (1-based). Out-of-range pages yield an empty slice.
#[must_use]
pub fn page_slice(rows: &[UserRecord], page: u32) -> &[UserRecord] {
    let Some(index) = (page as usize).checked_sub(1) else {
        return &[];
    };
    let start = index.saturating_mul(PAGE_SIZE);
    if start >= rows.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(rows.len());
    &rows[start..end]
}

/// Filters and sorts `records` for the search and sort parts of `params`.
///
/// `params.page` plays no part here: no clamping happens in the pipeline.
#[must_use]
pub fn derive_view(records: &[UserRecord], params: &ViewParameters) -> DerivedView {
    let mut matching = filter_records(records, &params.search_query);
    sort_records(&mut matching, params.sort_key, params.sort_direction);
    DerivedView {
        total_matching: matching.len(),
        total_pages: total_pages(matching.len()),
        matching,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn user(id: u64, name: &str, email: &str) -> UserRecord {
        UserRecord::new(id, name, email)
    }

    fn seven_users() -> Vec<UserRecord> {
        vec![
            user(1, "Leanne Graham", "sincere@april.biz"),
            user(2, "Ervin Howell", "shanna@melissa.tv"),
            user(3, "Clementine Bauch", "nathan@yesenia.net"),
            user(4, "Patricia Lebsack", "julianne.oconner@kory.org"),
            user(5, "Chelsey Dietrich", "lucio_hettinger@annie.ca"),
            user(6, "Dennis Schulist", "karley_dach@jasper.info"),
            user(7, "Kurtis Weissnat", "telly.hoeger@billy.biz"),
        ]
    }

    fn names(rows: &[UserRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn seven_records_span_two_pages_by_name() {
        let records = seven_users();
        let mut params = ViewParameters::default();

        let view = derive_view(&records, &params);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.total_matching, 7);
        assert_eq!(
            names(view.visible_rows(params.page)),
            vec![
                "Chelsey Dietrich",
                "Clementine Bauch",
                "Dennis Schulist",
                "Ervin Howell",
                "Kurtis Weissnat"
            ]
        );

        params.page = 2;
        assert_eq!(
            names(view.visible_rows(params.page)),
            vec!["Leanne Graham", "Patricia Lebsack"]
        );
        assert_eq!(derive_view(&records, &params), view);
    }

    #[test]
    fn descending_by_email() {
        let params = ViewParameters {
            sort_key: SortKey::Email,
            sort_direction: SortDirection::Desc,
            ..ViewParameters::default()
        };
        let view = derive_view(&seven_users(), &params);
        assert_eq!(view.visible_rows(1)[0].email, "telly.hoeger@billy.biz");
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let params = ViewParameters {
            search_query: "nobody".into(),
            ..ViewParameters::default()
        };
        let view = derive_view(&seven_users(), &params);
        assert_eq!(view.total_matching, 0);
        assert_eq!(view.total_pages, 1);
        assert!(view.visible_rows(1).is_empty());
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let view = derive_view(&seven_users(), &ViewParameters::default());
        assert!(view.visible_rows(3).is_empty());
        assert!(view.visible_rows(9).is_empty());
    }

    #[test]
    fn default_view_has_one_empty_page() {
        let view = DerivedView::default();
        assert_eq!(view.total_pages, 1);
        assert!(view.visible_rows(1).is_empty());
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let mut rows = vec![
            user(1, "Bo", "x@a"),
            user(2, "al", "x@b"),
            user(3, "AL", "x@c"),
            user(4, "Al", "x@d"),
        ];
        sort_records(&mut rows, SortKey::Name, SortDirection::Desc);
        let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(10), 2);
        assert_eq!(total_pages(11), 3);
    }

    #[test]
    fn page_zero_is_empty() {
        assert!(page_slice(&seven_users(), 0).is_empty());
    }

    fn arb_records() -> impl Strategy<Value = Vec<UserRecord>> {
        prop::collection::vec(("[a-dA-D ]{0,4}", "[a-dA-D@.]{0,4}"), 0..25).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (name, email))| UserRecord::new(i as u64, name, email))
                .collect()
        })
    }

    fn arb_key() -> impl Strategy<Value = SortKey> {
        prop_oneof![Just(SortKey::Name), Just(SortKey::Email)]
    }

    fn arb_direction() -> impl Strategy<Value = SortDirection> {
        prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
    }

    proptest! {
        #[test]
        fn filter_keeps_exactly_the_matches(records in arb_records(), query in "[a-dA-D]{0,2}") {
            let kept = filter_records(&records, &query);
            let needle = query.to_lowercase();
            for record in &records {
                let hit = record.name.to_lowercase().contains(&needle)
                    || record.email.to_lowercase().contains(&needle);
                prop_assert_eq!(kept.contains(record), hit);
            }
        }

        #[test]
        fn sort_is_monotonic_and_stable(
            mut records in arb_records(),
            key in arb_key(),
            direction in arb_direction(),
        ) {
            sort_records(&mut records, key, direction);
            let fold = |r: &UserRecord| match key {
                SortKey::Name => r.name.to_lowercase(),
                SortKey::Email => r.email.to_lowercase(),
            };
            for pair in records.windows(2) {
                let (a, b) = (fold(&pair[0]), fold(&pair[1]));
                match direction {
                    SortDirection::Asc => prop_assert!(a <= b),
                    SortDirection::Desc => prop_assert!(a >= b),
                }
                if a == b {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        #[test]
        fn page_sizes_add_up(records in arb_records(), page in 1u32..8) {
            let params = ViewParameters { page, ..ViewParameters::default() };
            let view = derive_view(&records, &params);
            let expected_pages = u32::try_from(records.len().div_ceil(PAGE_SIZE).max(1)).unwrap();
            prop_assert_eq!(view.total_pages, expected_pages);

            let before = (page as usize - 1) * PAGE_SIZE;
            let expected_len = view.total_matching.saturating_sub(before).min(PAGE_SIZE);
            prop_assert_eq!(view.visible_rows(page).len(), expected_len);
        }
    }
}

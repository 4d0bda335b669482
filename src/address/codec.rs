//! Mapping between [`ViewParameters`] and the address query string.
//!
//! Both directions are pure. Parsing is tolerant: a missing, empty or
//! unrecognised value falls back to its default so that a hand-edited or
//! truncated address always yields a renderable view.

use super::form;
use crate::domain::{SortDirection, SortKey, ViewParameters};

pub const SEARCH_KEY: &str = "search";
pub const SORT_KEY_KEY: &str = "sortKey";
pub const SORT_DIRECTION_KEY: &str = "sortDirection";
pub const PAGE_KEY: &str = "page";

/// Reads view parameters from an address query string.
///
/// The first occurrence of a key wins. Unknown keys are ignored.
///
/// ```
/// use userdeck::address::parse;
/// use userdeck::domain::{SortDirection, SortKey};
///
/// let params = parse("?search=ann+b&sortKey=email&sortDirection=desc&page=3");
/// assert_eq!(params.search_query, "ann b");
/// assert_eq!(params.sort_key, SortKey::Email);
/// assert_eq!(params.sort_direction, SortDirection::Desc);
/// assert_eq!(params.page, 3);
/// ```
#[must_use]
pub fn parse(address_query: &str) -> ViewParameters {
    let pairs = form::parse_pairs(address_query);
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    };

    let sort_key = get(SORT_KEY_KEY).map_or(SortKey::default(), |raw| {
        raw.parse().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "falling back to default sort key");
            SortKey::default()
        })
    });

    let sort_direction = get(SORT_DIRECTION_KEY).map_or(SortDirection::default(), |raw| {
        raw.parse().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "falling back to default sort direction");
            SortDirection::default()
        })
    });

    let page = get(PAGE_KEY)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1);

    ViewParameters {
        search_query: get(SEARCH_KEY).unwrap_or_default().to_string(),
        sort_key,
        sort_direction,
        page,
    }
}

/// Writes view parameters as an address query string.
///
/// Key order is fixed (`search`, `sortKey`, `sortDirection`, `page`) and
/// `search` is left out entirely when empty.
///
/// ```
/// use userdeck::address::serialize;
/// use userdeck::ViewParameters;
///
/// assert_eq!(
///     serialize(&ViewParameters::default()),
///     "sortKey=name&sortDirection=asc&page=1"
/// );
/// ```
#[must_use]
pub fn serialize(params: &ViewParameters) -> String {
    let page = params.page.to_string();
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(4);

    if !params.search_query.is_empty() {
        pairs.push((SEARCH_KEY, params.search_query.as_str()));
    }
    pairs.push((SORT_KEY_KEY, params.sort_key.as_str()));
    pairs.push((SORT_DIRECTION_KEY, params.sort_direction.as_str()));
    pairs.push((PAGE_KEY, page.as_str()));

    form::serialize_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_address_yields_defaults() {
        assert_eq!(parse(""), ViewParameters::default());
        assert_eq!(parse("?"), ViewParameters::default());
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let params = parse("sortKey=phone&sortDirection=sideways&page=abc");
        assert_eq!(params, ViewParameters::default());

        assert_eq!(parse("page=0").page, 1);
        assert_eq!(parse("page=-4").page, 1);
        assert_eq!(parse("page=").page, 1);
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(parse("page=2&page=7").page, 2);
    }

    #[test]
    fn search_is_omitted_when_empty() {
        let params = ViewParameters {
            page: 4,
            ..ViewParameters::default()
        };
        assert!(!serialize(&params).contains(SEARCH_KEY));
    }

    #[test]
    fn search_is_encoded_first() {
        let params = ViewParameters {
            search_query: "a&b=c".into(),
            sort_key: SortKey::Email,
            sort_direction: SortDirection::Desc,
            page: 2,
        };
        assert_eq!(
            serialize(&params),
            "search=a%26b%3Dc&sortKey=email&sortDirection=desc&page=2"
        );
    }

    fn arb_params() -> impl Strategy<Value = ViewParameters> {
        (
            any::<String>(),
            prop_oneof![Just(SortKey::Name), Just(SortKey::Email)],
            prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)],
            1u32..=50,
        )
            .prop_map(|(search_query, sort_key, sort_direction, page)| ViewParameters {
                search_query,
                sort_key,
                sort_direction,
                page,
            })
    }

    proptest! {
        #[test]
        fn parse_inverts_serialize(params in arb_params()) {
            prop_assert_eq!(parse(&serialize(&params)), params);
        }
    }
}

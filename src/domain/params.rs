//! View parameters: the tuple that fully determines what the table shows.

use super::error::ParamError;
use std::fmt;
use std::str::FromStr;

/// Column the table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Name,
    Email,
}

impl SortKey {
    /// Address representation of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            other => Err(ParamError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Ordering applied to the sort column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Address representation of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to the sorted column header.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Asc => '▲',
            Self::Desc => '▼',
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParamError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// Search text, sort column, sort direction and 1-based page number.
///
/// `page` is never zero; the address codec and the store both maintain that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParameters {
    pub search_query: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub page: u32,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parses_recognised_values_only() {
        assert_eq!("email".parse::<SortKey>(), Ok(SortKey::Email));
        assert_eq!(
            "phone".parse::<SortKey>(),
            Err(ParamError::UnknownSortKey("phone".into()))
        );
    }

    #[test]
    fn direction_toggles() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }
}

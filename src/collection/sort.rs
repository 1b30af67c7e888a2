//! Sort keys.
//!
//! A sort token is a field name with an optional `-desc` suffix, e.g.
//! `artist`, `year-desc`, `dateAdded-desc`. Fields form a closed set; each
//! one knows how to compare two records.

use super::collation::locale_compare;
use crate::error::CatalogError;
use crate::record::Record;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const DESC_SUFFIX: &str = "-desc";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Artist,
    Album,
    Year,
    Genre,
    Condition,
    Notes,
    AlbumCover,
    DateAdded,
    Id,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Artist,
        SortField::Album,
        SortField::Year,
        SortField::Genre,
        SortField::Condition,
        SortField::Notes,
        SortField::AlbumCover,
        SortField::DateAdded,
        SortField::Id,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            SortField::Artist => "artist",
            SortField::Album => "album",
            SortField::Year => "year",
            SortField::Genre => "genre",
            SortField::Condition => "condition",
            SortField::Notes => "notes",
            SortField::AlbumCover => "albumCover",
            SortField::DateAdded => "dateAdded",
            SortField::Id => "id",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        SortField::ALL
            .into_iter()
            .find(|field| field.token().eq_ignore_ascii_case(token))
    }

    /// Ascending comparison of two records on this field. Missing years
    /// read as 0, missing text as "".
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let by_text = |text: fn(&Record) -> &str| locale_compare(text(a), text(b));
        match self {
            SortField::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
            SortField::Artist => by_text(|r| r.artist.as_str()),
            SortField::Album => by_text(|r| r.album.as_str()),
            SortField::Genre => by_text(|r| r.genre.as_deref().unwrap_or("")),
            SortField::Condition => by_text(|r| r.condition.as_str()),
            SortField::Notes => by_text(|r| r.notes.as_deref().unwrap_or("")),
            SortField::AlbumCover => by_text(|r| r.album_cover.as_deref().unwrap_or("")),
            SortField::DateAdded => by_text(|r| r.date_added.as_str()),
            SortField::Id => by_text(|r| r.id.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Parse a sort token. The empty token and `default` mean "no sort",
    /// i.e. insertion order.
    pub fn parse_token(token: &str) -> Result<Option<SortKey>, CatalogError> {
        let token = token.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("default") {
            return Ok(None);
        }
        token.parse().map(Some)
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.len().checked_sub(DESC_SUFFIX.len());
        let (name, direction) = match split {
            Some(at)
                if s.is_char_boundary(at) && s[at..].eq_ignore_ascii_case(DESC_SUFFIX) =>
            {
                (&s[..at], SortDirection::Descending)
            }
            _ => (s, SortDirection::Ascending),
        };
        let field = SortField::from_token(name)
            .ok_or_else(|| CatalogError::UnknownSortField(s.to_string()))?;
        Ok(SortKey { field, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field.token()),
            SortDirection::Descending => write!(f, "{}{}", self.field.token(), DESC_SUFFIX),
        }
    }
}

//! Filter/sort pipeline over the record sequence.

use super::collation::locale_compare;
use super::sort::SortKey;
use crate::record::Record;
use std::fmt;

pub const ALL_GENRES: &str = "all";

/// Exact-match genre predicate, or [`GenreFilter::All`] for no filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    All,
    Exact(String),
}

impl GenreFilter {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Exact(value.to_string())
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Exact(genre) => record.genre.as_deref() == Some(genre.as_str()),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str(ALL_GENRES),
            GenreFilter::Exact(genre) => f.write_str(genre),
        }
    }
}

/// Current search term, genre filter and sort key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    search_term: String,
    pub genre: GenreFilter,
    pub sort: Option<SortKey>,
}

impl Query {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Store the term trimmed and lowercased, ready for substring matching.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_lowercase();
    }

    pub fn with_search_term(mut self, term: &str) -> Self {
        self.set_search_term(term);
        self
    }

    pub fn with_genre(mut self, genre: GenreFilter) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches_search(&self, record: &Record) -> bool {
        self.search_term.is_empty()
            || record.artist.to_lowercase().contains(&self.search_term)
            || record.album.to_lowercase().contains(&self.search_term)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record) && self.genre.matches(record)
    }
}

/// Apply search, genre filter and sort to `records`, returning a new
/// sequence. The input order is kept when no sort is set; the sort is stable.
pub fn filter_and_sort<'a>(records: &'a [Record], query: &Query) -> Vec<&'a Record> {
    let mut result: Vec<&Record> = records.iter().filter(|r| query.matches(r)).collect();
    if let Some(sort) = &query.sort {
        result.sort_by(|a, b| sort.compare(a, b));
    }
    result
}

/// Distinct non-empty genres present in `records`, in ascending order.
pub fn distinct_genres(records: &[Record]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in records.iter().filter_map(|r| r.genre.as_deref()) {
        if !genre.is_empty() && !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    }
    genres.sort_by(|a, b| locale_compare(a, b));
    genres
}

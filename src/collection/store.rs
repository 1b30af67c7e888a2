//! The collection store.
//!
//! Owns the working record sequence and the current query. Presentation code
//! calls the query setters and mutations and renders [`CollectionStore::visible`];
//! the store never talks to a UI directly. Every mutation writes the whole
//! sequence to the override store right away.

use super::ids::IdGenerator;
use super::query::{distinct_genres, filter_and_sort, GenreFilter, Query};
use super::reconcile::{reconcile, LoadOrigin};
use super::sort::SortKey;
use super::stats::stats_text;
use crate::baseline::BaselineSource;
use crate::error::{CatalogError, CatalogResult};
use crate::override_store::OverrideStore;
use crate::record::{validate_fields, Record, RecordFields};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

/// Asked before a record is deleted.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    NotFound,
}

pub struct CollectionStore {
    records: Vec<Record>,
    query: Query,
    loading: bool,
    overrides: Box<dyn OverrideStore>,
    ids: Box<dyn IdGenerator>,
}

impl CollectionStore {
    /// A store that has not loaded anything yet.
    pub fn new(overrides: Box<dyn OverrideStore>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            records: Vec::new(),
            query: Query::default(),
            loading: true,
            overrides,
            ids,
        }
    }

    /// A loaded store working on `records`. Nothing is persisted until the
    /// first mutation.
    pub fn with_records(
        records: Vec<Record>,
        overrides: Box<dyn OverrideStore>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            records,
            query: Query::default(),
            loading: false,
            overrides,
            ids,
        }
    }

    /// Fetch the baseline, read the override and adopt whichever wins.
    /// Never fails: an unavailable baseline falls back to the override, or to
    /// an empty collection.
    pub async fn load(&mut self, source: &dyn BaselineSource) -> LoadOrigin {
        self.loading = true;
        info!("Loading records from {}...", source.describe());
        let baseline = source.fetch().await;
        let overrides = self.overrides.read();
        let (records, origin) = reconcile(baseline, overrides);
        self.records = records;
        self.loading = false;
        info!("Loaded {} records from {}", self.records.len(), origin);
        origin
    }

    /// Drop the local override and load the baseline again.
    pub async fn reset(&mut self, source: &dyn BaselineSource) -> CatalogResult<LoadOrigin> {
        self.overrides.clear()?;
        info!("Cleared local override at {}", self.overrides.describe());
        Ok(self.load(source).await)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Where mutations are persisted, for display.
    pub fn override_location(&self) -> String {
        self.overrides.describe()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The full working sequence in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.query.set_search_term(term);
        debug!("Search term set to {:?}", self.query.search_term());
    }

    pub fn set_genre_filter(&mut self, genre: GenreFilter) {
        debug!("Genre filter set to {}", genre);
        self.query.genre = genre;
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.query.sort = sort;
    }

    /// Set the sort from a token such as `year-desc`. Unknown fields leave
    /// the current sort in place.
    pub fn set_sort_token(&mut self, token: &str) -> CatalogResult<()> {
        let sort = SortKey::parse_token(token)?;
        debug!("Sort set to {:?}", sort);
        self.set_sort(sort);
        Ok(())
    }

    /// The filtered and sorted view of the collection.
    pub fn visible(&self) -> Vec<&Record> {
        filter_and_sort(&self.records, &self.query)
    }

    pub fn genres(&self) -> Vec<String> {
        distinct_genres(&self.records)
    }

    pub fn stats_text(&self) -> String {
        stats_text(self.records.len(), self.visible().len())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a new record at the front of the collection.
    pub fn add(&mut self, fields: RecordFields) -> CatalogResult<Record> {
        let fields = fields.normalized();
        validate_fields(&fields)?;

        let id = self.fresh_id();
        let date_added = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let record = Record::new(id, date_added, fields);
        debug!("Adding record {} ({} - {})", record.id, record.artist, record.album);
        self.records.insert(0, record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Overwrite the mutable fields of the record with `id`. Returns `false`
    /// and changes nothing when no such record exists.
    pub fn edit(&mut self, id: &str, fields: RecordFields) -> CatalogResult<bool> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            debug!("Edit of unknown record {} ignored", id);
            return Ok(false);
        };
        let fields = fields.normalized();
        validate_fields(&fields)?;

        self.records[index].apply(fields);
        debug!("Edited record {}", id);
        self.persist()?;
        Ok(true)
    }

    /// Remove the record with `id` once `confirm` agrees.
    pub fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> CatalogResult<DeleteOutcome> {
        let Some(record) = self.get(id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        let prompt = format!("Delete \"{}\" by {}?", record.album, record.artist);
        if !confirm.confirm(&prompt) {
            debug!("Deletion of record {} declined", id);
            return Ok(DeleteOutcome::Declined);
        }

        self.records.retain(|r| r.id != id);
        debug!("Deleted record {}", id);
        self.persist()?;
        Ok(DeleteOutcome::Deleted)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) -> CatalogResult<()> {
        self.overrides
            .write(&self.records)
            .map_err(CatalogError::Persist)?;
        debug!(
            "Persisted {} records to {}",
            self.records.len(),
            self.overrides.describe()
        );
        Ok(())
    }
}

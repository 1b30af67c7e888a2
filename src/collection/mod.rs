mod collation;
mod ids;
mod query;
mod reconcile;
mod sort;
mod stats;
mod store;

pub use collation::locale_compare;
pub use ids::{create_id_generator, IdGenerator, IdScheme, TimestampIdGenerator, UuidIdGenerator};
pub use query::{distinct_genres, filter_and_sort, GenreFilter, Query, ALL_GENRES};
pub use reconcile::{reconcile, select, LoadOrigin};
pub use sort::{SortDirection, SortField, SortKey};
pub use stats::stats_text;
pub use store::{CollectionStore, Confirm, DeleteOutcome};

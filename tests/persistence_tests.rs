//! Mutations persisted through the real override backends and read back by
//! a later session.

mod common;

use common::*;
use std::path::Path;
use vinyl_catalog::baseline::FileBaselineSource;
use vinyl_catalog::collection::{TimestampIdGenerator, UuidIdGenerator};
use vinyl_catalog::export::export_to_file;
use vinyl_catalog::override_store::{
    create_override_store, JsonFileOverrideStore, OverrideBackend, OverrideStoreError,
    OverrideStoreResult,
};
use vinyl_catalog::{
    CatalogError, CollectionStore, DeleteOutcome, Grade, LoadOrigin, OverrideStore, Record,
    RecordFields,
};

async fn open_session(
    baseline: &Path,
    backend: OverrideBackend,
    override_path: &Path,
) -> (CollectionStore, LoadOrigin) {
    let overrides = create_override_store(backend, override_path, OVERRIDE_KEY).unwrap();
    let mut store = CollectionStore::new(overrides, Box::new(TimestampIdGenerator::default()));
    let origin = store.load(&FileBaselineSource::new(baseline)).await;
    (store, origin)
}

fn yes(_: &str) -> bool {
    true
}

fn no(_: &str) -> bool {
    false
}

#[tokio::test]
async fn test_added_record_survives_restart_with_json_file() {
    let (dir, baseline) = create_baseline_file();
    let override_path = dir.path().join("vinyl_records.json");

    let (mut store, origin) =
        open_session(&baseline, OverrideBackend::File, &override_path).await;
    assert_eq!(origin, LoadOrigin::Baseline);
    let added = store
        .add(
            RecordFields::new("Nick Drake", "Pink Moon")
                .with_year(1972)
                .with_genre("Folk"),
        )
        .unwrap();
    drop(store);

    let (store, origin) = open_session(&baseline, OverrideBackend::File, &override_path).await;
    assert_eq!(origin, LoadOrigin::Override);
    assert_eq!(store.len(), BASELINE_RECORD_COUNT + 1);
    assert_eq!(store.records()[0], added);

    let dump: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&override_path).unwrap()).unwrap();
    assert_eq!(
        dump[OVERRIDE_KEY].as_array().unwrap().len(),
        BASELINE_RECORD_COUNT + 1
    );
}

#[tokio::test]
async fn test_edit_survives_restart_with_sqlite() {
    let (dir, baseline) = create_baseline_file();
    let override_path = dir.path().join("vinyl_records.db");

    let (mut store, _) = open_session(&baseline, OverrideBackend::Sqlite, &override_path).await;
    let mut fields = store.get(DUMMY_ID).unwrap().fields();
    fields.condition = Grade::Good.into();
    fields.notes = Some("Small scratch on side B".to_string());
    assert!(store.edit(DUMMY_ID, fields).unwrap());
    drop(store);

    let (store, origin) = open_session(&baseline, OverrideBackend::Sqlite, &override_path).await;
    assert_eq!(origin, LoadOrigin::Override);
    let dummy = store.get(DUMMY_ID).unwrap();
    assert_eq!(dummy.condition.as_str(), "good");
    assert_eq!(dummy.notes.as_deref(), Some("Small scratch on side B"));
    assert_eq!(dummy.date_added, "2023-04-13T18:45:00.000Z");
}

#[tokio::test]
async fn test_read_only_operations_persist_nothing() {
    let (dir, baseline) = create_baseline_file();
    let override_path = dir.path().join("vinyl_records.json");

    let (mut store, _) = open_session(&baseline, OverrideBackend::File, &override_path).await;
    store.set_search_term("blue");
    store.set_sort_token("year-desc").unwrap();
    assert!(!store
        .edit("no-such-id", RecordFields::new("A", "B"))
        .unwrap());
    assert_eq!(
        store.delete(DUMMY_ID, &no).unwrap(),
        DeleteOutcome::Declined
    );
    assert_eq!(
        store.delete("no-such-id", &yes).unwrap(),
        DeleteOutcome::NotFound
    );

    assert!(!override_path.exists());
}

#[tokio::test]
async fn test_confirmed_delete_persists() {
    let (dir, baseline) = create_baseline_file();
    let override_path = dir.path().join("vinyl_records.json");

    let (mut store, _) = open_session(&baseline, OverrideBackend::File, &override_path).await;
    assert_eq!(
        store.delete(RUMOURS_ID, &yes).unwrap(),
        DeleteOutcome::Deleted
    );

    let persisted = JsonFileOverrideStore::new(&override_path, OVERRIDE_KEY)
        .read()
        .unwrap()
        .unwrap();
    assert_eq!(persisted, store.records());
    assert!(persisted.iter().all(|r| r.id != RUMOURS_ID));
}

const ANNOTATED_BASELINE_JSON: &str = r#"[
  {
    "id": "1",
    "artist": "Can",
    "album": "Tago Mago",
    "year": 1971,
    "condition": "VG+",
    "label": "United Artists",
    "format": "2xLP",
    "dateAdded": "2023-02-01T10:00:00.000Z"
  }
]"#;

#[tokio::test]
async fn test_saving_keeps_unknown_keys_and_condition_text() {
    let (dir, _) = create_baseline_file();
    let baseline = dir.path().join("annotated.json");
    std::fs::write(&baseline, ANNOTATED_BASELINE_JSON).unwrap();
    let override_path = dir.path().join("vinyl_records.json");

    let (mut store, _) = open_session(&baseline, OverrideBackend::File, &override_path).await;
    store
        .add(RecordFields::new("Neu!", "Neu! 75"))
        .unwrap();
    drop(store);

    let raw = std::fs::read_to_string(&override_path).unwrap();
    assert!(raw.contains("United Artists"));
    assert!(raw.contains("\"VG+\""));

    let (store, origin) = open_session(&baseline, OverrideBackend::File, &override_path).await;
    assert_eq!(origin, LoadOrigin::Override);
    let tago = store.get("1").unwrap();
    assert_eq!(tago.condition.as_str(), "VG+");
    assert_eq!(tago.condition.grade(), Some(Grade::VeryGoodPlus));
    assert_eq!(tago.extra["label"], "United Artists");
    assert_eq!(tago.extra["format"], "2xLP");

    let export_path = dir.path().join("export.json");
    export_to_file(store.records(), &export_path).unwrap();
    let exported = std::fs::read_to_string(&export_path).unwrap();
    assert!(exported.contains("\"label\": \"United Artists\""));
}

#[tokio::test]
async fn test_deleting_everything_restores_baseline_next_time() {
    let (dir, baseline) = create_baseline_file();
    let override_path = dir.path().join("vinyl_records.json");

    let (mut store, _) = open_session(&baseline, OverrideBackend::File, &override_path).await;
    let all_ids: Vec<String> = store.records().iter().map(|r| r.id.clone()).collect();
    for id in &all_ids {
        store.delete(id, &yes).unwrap();
    }
    assert!(store.is_empty());
    drop(store);

    // An empty override does not take precedence.
    let (store, origin) = open_session(&baseline, OverrideBackend::File, &override_path).await;
    assert_eq!(origin, LoadOrigin::Baseline);
    assert_eq!(store.len(), BASELINE_RECORD_COUNT);
}

#[tokio::test]
async fn test_reset_drops_local_changes() {
    let (dir, baseline) = create_baseline_file();
    let override_path = dir.path().join("vinyl_records.db");

    let (mut store, _) = open_session(&baseline, OverrideBackend::Sqlite, &override_path).await;
    store.delete(KIND_OF_BLUE_ID, &yes).unwrap();
    assert_eq!(store.len(), BASELINE_RECORD_COUNT - 1);

    let origin = store
        .reset(&FileBaselineSource::new(&baseline))
        .await
        .unwrap();
    assert_eq!(origin, LoadOrigin::Baseline);
    assert_eq!(store.len(), BASELINE_RECORD_COUNT);
    drop(store);

    let (_, origin) = open_session(&baseline, OverrideBackend::Sqlite, &override_path).await;
    assert_eq!(origin, LoadOrigin::Baseline);
}

#[tokio::test]
async fn test_export_can_seed_a_new_collection() {
    let (dir, baseline) = create_baseline_file();
    let (mut store, _) = open_session(
        &baseline,
        OverrideBackend::Memory,
        &dir.path().join("unused"),
    )
    .await;
    store
        .add(RecordFields::new("Talk Talk", "Spirit of Eden").with_year(1988))
        .unwrap();

    let export_path = dir.path().join("export.json");
    export_to_file(store.records(), &export_path).unwrap();

    let (reloaded, origin) = open_session(
        &export_path,
        OverrideBackend::Memory,
        &dir.path().join("unused"),
    )
    .await;
    assert_eq!(origin, LoadOrigin::Baseline);
    assert_eq!(reloaded.records(), store.records());
}

#[tokio::test]
async fn test_uuid_ids() {
    let (_dir, baseline) = create_baseline_file();
    let mut store = CollectionStore::new(
        create_override_store(OverrideBackend::Memory, Path::new(""), OVERRIDE_KEY).unwrap(),
        Box::new(UuidIdGenerator),
    );
    store.load(&FileBaselineSource::new(&baseline)).await;

    let a = store.add(RecordFields::new("Can", "Ege Bamyasi")).unwrap();
    let b = store.add(RecordFields::new("Can", "Future Days")).unwrap();
    assert_eq!(a.id.len(), 36);
    assert_ne!(a.id, b.id);
}

/// Accepts reads, refuses every write.
struct ReadOnlyStore;

impl OverrideStore for ReadOnlyStore {
    fn read(&self) -> OverrideStoreResult<Option<Vec<Record>>> {
        Ok(None)
    }

    fn write(&self, _records: &[Record]) -> OverrideStoreResult<()> {
        Err(OverrideStoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }

    fn clear(&self) -> OverrideStoreResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "read-only".to_string()
    }
}

#[tokio::test]
async fn test_persist_failure_is_reported_and_change_kept() {
    let (_dir, baseline) = create_baseline_file();
    let mut store = CollectionStore::new(
        Box::new(ReadOnlyStore),
        Box::new(TimestampIdGenerator::default()),
    );
    store.load(&FileBaselineSource::new(&baseline)).await;

    let err = store
        .add(RecordFields::new("Slint", "Spiderland"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::Persist(_)));
    assert_eq!(store.len(), BASELINE_RECORD_COUNT + 1);
    assert_eq!(store.records()[0].album, "Spiderland");
}

mod common;
use chrono::NaiveDate;
use common::png;
use rtimeline::core::add::AddLogic;
use rtimeline::core::session::Session;
use rtimeline::db::kv::SqliteKv;
use rtimeline::db::pool::DbPool;
use rtimeline::core::store::EventStore;
use rtimeline::errors::{AppError, AppResult, ErrorKind};
use rtimeline::models::event::{Event, EventId};
use rtimeline::models::view_mode::ViewMode;
use rtimeline::persist::snapshot::{EVENTS_KEY, SETTINGS_KEY};
use rtimeline::persist::{KeyValueStore, MemoryKv, PartStatus, SavePointRepo, SnapshotGateway};
use std::cell::Cell;
use std::fs;
use std::time::Duration;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn session_with_image() -> Session {
    let today = d(2024, 12, 31);
    let mut s = Session::new(ViewMode::Domino);
    AddLogic::apply(&mut s, "Plain", d(2012, 2, 2), None, today).unwrap();
    AddLogic::apply(&mut s, "Pictured", d(2011, 1, 1), Some(png()), today).unwrap();
    s.settings.set("timeline_title", "My history").unwrap();
    s.settings.set("lens_duration", "1.5").unwrap();
    s
}

// ---------------------------------------------------------------
// Ephemeral snapshot
// ---------------------------------------------------------------

#[test]
fn test_snapshot_roundtrip_in_memory() {
    let session = session_with_image();
    let mut gw = SnapshotGateway::new(MemoryKv::new());
    gw.save(&session).unwrap();

    let restored = gw.load(ViewMode::Timeline).unwrap();
    assert_eq!(restored.events, PartStatus::Restored);
    assert_eq!(restored.settings, PartStatus::Restored);
    assert_eq!(restored.session, session);
}

#[test]
fn test_snapshot_save_is_deterministic() {
    let session = session_with_image();
    let mut gw = SnapshotGateway::new(MemoryKv::new());
    gw.save(&session).unwrap();
    let first = gw.kv().get(EVENTS_KEY).unwrap();
    gw.save(&session).unwrap();
    assert_eq!(gw.kv().get(EVENTS_KEY).unwrap(), first);
}

#[test]
fn test_empty_snapshot_gives_fresh_session() {
    let gw = SnapshotGateway::new(MemoryKv::new());
    let restored = gw.load(ViewMode::Domino).unwrap();
    assert!(restored.is_empty());
    assert!(restored.session.store.is_empty());
    assert_eq!(restored.session.settings.timeline_view, ViewMode::Domino);
}

#[test]
fn test_corrupt_half_does_not_spoil_the_other() {
    let session = session_with_image();
    let mut kv = MemoryKv::new();
    {
        let mut gw = SnapshotGateway::new(&mut kv);
        gw.save(&session).unwrap();
    }
    kv.set(SETTINGS_KEY, "{ not json").unwrap();

    let gw = SnapshotGateway::new(kv);
    let restored = gw.load(ViewMode::Domino).unwrap();
    assert_eq!(restored.events, PartStatus::Restored);
    assert_eq!(restored.settings, PartStatus::Corrupt);
    assert_eq!(restored.session.store.len(), 2);
    assert_eq!(restored.session.settings.timeline_view, ViewMode::Domino);

    let mut kv = gw.into_inner();
    kv.set(EVENTS_KEY, "[{\"id\": 3}]").unwrap();
    kv.set(SETTINGS_KEY, "{\"timeline_view\": \"orbit\"}").unwrap();
    let restored = SnapshotGateway::new(kv).load(ViewMode::Timeline).unwrap();
    assert_eq!(restored.events, PartStatus::Corrupt);
    assert!(restored.session.store.is_empty());
    assert_eq!(restored.settings, PartStatus::Restored);
    assert_eq!(restored.session.settings.timeline_view, ViewMode::Domino);
    assert_eq!(restored.session.settings.lens_size, 240);
}

#[test]
fn test_unknown_or_missing_view_falls_back_to_timeline() {
    let mut kv = MemoryKv::new();
    kv.set(SETTINGS_KEY, "{\"timeline_view\": \"carousel\"}").unwrap();
    let restored = SnapshotGateway::new(kv).load(ViewMode::Domino).unwrap();
    assert_eq!(restored.session.settings.timeline_view, ViewMode::Timeline);

    let mut kv = MemoryKv::new();
    kv.set(SETTINGS_KEY, "{}").unwrap();
    let restored = SnapshotGateway::new(kv).load(ViewMode::Domino).unwrap();
    assert_eq!(restored.session.settings.timeline_view, ViewMode::Timeline);
}

#[test]
fn test_snapshot_in_sqlite_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("kv.sqlite").to_string_lossy().to_string();
    let session = session_with_image();

    {
        let pool = DbPool::new(&db).unwrap();
        let mut gw = SnapshotGateway::new(SqliteKv::new(&pool));
        gw.save(&session).unwrap();
    }

    let pool = DbPool::new(&db).unwrap();
    let mut gw = SnapshotGateway::new(SqliteKv::new(&pool));
    assert_eq!(gw.load(ViewMode::Timeline).unwrap().session, session);

    gw.clear().unwrap();
    assert!(gw.load(ViewMode::Timeline).unwrap().is_empty());
}

/// Fails the first `failures` reads, then behaves like `MemoryKv`.
struct FlakyKv {
    inner: MemoryKv,
    failures: Cell<u32>,
}

impl FlakyKv {
    fn new(inner: MemoryKv, failures: u32) -> Self {
        Self {
            inner,
            failures: Cell::new(failures),
        }
    }
}

impl KeyValueStore for FlakyKv {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let left = self.failures.get();
        if left > 0 {
            self.failures.set(left - 1);
            return Err(AppError::Other("storage busy".into()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.inner.remove(key)
    }
}

#[test]
fn test_load_with_retry_recovers_from_one_failed_read() {
    let session = session_with_image();
    let mut kv = MemoryKv::new();
    SnapshotGateway::new(&mut kv).save(&session).unwrap();

    let gw = SnapshotGateway::new(FlakyKv::new(kv.clone(), 1));
    assert!(gw.load(ViewMode::Domino).is_err());
    assert_eq!(gw.load(ViewMode::Domino).unwrap().session, session);

    let gw = SnapshotGateway::new(FlakyKv::new(kv, 1));
    let restored = gw
        .load_with_retry(ViewMode::Domino, Duration::from_millis(1))
        .unwrap();
    assert_eq!(restored.events, PartStatus::Restored);
    assert_eq!(restored.session, session);
}

#[test]
fn test_load_with_retry_gives_up_after_second_failure() {
    let gw = SnapshotGateway::new(FlakyKv::new(MemoryKv::new(), 2));
    assert!(matches!(
        gw.load_with_retry(ViewMode::Domino, Duration::from_millis(1)),
        Err(AppError::Other(_))
    ));
}

// ---------------------------------------------------------------
// Named save points
// ---------------------------------------------------------------

#[test]
fn test_save_point_roundtrip_is_exact_and_listed() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    let session = session_with_image();

    let handle = repo.create("milestone", &session).unwrap();
    assert_eq!(handle.images.len(), 1);
    assert!(handle.images[0].starts_with(repo.images_dir("milestone")));

    // The document references the image instead of embedding it.
    let doc = fs::read_to_string(&handle.path).unwrap();
    assert!(doc.contains("\"image_file\""));
    assert!(!doc.contains(&png().to_base64()));

    let loaded = repo.load("milestone").unwrap();
    assert_eq!(loaded, session);

    let list = repo.list().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "milestone");
    assert_eq!(list[0].event_count, 2);
}

#[test]
fn test_missing_image_only_drops_that_image() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    let handle = repo.create("partial", &session_with_image()).unwrap();
    fs::remove_file(&handle.images[0]).unwrap();

    let loaded = repo.load("partial").unwrap();
    assert_eq!(loaded.store.len(), 2);
    assert!(loaded.store.all().iter().all(|e| e.image.is_none()));
    assert_eq!(loaded.settings.timeline_title, "My history");
}

#[test]
fn test_corrupt_save_point_is_skipped_in_listing() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    repo.create("good", &session_with_image()).unwrap();
    fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let names: Vec<String> = repo.list().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["good"]);

    let err = repo.load("broken").unwrap_err();
    assert!(matches!(err, AppError::CorruptSavePoint { .. }));
    assert_eq!(err.kind(), ErrorKind::Corrupt);
}

#[test]
fn test_listing_is_newest_first_with_unknown_dates_last() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    let doc = |name: &str, created: Option<&str>| {
        let created = created
            .map(|c| format!(",\"created_at\":\"{c}\""))
            .unwrap_or_default();
        format!("{{\"save_info\":{{\"name\":\"{name}\"{created}}},\"events\":[]}}")
    };
    fs::write(dir.path().join("old.json"), doc("old", Some("2020-01-01T00:00:00+00:00"))).unwrap();
    fs::write(dir.path().join("new.json"), doc("new", Some("2024-01-01T00:00:00+00:00"))).unwrap();
    fs::write(dir.path().join("legacy.json"), doc("legacy", None)).unwrap();

    let list = repo.list().unwrap();
    let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["new", "old", "legacy"]);
    assert_eq!(list[2].created_at, "Unknown");
}

#[test]
fn test_load_and_delete_of_unknown_save_point() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());

    let err = repo.load("ghost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(repo.delete("ghost").unwrap().is_empty());
}

#[test]
fn test_delete_removes_document_and_images() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    repo.create("gone", &session_with_image()).unwrap();

    let removed = repo.delete("gone").unwrap();
    assert_eq!(removed.len(), 3);
    assert!(!repo.document_path("gone").exists());
    assert!(!repo.images_dir("gone").exists());
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn test_save_point_names_must_be_plain() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    let session = Session::default();
    for bad in ["", "  ", "../escape", "a/b", "a\\b"] {
        assert!(matches!(
            repo.create(bad, &session),
            Err(AppError::InvalidSavePointName(_))
        ));
    }
}

#[test]
fn test_recreating_a_save_point_replaces_old_images() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    repo.create("same", &session_with_image()).unwrap();
    repo.create("same", &Session::default()).unwrap();

    assert!(!repo.images_dir("same").exists());
    assert!(repo.load("same").unwrap().store.is_empty());
}

fn session_with_long_id() -> Session {
    let mut events = session_with_image().store.all().to_vec();
    events.push(Event {
        id: EventId::from("x".repeat(300)),
        title: "Long id".into(),
        date: d(2015, 5, 5),
        image: Some(png()),
    });
    Session::with_parts(EventStore::from_events(events).unwrap(), Default::default())
}

#[test]
fn test_long_event_ids_get_short_image_names() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    let handle = repo.create("long", &session_with_long_id()).unwrap();

    assert_eq!(handle.images.len(), 2);
    for p in &handle.images {
        assert!(p.file_name().unwrap().len() < 100);
    }
    let loaded = repo.load("long").unwrap();
    let long = loaded.store.get(&EventId::from("x".repeat(300))).unwrap();
    assert_eq!(long.image, Some(png()));
}

#[test]
fn test_failed_recreate_keeps_previous_save_point() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SavePointRepo::new(dir.path());
    let original = session_with_image();
    repo.create("X", &original).unwrap();

    // A directory squatting on the staged document name makes the write fail.
    fs::create_dir(dir.path().join("X.json.tmp")).unwrap();
    let err = repo.create("X", &session_with_long_id()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    assert!(!dir.path().join("X_images.tmp").exists());
    let loaded = repo.load("X").unwrap();
    assert_eq!(loaded, original);
    assert!(loaded.store.all().iter().any(|e| e.image == Some(png())));

    fs::remove_dir(dir.path().join("X.json.tmp")).unwrap();
    repo.create("X", &session_with_long_id()).unwrap();
    assert_eq!(repo.load("X").unwrap().store.len(), 3);
    assert!(!dir.path().join("X_images.old").exists());
}

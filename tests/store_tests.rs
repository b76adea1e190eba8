mod common;
use chrono::NaiveDate;
use common::png;
use rtimeline::core::add::AddLogic;
use rtimeline::core::del::DeleteLogic;
use rtimeline::core::edit::{EditLogic, EditRequest, ImageChange};
use rtimeline::core::session::Session;
use rtimeline::core::settings::SettingsLogic;
use rtimeline::core::store::EventStore;
use rtimeline::core::validate::MIN_DATE;
use rtimeline::errors::{AppError, ErrorKind};
use rtimeline::models::event::{Event, EventId};
use rtimeline::models::view_mode::ViewMode;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate {
    d(2024, 6, 30)
}

#[test]
fn test_add_then_list_returns_the_event() {
    let mut s = Session::new(ViewMode::Domino);
    let id = AddLogic::apply(&mut s, "Launch", d(2020, 1, 1), None, today()).unwrap();

    let list = s.store.list_sorted();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, id);
    assert_eq!(list[0].title, "Launch");
    assert_eq!(list[0].date, d(2020, 1, 1));
    assert!(list[0].image.is_none());
}

#[test]
fn test_title_is_trimmed_and_blank_title_rejected() {
    let mut s = Session::default();
    AddLogic::apply(&mut s, "  Padded  ", d(2020, 1, 1), None, today()).unwrap();
    assert_eq!(s.store.all()[0].title, "Padded");

    let err = AddLogic::apply(&mut s, "   ", d(2020, 1, 1), None, today()).unwrap_err();
    assert!(matches!(err, AppError::EmptyTitle));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(s.store.len(), 1);
}

#[test]
fn test_manual_dates_are_bounded_by_min_date_and_today() {
    let mut s = Session::default();
    assert!(AddLogic::apply(&mut s, "min", MIN_DATE, None, today()).is_ok());
    assert!(AddLogic::apply(&mut s, "today", today(), None, today()).is_ok());

    let before = AddLogic::apply(&mut s, "old", d(2001, 12, 31), None, today()).unwrap_err();
    assert!(matches!(before, AppError::DateOutOfRange { .. }));
    let after = AddLogic::apply(&mut s, "future", d(2024, 7, 1), None, today()).unwrap_err();
    assert!(matches!(after, AppError::DateOutOfRange { .. }));
    assert_eq!(s.store.len(), 2);
}

#[test]
fn test_manual_add_does_not_deduplicate() {
    let mut s = Session::default();
    AddLogic::apply(&mut s, "Same", d(2020, 1, 1), None, today()).unwrap();
    AddLogic::apply(&mut s, "Same", d(2020, 1, 1), None, today()).unwrap();
    assert_eq!(s.store.len(), 2);
    assert_ne!(s.store.all()[0].id, s.store.all()[1].id);
}

#[test]
fn test_list_is_sorted_and_stable_for_equal_dates() {
    let mut s = Session::default();
    AddLogic::apply(&mut s, "b-first", d(2020, 5, 5), None, today()).unwrap();
    AddLogic::apply(&mut s, "a", d(2010, 1, 1), None, today()).unwrap();
    AddLogic::apply(&mut s, "b-second", d(2020, 5, 5), None, today()).unwrap();
    AddLogic::apply(&mut s, "c", d(2023, 3, 3), None, today()).unwrap();

    let titles: Vec<&str> = s.store.list_sorted().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["a", "b-first", "b-second", "c"]);

    // Listing does not reorder the store itself.
    assert_eq!(s.store.all()[0].title, "b-first");
}

#[test]
fn test_edit_merges_fields_and_revalidates() {
    let mut s = Session::default();
    let id = AddLogic::apply(&mut s, "Old", d(2020, 1, 1), Some(png()), today()).unwrap();

    let req = EditRequest {
        title: Some("New".into()),
        ..EditRequest::default()
    };
    EditLogic::apply(&mut s, &id, req, today()).unwrap();
    let ev = s.store.get(&id).unwrap();
    assert_eq!(ev.title, "New");
    assert_eq!(ev.date, d(2020, 1, 1));
    assert!(ev.image.is_some());

    let bad = EditRequest {
        title: Some(" ".into()),
        date: Some(d(2000, 1, 1)),
        image: ImageChange::Remove,
    };
    assert!(EditLogic::apply(&mut s, &id, bad, today()).is_err());
    assert_eq!(s.store.get(&id).unwrap().title, "New");
    assert!(s.store.get(&id).unwrap().image.is_some());

    let remove = EditRequest {
        image: ImageChange::Remove,
        ..EditRequest::default()
    };
    EditLogic::apply(&mut s, &id, remove, today()).unwrap();
    assert!(s.store.get(&id).unwrap().image.is_none());
}

#[test]
fn test_edit_and_delete_unknown_id() {
    let mut s = Session::default();
    let ghost = EventId::from("does-not-exist");
    let err = EditLogic::apply(&mut s, &ghost, EditRequest::default(), today()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = DeleteLogic::apply(&mut s, &ghost).unwrap_err();
    assert!(matches!(err, AppError::EventNotFound(_)));
}

#[test]
fn test_delete_removes_only_that_event() {
    let mut s = Session::default();
    let keep = AddLogic::apply(&mut s, "keep", d(2020, 1, 1), None, today()).unwrap();
    let gone = AddLogic::apply(&mut s, "gone", d(2021, 1, 1), None, today()).unwrap();

    let removed = DeleteLogic::apply(&mut s, &gone).unwrap();
    assert_eq!(removed.title, "gone");
    assert_eq!(s.store.len(), 1);
    assert!(s.store.get(&keep).is_some());
}

#[test]
fn test_resolve_by_unique_prefix() {
    let a = Event {
        id: EventId::from("abcd1111"),
        title: "a".into(),
        date: d(2020, 1, 1),
        image: None,
    };
    let b = Event {
        id: EventId::from("abcd2222"),
        title: "b".into(),
        date: d(2020, 1, 2),
        image: None,
    };
    let store = EventStore::from_events(vec![a, b]).unwrap();

    assert_eq!(store.resolve("abcd1").unwrap().title, "a");
    assert_eq!(store.resolve("abcd2222").unwrap().title, "b");
    assert!(matches!(store.resolve("abcd"), Err(AppError::AmbiguousEventId(_))));
    assert!(matches!(store.resolve("abc"), Err(AppError::EventNotFound(_))));
    assert!(matches!(store.resolve("zzzz"), Err(AppError::EventNotFound(_))));
}

#[test]
fn test_duplicate_ids_are_corrupt() {
    let ev = Event::new("x", d(2020, 1, 1), None);
    let err = EventStore::from_events(vec![ev.clone(), ev]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corrupt);
}

#[test]
fn test_settings_are_all_or_nothing() {
    let mut s = Session::new(ViewMode::Domino);
    let pairs = vec![
        ("lens_size".to_string(), "300".to_string()),
        ("event_title_size".to_string(), "99".to_string()),
    ];
    let err = SettingsLogic::apply(&mut s, &pairs).unwrap_err();
    assert!(matches!(err, AppError::InvalidSetting(_)));
    assert_eq!(s.settings.lens_size, 240);

    let ok = vec![
        ("lens_size".to_string(), "400".to_string()),
        ("timeline_view".to_string(), "timeline".to_string()),
        ("timeline_bg_color".to_string(), "#ABCDEF".to_string()),
    ];
    SettingsLogic::apply(&mut s, &ok).unwrap();
    assert_eq!(s.settings.lens_size, 400);
    assert_eq!(s.settings.timeline_view, ViewMode::Timeline);
    assert_eq!(s.settings.timeline_bg_color, "#abcdef");

    SettingsLogic::reset(&mut s, ViewMode::Domino);
    assert_eq!(s.settings.timeline_view, ViewMode::Domino);
}

#![forbid(unsafe_code)]
use lawslot::{
    bookable_slots, has_override_conflict, has_weekly_overlap, io, AvailabilityBook,
    ConflictResult, DateOverride, DayOfWeek, JsonStorage, LawyerId, OverrideDraft, SlotOptions,
    Storage, TimeOfDay, ValidationError, WeeklyCandidate, WeeklyDraft, WeeklySlot,
};
use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn weekly_candidate_spanning_existing_conflicts() {
    let monday_like = DayOfWeek::new(1).unwrap();
    let existing = vec![WeeklySlot::new(monday_like, t("10:00"), t("11:00")).unwrap()];
    let candidate = WeeklyCandidate {
        day_of_week: monday_like,
        start: t("09:00"),
        end: t("12:00"),
    };
    assert!(has_weekly_overlap(&existing, &candidate));
}

#[test]
fn override_properties() {
    let existing =
        vec![DateOverride::timed(june_first(), t("09:00"), t("10:00"), None).unwrap()];

    let all_day = DateOverride::all_day(june_first(), None);
    assert_eq!(has_override_conflict(&existing, &all_day), ConflictResult::AllDay);

    let overlap = DateOverride::timed(june_first(), t("09:30"), t("10:30"), None).unwrap();
    assert_eq!(has_override_conflict(&existing, &overlap), ConflictResult::Overlap);

    let after = DateOverride::timed(june_first(), t("10:00"), t("11:00"), None).unwrap();
    assert_eq!(has_override_conflict(&existing, &after), ConflictResult::Clear);
}

#[test]
fn storage_roundtrip_keeps_book() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(dir.path().join("availability.json"));

    let mut book = AvailabilityBook::new(LawyerId::new("maitre-dupont"));
    book.propose_weekly(&WeeklyDraft {
        day_of_week: DayOfWeek::new(0).unwrap(),
        start: Some(t("09:00")),
        end: Some(t("12:00")),
    })
    .unwrap();
    book.propose_override(
        &OverrideDraft {
            date: Some(june_first()),
            is_all_day: true,
            description: Some("Vacances".into()),
            ..OverrideDraft::default()
        },
        june_first(),
    )
    .unwrap();
    storage.save(book.availability()).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.lawyer.as_str(), "maitre-dupont");
    assert_eq!(loaded.weekly, book.availability().weekly);
    assert_eq!(loaded.overrides, book.availability().overrides);

    let raw = fs::read_to_string(storage.path()).unwrap();
    assert!(raw.contains("\"start\": \"09:00\""));
}

#[test]
fn csv_import_goes_through_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("weekly.csv");
    fs::write(
        &path,
        "day_of_week,start,end\n1,09:00,12:00\n1,13:00,14:00\n1,10:00,11:00\n",
    )
    .unwrap();

    let drafts = io::import_weekly_csv(&path).unwrap();
    assert_eq!(drafts.len(), 3);

    let mut book = AvailabilityBook::new(LawyerId::new("l"));
    assert!(book.propose_weekly(&drafts[0]).is_ok());
    assert!(book.propose_weekly(&drafts[1]).is_ok());
    assert!(matches!(
        book.propose_weekly(&drafts[2]),
        Err(ValidationError::WeeklyOverlap { .. })
    ));
}

#[test]
fn csv_override_import_parses_optional_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("overrides.csv");
    fs::write(
        &path,
        "date,is_all_day,start,end,description\n2024-06-01,oui,,,Congé\n2024-06-02,false,09:00,10:00,\n,false,,,\n",
    )
    .unwrap();

    let drafts = io::import_overrides_csv(&path).unwrap();
    assert_eq!(drafts.len(), 3);
    assert!(drafts[0].is_all_day);
    assert_eq!(drafts[0].description.as_deref(), Some("Congé"));
    assert_eq!(drafts[1].start, Some(t("09:00")));
    assert_eq!(drafts[1].description, None);
    assert_eq!(drafts[2].date, None);
}

#[test]
fn csv_import_rejects_bad_day() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("weekly.csv");
    fs::write(&path, "day_of_week,start,end\n9,09:00,10:00\n").unwrap();
    let err = io::import_weekly_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("row 2"));
}

#[test]
fn export_bookable_slots_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slots.csv");

    let mut book = AvailabilityBook::new(LawyerId::new("l"));
    book.propose_weekly(&WeeklyDraft {
        day_of_week: DayOfWeek::new(0).unwrap(),
        start: Some(t("09:00")),
        end: Some(t("10:00")),
    })
    .unwrap();
    let now = june_first().and_hms_opt(8, 0, 0).unwrap();
    let slots = bookable_slots(book.availability(), now, SlotOptions::default());
    io::export_slots_csv(&path, &slots).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "start,end\n2024-06-03T09:00,2024-06-03T10:00\n"
    );
}

#[test]
fn export_no_slots_writes_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slots.csv");
    io::export_slots_csv(&path, &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "start,end\n");
}

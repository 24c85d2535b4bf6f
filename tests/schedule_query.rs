mod support;

use support::{temp_dir, SheetBuilder};
use timetabled::assemble::assemble_all;
use timetabled::ingest::store_schedules;
use timetabled::layout::{DayOfWeek, GridLayout, TimeSlot, WeekParity};
use timetabled::lookup::{lookup_to_file, render_lookup};
use timetabled::model::TeacherSchedule;
use timetabled::query::{aggregate, group_filter, query, room_filter};
use timetabled::store::{MemoryStore, ScheduleStore};
use timetabled::TimetableError;

fn seeded_store() -> MemoryStore {
    let mut sheet = SheetBuilder::new();
    let ivanov = sheet.teacher("Иванов И.И.");
    let petrov = sheet.teacher("Петров П.П.");
    sheet
        .class(ivanov, DayOfWeek::Wednesday, TimeSlot::First, WeekParity::Even, "22з а.1-103", "Алгебра")
        .class(ivanov, DayOfWeek::Monday, TimeSlot::Third, WeekParity::Odd, "22з;21а а.1-103", "Алгебра")
        .class(ivanov, DayOfWeek::Monday, TimeSlot::First, WeekParity::Odd, "23в а.2-201", "Геометрия");
    // Same class listed under a second teacher: kept once.
    sheet
        .class(petrov, DayOfWeek::Monday, TimeSlot::Third, WeekParity::Odd, "22з;21а а.1-103", "Алгебра")
        .class(petrov, DayOfWeek::Monday, TimeSlot::Second, WeekParity::Odd, "24б а.3-305", "Физика");

    let mut store = MemoryStore::new();
    store_schedules(&mut store, assemble_all(&sheet.grid(), &GridLayout::default()))
        .expect("seed store");
    store
}

#[test]
fn group_query_matches_substring_and_dedupes() {
    let store = seeded_store();
    let entries = query(&store, group_filter("22з"), "группы 22з").expect("entries");

    let summary: Vec<(WeekParity, DayOfWeek, TimeSlot, &str, &str)> = entries
        .iter()
        .map(|e| (e.week_parity, e.day_of_week, e.time, e.subject.as_str(), e.teacher.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (WeekParity::Odd, DayOfWeek::Monday, TimeSlot::Third, "Алгебра", "Иванов И.И."),
            (WeekParity::Even, DayOfWeek::Wednesday, TimeSlot::First, "Алгебра", "Иванов И.И."),
        ]
    );
}

#[test]
fn room_query_is_exact() {
    let store = seeded_store();
    let entries = query(&store, room_filter("1-103"), "аудитории 1-103").expect("entries");
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.classroom == "1-103"));
    assert!(entries.windows(2).all(|w| {
        (w[0].week_parity, w[0].day_of_week, w[0].time) <= (w[1].week_parity, w[1].day_of_week, w[1].time)
    }));
}

#[test]
fn empty_result_is_reported() {
    let store = seeded_store();
    match query(&store, group_filter("99я"), "группы 99я") {
        Err(TimetableError::EmptyResult { title }) => assert_eq!(title, "группы 99я"),
        other => panic!("expected empty result, got {other:?}"),
    }
}

#[test]
fn aggregate_over_nothing_is_empty() {
    let none: Vec<TeacherSchedule> = Vec::new();
    assert!(aggregate(&none, |_| true).is_empty());
}

#[test]
fn entries_carry_owning_teacher() {
    let store = seeded_store();
    let all = store.find_all().expect("all");
    let entries = aggregate(&all, |e| e.subject == "Физика");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].teacher, "Петров П.П.");
    assert_eq!(entries[0].classroom, "3-305");
}

#[test]
fn single_class_end_to_end() {
    let mut sheet = SheetBuilder::new();
    let a = sheet.teacher("Иванов И.И.");
    sheet.class(a, DayOfWeek::Monday, TimeSlot::First, WeekParity::Odd, "22з а.1-103", "Алгебра");
    let mut store = MemoryStore::new();
    store_schedules(&mut store, assemble_all(&sheet.grid(), &GridLayout::default())).expect("seed");

    let entries = query(&store, group_filter("22з"), "группы 22з").expect("entries");
    assert_eq!(entries.len(), 1);
    let e = &entries[0];
    assert_eq!(e.teacher, "Иванов И.И.");
    assert_eq!(e.classroom, "1-103");
    assert_eq!(e.subject, "Алгебра");
    assert_eq!(e.week_parity, WeekParity::Odd);

    let rendered = render_lookup(&store, "22з").expect("render");
    assert_eq!(rendered.file_name, "22з_schedule.html");
    assert!(rendered.html.contains("Расписание для группы 22з"));
    assert!(rendered.html.contains("Нечетная неделя"));
    assert!(!rendered.html.contains("Четная неделя"));
}

#[test]
fn lookup_dispatches_on_token_shape() {
    let store = seeded_store();

    let room = render_lookup(&store, "1-103").expect("room");
    assert_eq!(room.file_name, "classroom_1-103_schedule.html");
    assert_eq!(room.title, "аудитории 1-103");

    let teacher = render_lookup(&store, "петров").expect("teacher");
    assert_eq!(teacher.title, "Петров П.П.");
    assert_eq!(teacher.file_name, "петров_schedule.html");
    assert!(teacher.html.contains("Расписание для преподавателя: Петров П.П."));

    match render_lookup(&store, "Сидоров") {
        Err(e @ TimetableError::TeacherNotFound { .. }) => assert!(e.is_not_found()),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn lookup_writes_document_into_output_dir() {
    let store = seeded_store();
    let out = temp_dir("timetabled-lookup-out").join("nested");

    let outcome = lookup_to_file(&store, "21а", &out).expect("lookup");
    assert_eq!(outcome.kind, "group");
    assert_eq!(outcome.entry_count, 1);
    assert_eq!(outcome.output_path, out.join("21а_schedule.html"));
    let html = std::fs::read_to_string(&outcome.output_path).expect("read html");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<td>Иванов И.И.</td>"));
}

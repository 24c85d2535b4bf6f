use std::collections::HashSet;

use crate::error::{Result, TimetableError};
use crate::layout::{DayOfWeek, TimeSlot, WeekParity};
use crate::model::{ClassEntry, ExtendedEntry, TeacherSchedule};
use crate::store::ScheduleStore;

type EntryKey = (WeekParity, DayOfWeek, TimeSlot, String, String, String);

fn entry_key(e: &ExtendedEntry) -> EntryKey {
    (
        e.week_parity,
        e.day_of_week,
        e.time,
        e.subject.clone(),
        e.group.clone(),
        e.classroom.clone(),
    )
}

/// Flatten every matching entry across all teachers.
///
/// Entries sharing (parity, day, time, subject, group, classroom) are kept
/// once, first teacher in scan order wins. The result is ordered odd week
/// first, then by day, then by time slot.
pub fn aggregate<'a, I, F>(schedules: I, predicate: F) -> Vec<ExtendedEntry>
where
    I: IntoIterator<Item = &'a TeacherSchedule>,
    F: Fn(&ClassEntry) -> bool,
{
    let mut seen: HashSet<EntryKey> = HashSet::new();
    let mut out: Vec<ExtendedEntry> = Vec::new();

    for teacher in schedules {
        for parity in WeekParity::ALL {
            for slot in teacher.schedule.week(parity) {
                for entry in &slot.entries {
                    let qualified = ClassEntry {
                        teacher: teacher.name.clone(),
                        ..entry.clone()
                    };
                    if !predicate(&qualified) {
                        continue;
                    }
                    let ext = ExtendedEntry {
                        teacher: qualified.teacher,
                        day_of_week: slot.day_of_week,
                        time: slot.time,
                        subject: qualified.subject,
                        group: qualified.group,
                        classroom: qualified.classroom,
                        week_parity: parity,
                    };
                    if seen.insert(entry_key(&ext)) {
                        out.push(ext);
                    }
                }
            }
        }
    }

    out.sort_by_key(|e| (e.week_parity, e.day_of_week.index(), e.time.index()));
    out
}

pub fn group_filter(token: &str) -> impl Fn(&ClassEntry) -> bool + '_ {
    move |e| e.group.contains(token)
}

pub fn room_filter(token: &str) -> impl Fn(&ClassEntry) -> bool + '_ {
    move |e| e.classroom == token
}

/// Aggregate over the whole store; an empty result is reported as "nothing
/// found" for `title`.
pub fn query<S, F>(store: &S, predicate: F, title: &str) -> Result<Vec<ExtendedEntry>>
where
    S: ScheduleStore + ?Sized,
    F: Fn(&ClassEntry) -> bool,
{
    let all = store.find_all()?;
    let entries = aggregate(&all, predicate);
    if entries.is_empty() {
        return Err(TimetableError::EmptyResult {
            title: title.to_string(),
        });
    }
    Ok(entries)
}

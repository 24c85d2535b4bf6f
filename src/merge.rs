use std::collections::HashSet;

use crate::layout::{DayOfWeek, TimeSlot, WeekParity};
use crate::model::{DaySlot, WeekSchedule};

/// Identity of a day slot during merge: day, time, and the group of every
/// entry in order. Subject and classroom are not compared, so two different
/// classes for the same group in the same slot collapse into the first one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub day_of_week: DayOfWeek,
    pub time: TimeSlot,
    pub groups: Vec<String>,
}

impl SlotKey {
    pub fn of(slot: &DaySlot) -> Self {
        SlotKey {
            day_of_week: slot.day_of_week,
            time: slot.time,
            groups: slot.entries.iter().map(|e| e.group.clone()).collect(),
        }
    }
}

/// Keep the first slot for every key, preserving order.
pub fn dedup_slots(slots: Vec<DaySlot>) -> Vec<DaySlot> {
    let mut seen: HashSet<SlotKey> = HashSet::with_capacity(slots.len());
    slots
        .into_iter()
        .filter(|slot| seen.insert(SlotKey::of(slot)))
        .collect()
}

/// Stored slots first, then fresh ones, deduplicated per parity.
pub fn merge_schedules(existing: Option<WeekSchedule>, fresh: WeekSchedule) -> WeekSchedule {
    let Some(mut merged) = existing else {
        return fresh;
    };
    let mut fresh = fresh;
    for parity in WeekParity::ALL {
        let mut week = std::mem::take(merged.week_mut(parity));
        week.append(fresh.week_mut(parity));
        *merged.week_mut(parity) = dedup_slots(week);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassEntry;

    fn slot(day: DayOfWeek, time: TimeSlot, group: &str, subject: &str) -> DaySlot {
        DaySlot {
            day_of_week: day,
            time,
            entries: vec![ClassEntry {
                group: group.into(),
                classroom: "1-103".into(),
                subject: subject.into(),
                teacher: "T".into(),
            }],
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let slots = vec![
            slot(DayOfWeek::Monday, TimeSlot::First, "22з", "Алгебра"),
            slot(DayOfWeek::Monday, TimeSlot::First, "22з", "Физика"),
            slot(DayOfWeek::Monday, TimeSlot::Second, "22з", "Физика"),
        ];
        let out = dedup_slots(slots);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].entries[0].subject, "Алгебра");
    }

    #[test]
    fn different_entry_counts_never_collide() {
        let mut two = slot(DayOfWeek::Friday, TimeSlot::Third, "22з", "A");
        two.entries.push(two.entries[0].clone());
        let one = slot(DayOfWeek::Friday, TimeSlot::Third, "22з", "A");
        assert_eq!(dedup_slots(vec![one, two]).len(), 2);
    }

    #[test]
    fn absent_existing_keeps_fresh_verbatim() {
        let fresh = WeekSchedule {
            odd: vec![
                slot(DayOfWeek::Monday, TimeSlot::First, "22з", "A"),
                slot(DayOfWeek::Monday, TimeSlot::First, "22з", "A"),
            ],
            even: vec![],
        };
        assert_eq!(merge_schedules(None, fresh.clone()), fresh);
    }
}

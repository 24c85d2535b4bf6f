use tracing::debug;

use crate::classify::classify_cell;
use crate::grid::Grid;
use crate::layout::{DayOfWeek, GridLayout, TimeSlot};
use crate::model::{ClassEntry, DaySlot, TeacherSchedule, WeekSchedule};

/// Trimmed text of the four cells of one (time slot, day).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotText {
    pub odd_group: String,
    pub odd_subject: String,
    pub even_group: String,
    pub even_subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotResolution {
    /// Shifted layout: one class held identically in both weeks.
    Shared(ClassEntry),
    Independent {
        odd: Option<ClassEntry>,
        even: Option<ClassEntry>,
    },
}

impl SlotText {
    pub fn read<G: Grid + ?Sized>(
        grid: &G,
        layout: &GridLayout,
        anchor_row: u32,
        slot: TimeSlot,
        day: DayOfWeek,
    ) -> Self {
        let cells = layout.slot_cells(anchor_row, slot, day);
        let read = |row: u32| grid.cell_text(row, cells.col).trim().to_string();
        SlotText {
            odd_group: read(cells.odd.group_row),
            odd_subject: read(cells.odd.subject_row),
            even_group: read(cells.even.group_row),
            even_subject: read(cells.even.subject_row),
        }
    }

    /// Group/room code sits in the odd subject cell and the subject text in the
    /// even group cell, with the other two cells blank.
    fn is_shifted(&self) -> bool {
        self.odd_group.is_empty()
            && !self.odd_subject.is_empty()
            && !self.even_group.is_empty()
            && self.even_subject.is_empty()
    }
}

fn entry_from(group_cell: &str, subject: &str, teacher: &str) -> ClassEntry {
    let parts = classify_cell(group_cell);
    ClassEntry {
        group: parts.group,
        classroom: parts.classroom,
        subject: subject.to_string(),
        teacher: teacher.to_string(),
    }
}

fn parity_entry(group_cell: &str, subject_cell: &str, teacher: &str) -> Option<ClassEntry> {
    if group_cell.is_empty() || subject_cell.is_empty() {
        return None;
    }
    Some(entry_from(group_cell, subject_cell, teacher))
}

pub fn resolve_slot(text: &SlotText, teacher: &str) -> SlotResolution {
    if text.is_shifted() {
        return SlotResolution::Shared(entry_from(&text.odd_subject, &text.even_group, teacher));
    }
    SlotResolution::Independent {
        odd: parity_entry(&text.odd_group, &text.odd_subject, teacher),
        even: parity_entry(&text.even_group, &text.even_subject, teacher),
    }
}

fn push_slot(week: &mut Vec<DaySlot>, day: DayOfWeek, time: TimeSlot, entries: Vec<ClassEntry>) {
    if entries.is_empty() {
        return;
    }
    week.push(DaySlot {
        day_of_week: day,
        time,
        entries,
    });
}

pub fn assemble_teacher<G: Grid + ?Sized>(
    grid: &G,
    layout: &GridLayout,
    anchor_row: u32,
) -> TeacherSchedule {
    // Names are matched exactly downstream; keep the cell text as written.
    let name = grid.cell_text(anchor_row, layout.name_col);
    let mut schedule = WeekSchedule::default();

    for day in DayOfWeek::ALL {
        for time in TimeSlot::ALL {
            let text = SlotText::read(grid, layout, anchor_row, time, day);
            let (odd, even) = match resolve_slot(&text, &name) {
                SlotResolution::Shared(entry) => (vec![entry.clone()], vec![entry]),
                SlotResolution::Independent { odd, even } => (
                    odd.into_iter().collect::<Vec<_>>(),
                    even.into_iter().collect::<Vec<_>>(),
                ),
            };
            push_slot(&mut schedule.odd, day, time, odd);
            push_slot(&mut schedule.even, day, time, even);
        }
    }

    debug!(
        teacher = %name,
        anchor_row,
        odd = schedule.odd.len(),
        even = schedule.even.len(),
        "assembled teacher block"
    );
    TeacherSchedule { name, schedule }
}

/// One schedule per teacher block, in sheet order.
pub fn assemble_all<G: Grid + ?Sized>(grid: &G, layout: &GridLayout) -> Vec<TeacherSchedule> {
    layout
        .anchors(grid)
        .map(|anchor| assemble_teacher(grid, layout, anchor))
        .collect()
}

//! Fixed-offset coordinates of the teacher timetable sheet.
//!
//! Every teacher occupies a block of rows. The block's anchor row holds the
//! teacher's name; below it each time slot takes four rows per day column:
//! odd-week group/room line, odd-week subject line, then the same pair for the
//! even week. All coordinates are 1-based, matching spreadsheet addressing.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "Понедельник")]
    Monday,
    #[serde(rename = "Вторник")]
    Tuesday,
    #[serde(rename = "Среда")]
    Wednesday,
    #[serde(rename = "Четверг")]
    Thursday,
    #[serde(rename = "Пятница")]
    Friday,
    #[serde(rename = "Суббота")]
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Понедельник",
            DayOfWeek::Tuesday => "Вторник",
            DayOfWeek::Wednesday => "Среда",
            DayOfWeek::Thursday => "Четверг",
            DayOfWeek::Friday => "Пятница",
            DayOfWeek::Saturday => "Суббота",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "08.00-09.35")]
    First,
    #[serde(rename = "09.45-11.20")]
    Second,
    #[serde(rename = "11.30-13.05")]
    Third,
    #[serde(rename = "13.55-15.30")]
    Fourth,
    #[serde(rename = "15.40-17.15")]
    Fifth,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::First,
        TimeSlot::Second,
        TimeSlot::Third,
        TimeSlot::Fourth,
        TimeSlot::Fifth,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::First => "08.00-09.35",
            TimeSlot::Second => "09.45-11.20",
            TimeSlot::Third => "11.30-13.05",
            TimeSlot::Fourth => "13.55-15.30",
            TimeSlot::Fifth => "15.40-17.15",
        }
    }
}

/// Alternating academic week, not ISO week parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Odd,
    Even,
}

impl WeekParity {
    pub const ALL: [WeekParity; 2] = [WeekParity::Odd, WeekParity::Even];

    pub fn as_str(self) -> &'static str {
        match self {
            WeekParity::Odd => "odd",
            WeekParity::Even => "even",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            WeekParity::Odd => "Нечетная неделя",
            WeekParity::Even => "Четная неделя",
        }
    }
}

/// Layout constants of one sheet format. Swap the whole set to read a
/// differently laid out workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub first_anchor_row: u32,
    pub block_stride: u32,
    pub name_col: u32,
    pub first_slot_row_offset: u32,
    pub rows_per_slot: u32,
    pub first_day_col: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            first_anchor_row: 7,
            block_stride: 32,
            name_col: 2,
            first_slot_row_offset: 2,
            rows_per_slot: 4,
            first_day_col: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPair {
    pub group_row: u32,
    pub subject_row: u32,
}

/// The four cells describing one (time slot, day) of a teacher block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCells {
    pub col: u32,
    pub odd: CellPair,
    pub even: CellPair,
}

impl GridLayout {
    pub fn slot_cells(&self, anchor_row: u32, slot: TimeSlot, day: DayOfWeek) -> SlotCells {
        let group_row =
            anchor_row + self.first_slot_row_offset + slot.index() as u32 * self.rows_per_slot;
        SlotCells {
            col: self.first_day_col + day.index() as u32,
            odd: CellPair {
                group_row,
                subject_row: group_row + 1,
            },
            even: CellPair {
                group_row: group_row + 2,
                subject_row: group_row + 3,
            },
        }
    }

    /// Anchor rows of every teacher block, stopping at the first empty name
    /// cell. A cell holding only whitespace is not empty.
    pub fn anchors<'a, G: Grid + ?Sized>(&'a self, grid: &'a G) -> impl Iterator<Item = u32> + 'a {
        let stride = self.block_stride.max(1);
        std::iter::successors(Some(self.first_anchor_row), move |row| row.checked_add(stride))
            .take_while(move |row| !grid.cell_text(*row, self.name_col).is_empty())
    }
}

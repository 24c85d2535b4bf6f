use serde::{Deserialize, Serialize};

use crate::layout::{DayOfWeek, TimeSlot, WeekParity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Empty when the slot carries no group; several groups are `;`-joined.
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub classroom: String,
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlot {
    pub day_of_week: DayOfWeek,
    pub time: TimeSlot,
    pub entries: Vec<ClassEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    #[serde(default)]
    pub odd: Vec<DaySlot>,
    #[serde(default)]
    pub even: Vec<DaySlot>,
}

impl WeekSchedule {
    pub fn week(&self, parity: WeekParity) -> &[DaySlot] {
        match parity {
            WeekParity::Odd => &self.odd,
            WeekParity::Even => &self.even,
        }
    }

    pub fn week_mut(&mut self, parity: WeekParity) -> &mut Vec<DaySlot> {
        match parity {
            WeekParity::Odd => &mut self.odd,
            WeekParity::Even => &mut self.even,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.odd.len() + self.even.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSchedule {
    pub name: String,
    pub schedule: WeekSchedule,
}

/// A teacher-qualified entry flattened for the filtered views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedEntry {
    pub teacher: String,
    pub day_of_week: DayOfWeek,
    pub time: TimeSlot,
    pub subject: String,
    pub group: String,
    pub classroom: String,
    pub week_parity: WeekParity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_shape_uses_labels() {
        let doc = TeacherSchedule {
            name: "Иванов И.И.".into(),
            schedule: WeekSchedule {
                odd: vec![DaySlot {
                    day_of_week: DayOfWeek::Monday,
                    time: TimeSlot::First,
                    entries: vec![ClassEntry {
                        group: "22з".into(),
                        classroom: "1-103".into(),
                        subject: "Алгебра".into(),
                        teacher: "Иванов И.И.".into(),
                    }],
                }],
                even: vec![],
            },
        };
        let v = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(v["schedule"]["odd"][0]["dayOfWeek"], json!("Понедельник"));
        assert_eq!(v["schedule"]["odd"][0]["time"], json!("08.00-09.35"));
        assert_eq!(v["schedule"]["odd"][0]["entries"][0]["classroom"], json!("1-103"));

        let back: TeacherSchedule = serde_json::from_value(v).expect("deserialize");
        assert_eq!(back, doc);
    }
}

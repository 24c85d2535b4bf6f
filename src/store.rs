use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{TeacherSchedule, WeekSchedule};

/// Document store of teacher schedules keyed by exact name.
pub trait ScheduleStore {
    fn find_by_name(&self, name: &str) -> Result<Option<TeacherSchedule>>;

    /// Insert, or replace the stored schedule of the same name.
    fn upsert(&mut self, doc: &TeacherSchedule) -> Result<()>;

    /// All documents in insertion order.
    fn find_all(&self) -> Result<Vec<TeacherSchedule>>;

    /// First document, in insertion order, whose name contains `fragment`
    /// ignoring case.
    fn find_by_name_fragment(&self, fragment: &str) -> Result<Option<TeacherSchedule>> {
        let needle = fragment.trim().to_lowercase();
        Ok(self
            .find_all()?
            .into_iter()
            .find(|doc| doc.name.to_lowercase().contains(&needle)))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Vec<TeacherSchedule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryStore {
    fn find_by_name(&self, name: &str) -> Result<Option<TeacherSchedule>> {
        Ok(self.docs.iter().find(|d| d.name == name).cloned())
    }

    fn upsert(&mut self, doc: &TeacherSchedule) -> Result<()> {
        match self.docs.iter_mut().find(|d| d.name == doc.name) {
            Some(existing) => existing.schedule = doc.schedule.clone(),
            None => self.docs.push(doc.clone()),
        }
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<TeacherSchedule>> {
        Ok(self.docs.clone())
    }
}

/// Row-per-teacher store; the schedule is kept as one JSON document.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM teachers ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl ScheduleStore for SqliteStore<'_> {
    fn find_by_name(&self, name: &str) -> Result<Option<TeacherSchedule>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT schedule_json FROM teachers WHERE name = ?",
                [name],
                |r| r.get(0),
            )
            .optional()?;
        let Some(json) = json else {
            return Ok(None);
        };
        let schedule: WeekSchedule = serde_json::from_str(&json)?;
        Ok(Some(TeacherSchedule {
            name: name.to_string(),
            schedule,
        }))
    }

    fn upsert(&mut self, doc: &TeacherSchedule) -> Result<()> {
        let json = serde_json::to_string(&doc.schedule)?;
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO teachers(id, name, schedule_json, updated_at)
             VALUES(?, ?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
               schedule_json = excluded.schedule_json,
               updated_at = excluded.updated_at",
            (Uuid::new_v4().to_string(), &doc.name, &json, &now),
        )?;
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<TeacherSchedule>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, schedule_json FROM teachers ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut docs = Vec::with_capacity(rows.len());
        for (name, json) in rows {
            let schedule: WeekSchedule = serde_json::from_str(&json)?;
            docs.push(TeacherSchedule { name, schedule });
        }
        Ok(docs)
    }

    fn find_by_name_fragment(&self, fragment: &str) -> Result<Option<TeacherSchedule>> {
        let needle = fragment.trim().to_lowercase();
        // SQLite's LIKE folds ASCII only; compare in Rust to cover Cyrillic.
        let hit = self
            .names()?
            .into_iter()
            .find(|name| name.to_lowercase().contains(&needle));
        match hit {
            Some(name) => self.find_by_name(&name),
            None => Ok(None),
        }
    }
}

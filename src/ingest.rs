use std::path::Path;

use rusqlite::Connection;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use uuid::Uuid;

use crate::assemble::assemble_all;
use crate::config::Config;
use crate::error::Result;
use crate::merge::merge_schedules;
use crate::model::TeacherSchedule;
use crate::store::{ScheduleStore, SqliteStore};
use crate::xlsx;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCounts {
    pub created: usize,
    pub merged: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub teacher_count: usize,
    pub created: usize,
    pub merged: usize,
    pub source_sha256: String,
}

/// Merge each freshly assembled schedule into the store, one teacher at a
/// time, in sheet order.
pub fn store_schedules<S: ScheduleStore + ?Sized>(
    store: &mut S,
    fresh: Vec<TeacherSchedule>,
) -> Result<MergeCounts> {
    let mut counts = MergeCounts::default();
    for doc in fresh {
        let existing = store.find_by_name(&doc.name)?;
        if existing.is_some() {
            counts.merged += 1;
        } else {
            counts.created += 1;
        }
        let before = existing.as_ref().map(|d| d.schedule.slot_count());
        let schedule = merge_schedules(existing.map(|d| d.schedule), doc.schedule);
        debug!(
            teacher = %doc.name,
            stored_slots = ?before,
            merged_slots = schedule.slot_count(),
            "merging teacher schedule"
        );
        store.upsert(&TeacherSchedule {
            name: doc.name,
            schedule,
        })?;
    }
    Ok(counts)
}

pub fn file_sha256(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Read the configured sheet, assemble every teacher block and merge the
/// result into the database in a single transaction. A missing sheet aborts
/// before anything is written.
pub fn ingest_workbook(conn: &Connection, path: &Path, cfg: &Config) -> Result<IngestSummary> {
    info!(source = %path.to_string_lossy(), sheet = %cfg.sheet, "ingest started");
    let source_sha256 = file_sha256(path)?;
    let grid = xlsx::open_sheet(path, &cfg.sheet)?;
    let fresh = assemble_all(&grid, &cfg.layout);
    let teacher_count = fresh.len();

    let tx = conn.unchecked_transaction()?;
    let counts = {
        let mut store = SqliteStore::new(&tx);
        store_schedules(&mut store, fresh)?
    };
    tx.execute(
        "INSERT INTO ingest_runs(id, source_path, source_sha256, sheet, teacher_count, created_count, merged_count, ingested_at)
         VALUES(?, ?, ?, ?, ?, ?, ?, ?)",
        (
            Uuid::new_v4().to_string(),
            path.to_string_lossy().to_string(),
            &source_sha256,
            &cfg.sheet,
            teacher_count as i64,
            counts.created as i64,
            counts.merged as i64,
            chrono::Utc::now().to_rfc3339(),
        ),
    )?;
    tx.commit()?;

    info!(
        teachers = teacher_count,
        created = counts.created,
        merged = counts.merged,
        "ingest finished"
    );
    Ok(IngestSummary {
        teacher_count,
        created: counts.created,
        merged: counts.merged,
        source_sha256,
    })
}

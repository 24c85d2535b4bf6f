use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::classify::{classify_token, QueryKind};
use crate::error::{Result, TimetableError};
use crate::query::{group_filter, query, room_filter};
use crate::render::{render_filtered_document, render_teacher_document};
use crate::store::ScheduleStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupOutcome {
    pub kind: &'static str,
    pub title: String,
    pub output_path: PathBuf,
    /// Entries for group/room views, day slots for the teacher view.
    pub entry_count: usize,
}

/// Rendered document plus the file name it should be written under.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub kind: QueryKind,
    pub title: String,
    pub file_name: String,
    pub html: String,
    pub entry_count: usize,
}

fn file_safe(token: &str) -> String {
    token
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Classify `token` and build the matching view. Group tokens match any entry
/// whose group contains them, room tokens match the classroom exactly, and
/// anything else is a case-insensitive teacher name fragment.
pub fn render_lookup<S: ScheduleStore + ?Sized>(store: &S, token: &str) -> Result<Rendered> {
    let token = token.trim();
    let kind = classify_token(token);
    info!(token, kind = kind.as_str(), "lookup");

    match kind {
        QueryKind::Group => {
            let title = format!("группы {token}");
            let entries = query(store, group_filter(token), &title)?;
            Ok(Rendered {
                kind,
                html: render_filtered_document(&title, &entries),
                file_name: format!("{}_schedule.html", file_safe(token)),
                entry_count: entries.len(),
                title,
            })
        }
        QueryKind::Room => {
            let title = format!("аудитории {token}");
            let entries = query(store, room_filter(token), &title)?;
            Ok(Rendered {
                kind,
                html: render_filtered_document(&title, &entries),
                file_name: format!("classroom_{}_schedule.html", file_safe(token)),
                entry_count: entries.len(),
                title,
            })
        }
        QueryKind::Teacher => {
            let doc = store
                .find_by_name_fragment(token)?
                .ok_or_else(|| TimetableError::TeacherNotFound {
                    query: token.to_string(),
                })?;
            Ok(Rendered {
                kind,
                html: render_teacher_document(&doc.name, &doc.schedule),
                file_name: format!("{}_schedule.html", file_safe(token)),
                entry_count: doc.schedule.slot_count(),
                title: doc.name,
            })
        }
    }
}

/// Render and write the view for `token` into `out_dir`.
pub fn lookup_to_file<S: ScheduleStore + ?Sized>(
    store: &S,
    token: &str,
    out_dir: &Path,
) -> Result<LookupOutcome> {
    let rendered = render_lookup(store, token)?;
    std::fs::create_dir_all(out_dir)?;
    let output_path = out_dir.join(&rendered.file_name);
    std::fs::write(&output_path, rendered.html.as_bytes())?;
    info!(path = %output_path.to_string_lossy(), title = %rendered.title, "schedule saved");

    Ok(LookupOutcome {
        kind: rendered.kind.as_str(),
        title: rendered.title,
        output_path,
        entry_count: rendered.entry_count,
    })
}

use crate::ingest;
use crate::ipc::error::{err, from_timetable, ok};
use crate::ipc::helpers::{db_conn, optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::store::SqliteStore;
use serde_json::json;
use std::path::PathBuf;

fn handle_ingest(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let source = match required_str(req, "sourcePath") {
        Ok(p) => PathBuf::from(p),
        Err(resp) => return resp,
    };
    if !source.is_file() {
        return err(
            &req.id,
            "bad_params",
            "sourcePath is not a file",
            Some(json!({ "sourcePath": source.to_string_lossy() })),
        );
    }

    let mut cfg = state.config.clone();
    if let Some(sheet) = optional_str(req, "sheet") {
        cfg.sheet = sheet;
    }

    match ingest::ingest_workbook(conn, &source, &cfg) {
        Ok(summary) => ok(&req.id, json!(summary)),
        Err(e) => from_timetable(&req.id, &e),
    }
}

fn handle_teachers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match SqliteStore::new(conn).names() {
        Ok(names) => ok(&req.id, json!({ "names": names })),
        Err(e) => from_timetable(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timetable.ingest" => Some(handle_ingest(state, req)),
        "teachers.list" => Some(handle_teachers_list(state, req)),
        _ => None,
    }
}

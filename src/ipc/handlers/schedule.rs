use crate::error::TimetableError;
use crate::ipc::error::{err, from_timetable, ok};
use crate::ipc::helpers::{db_conn, optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::lookup;
use crate::query::{group_filter, query, room_filter};
use crate::store::{ScheduleStore, SqliteStore};
use serde_json::json;
use std::path::PathBuf;

fn handle_teacher(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let q = match required_str(req, "query") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match SqliteStore::new(conn).find_by_name_fragment(&q) {
        Ok(Some(doc)) => ok(&req.id, json!(doc)),
        Ok(None) => from_timetable(&req.id, &TimetableError::TeacherNotFound { query: q }),
        Err(e) => from_timetable(&req.id, &e),
    }
}

fn handle_query(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let kind = match required_str(req, "kind") {
        Ok(v) => v.to_ascii_lowercase(),
        Err(resp) => return resp,
    };
    let value = match required_str(req, "value") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let store = SqliteStore::new(conn);
    let result = match kind.as_str() {
        "group" => query(&store, group_filter(&value), &format!("группы {value}")),
        "room" => query(&store, room_filter(&value), &format!("аудитории {value}")),
        other => {
            return err(
                &req.id,
                "bad_params",
                "kind must be one of: group, room",
                Some(json!({ "kind": other })),
            )
        }
    };

    match result {
        Ok(entries) => ok(&req.id, json!({ "entries": entries })),
        Err(e) => from_timetable(&req.id, &e),
    }
}

fn handle_lookup(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let q = match required_str(req, "query") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let out_dir = match optional_str(req, "outDir") {
        Some(p) => PathBuf::from(p),
        None => match state.workspace.as_deref() {
            Some(ws) => state.config.output_dir(ws),
            None => return err(&req.id, "no_workspace", "select a workspace first", None),
        },
    };

    match lookup::lookup_to_file(&SqliteStore::new(conn), &q, &out_dir) {
        Ok(outcome) => ok(&req.id, json!(outcome)),
        Err(e) => from_timetable(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "schedule.teacher" => Some(handle_teacher(state, req)),
        "schedule.query" => Some(handle_query(state, req)),
        "schedule.lookup" => Some(handle_lookup(state, req)),
        _ => None,
    }
}

//! JSON-lines sidecar protocol.
//!
//! Each request is `{id, method, params}`; each reply echoes `id` with either
//! `result` or an `error` object carrying a stable `code`. Methods are grouped
//! by handler family: `health` and `workspace.select` in `core`, ingest and
//! teacher listing in `timetable`, the read views in `schedule`.

mod error;
mod handlers;
mod helpers;
mod router;
mod types;

pub use router::handle_request;
pub use types::{AppState, Request};

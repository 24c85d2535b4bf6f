//! Teacher timetable extraction and lookup.
//!
//! A timetable workbook holds one fixed-height block per teacher. Ingest walks
//! those blocks ([`assemble`]), parses each cell ([`classify`]), merges the
//! result into previously stored schedules ([`merge`]) and persists it
//! ([`store`]). Lookups flatten and filter the stored schedules ([`query`])
//! and render them as HTML ([`render`]).

pub mod assemble;
pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod grid;
pub mod ingest;
pub mod ipc;
pub mod layout;
pub mod lookup;
pub mod merge;
pub mod model;
pub mod query;
pub mod render;
pub mod store;
pub mod xlsx;

pub use error::{Result, TimetableError};

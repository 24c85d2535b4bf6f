use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use timetabled::config::Config;
use timetabled::store::SqliteStore;
use timetabled::{db, ingest, ipc, lookup, TimetableError};
use tracing::error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  timetabled                                   serve JSON requests on stdin
  timetabled ingest <workspace> <workbook.xlsx>
  timetabled lookup <workspace> <token>
  timetabled run <workspace> <workbook.xlsx> <token>";

fn init_logging() {
    // stdout carries sidecar responses; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn serve() {
    let mut state = ipc::AppState::default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}

fn run_ingest(workspace: &Path, source: &Path) -> anyhow::Result<()> {
    let cfg = Config::load(workspace)?;
    let conn = db::open_db(workspace)?;
    let summary = ingest::ingest_workbook(&conn, source, &cfg)
        .with_context(|| format!("ingest of {} failed", source.to_string_lossy()))?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn run_lookup(workspace: &Path, token: &str) -> anyhow::Result<()> {
    let cfg = Config::load(workspace)?;
    let conn = db::open_db(workspace)?;
    let out_dir = cfg.output_dir(workspace);
    let outcome = lookup::lookup_to_file(&SqliteStore::new(&conn), token, &out_dir)?;
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<TimetableError>()
        .map(TimetableError::is_not_found)
        .unwrap_or(false)
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => {
            serve();
            return ExitCode::SUCCESS;
        }
        ["ingest", ws, src] => run_ingest(&PathBuf::from(ws), &PathBuf::from(src)),
        ["lookup", ws, token] => run_lookup(&PathBuf::from(ws), token),
        ["run", ws, src, token] => {
            let ws = PathBuf::from(ws);
            run_ingest(&ws, &PathBuf::from(src)).and_then(|_| run_lookup(&ws, token))
        }
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_not_found(&e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

//! Minimal `.xlsx` reader: enough of the OOXML package to pull the text of
//! every cell of one named sheet.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};
use quick_xml::Reader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Result, TimetableError};
use crate::grid::{parse_cell_ref, MemoryGrid};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

fn malformed(msg: impl Into<String>) -> TimetableError {
    TimetableError::Workbook(msg.into())
}

/// Load the cell text of `sheet_name`. A workbook without that sheet is
/// `SourceUnavailable`.
pub fn open_sheet(path: &Path, sheet_name: &str) -> Result<MemoryGrid> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let workbook = read_part(&mut archive, WORKBOOK_PART)?
        .ok_or_else(|| malformed(format!("missing {WORKBOOK_PART}")))?;
    let sheets = parse_workbook_sheets(&workbook)?;
    let Some(rel_id) = sheets
        .into_iter()
        .find(|(name, _)| name == sheet_name)
        .map(|(_, id)| id)
    else {
        return Err(TimetableError::SourceUnavailable {
            sheet: sheet_name.to_string(),
        });
    };

    let rels = read_part(&mut archive, WORKBOOK_RELS_PART)?
        .ok_or_else(|| malformed(format!("missing {WORKBOOK_RELS_PART}")))?;
    let target = parse_relationships(&rels)?
        .remove(&rel_id)
        .ok_or_else(|| malformed(format!("no relationship {rel_id} for sheet {sheet_name}")))?;
    let sheet_part = resolve_target(&target);

    let shared = match read_part(&mut archive, SHARED_STRINGS_PART)? {
        Some(xml) => parse_shared_strings(&xml)?,
        None => Vec::new(),
    };

    let sheet_xml = read_part(&mut archive, &sheet_part)?
        .ok_or_else(|| malformed(format!("missing sheet part {sheet_part}")))?;
    let grid = parse_sheet_cells(&sheet_xml, &shared)?;
    debug!(sheet = sheet_name, part = %sheet_part, cells = grid.len(), "loaded worksheet");
    Ok(grid)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(e) => e,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    Ok(Some(text))
}

/// Relationship targets are relative to `xl/` unless absolute within the package.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(abs) => abs.to_string(),
        None => format!("xl/{target}"),
    }
}

fn attr(e: &BytesStart, local: &[u8]) -> Result<Option<String>> {
    for a in e.attributes() {
        let a = a.map_err(|err| malformed(err.to_string()))?;
        if a.key.local_name().as_ref() == local {
            let v = a.unescape_value().map_err(|err| malformed(err.to_string()))?;
            return Ok(Some(v.to_string()));
        }
    }
    Ok(None)
}

fn text_of(t: &BytesText) -> Result<String> {
    std::str::from_utf8(t)
        .map(str::to_string)
        .map_err(|e| malformed(format!("invalid UTF-8 in text content: {e}")))
}

fn resolve_ref(r: &BytesRef) -> Result<String> {
    let name = std::str::from_utf8(r).map_err(|e| malformed(e.to_string()))?;
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name
            .strip_prefix("#x")
            .map(|hex| u32::from_str_radix(hex, 16).ok())
            .unwrap_or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
            .and_then(char::from_u32),
    };
    resolved
        .map(String::from)
        .ok_or_else(|| malformed(format!("unknown entity &{name};")))
}

/// (sheet name, relationship id) pairs in workbook order.
fn parse_workbook_sheets(xml: &str) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut out = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"sheet" => {
                if let (Some(name), Some(id)) = (attr(e, b"name")?, attr(e, b"id")?) {
                    out.push((name, id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut out = HashMap::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr(e, b"Id")?, attr(e, b"Target")?) {
                    out.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

/// Shared strings table; rich-text runs are concatenated, phonetic hints skipped.
fn parse_shared_strings(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"t" if !in_phonetic => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(ref e) if e.local_name().as_ref() == b"si" => out.push(String::new()),
            Event::End(ref e) => match e.local_name().as_ref() {
                b"si" => out.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Text(ref t) if in_text => current.push_str(&text_of(t)?),
            Event::GeneralRef(ref r) if in_text => current.push_str(&resolve_ref(r)?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Shared,
    Bool,
    Plain,
}

struct PendingCell {
    row: u32,
    col: u32,
    kind: CellKind,
}

fn parse_sheet_cells(xml: &str, shared: &[String]) -> Result<MemoryGrid> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut grid = MemoryGrid::new();

    let mut row_no: u32 = 0;
    let mut next_col: u32 = 1;
    let mut pending: Option<PendingCell> = None;
    let mut value = String::new();
    let mut in_value = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    row_no = attr(e, b"r")?
                        .and_then(|r| r.parse().ok())
                        .unwrap_or(row_no + 1);
                    next_col = 1;
                }
                b"c" => {
                    let (row, col) = attr(e, b"r")?
                        .as_deref()
                        .and_then(parse_cell_ref)
                        .unwrap_or((row_no, next_col));
                    let kind = match attr(e, b"t")?.as_deref() {
                        Some("s") => CellKind::Shared,
                        Some("b") => CellKind::Bool,
                        _ => CellKind::Plain,
                    };
                    next_col = col + 1;
                    pending = Some(PendingCell { row, col, kind });
                    value.clear();
                }
                b"v" | b"t" if pending.is_some() && !in_phonetic => in_value = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(ref e) if e.local_name().as_ref() == b"c" => {
                if let Some((_, col)) = attr(e, b"r")?.as_deref().and_then(parse_cell_ref) {
                    next_col = col + 1;
                } else {
                    next_col += 1;
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"rPh" => in_phonetic = false,
                b"c" => {
                    if let Some(cell) = pending.take() {
                        let text = cell_text(cell.kind, &value, shared);
                        if !text.is_empty() {
                            grid.set(cell.row, cell.col, text);
                        }
                    }
                }
                _ => {}
            },
            Event::Text(ref t) if in_value => value.push_str(&text_of(t)?),
            Event::GeneralRef(ref r) if in_value => value.push_str(&resolve_ref(r)?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(grid)
}

fn cell_text(kind: CellKind, raw: &str, shared: &[String]) -> String {
    match kind {
        CellKind::Shared => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|i| shared.get(i))
            .cloned()
            .unwrap_or_default(),
        CellKind::Bool => match raw.trim() {
            "1" => "TRUE".to_string(),
            _ => "FALSE".to_string(),
        },
        CellKind::Plain => raw.to_string(),
    }
}

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use timetabled::grid::MemoryGrid;
use timetabled::layout::{DayOfWeek, GridLayout, TimeSlot, WeekParity};

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

/// Builder for a teacher sheet laid out with the default layout.
#[derive(Default)]
pub struct SheetBuilder {
    pub cells: Vec<(u32, u32, String)>,
    next_block: u32,
}

impl SheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new teacher block; returns its anchor row.
    pub fn teacher(&mut self, name: &str) -> u32 {
        let layout = GridLayout::default();
        let anchor = layout.first_anchor_row + self.next_block * layout.block_stride;
        self.next_block += 1;
        self.cells.push((anchor, layout.name_col, name.to_string()));
        anchor
    }

    pub fn class(
        &mut self,
        anchor: u32,
        day: DayOfWeek,
        time: TimeSlot,
        parity: WeekParity,
        group_cell: &str,
        subject_cell: &str,
    ) -> &mut Self {
        let cells = GridLayout::default().slot_cells(anchor, time, day);
        let pair = match parity {
            WeekParity::Odd => cells.odd,
            WeekParity::Even => cells.even,
        };
        if !group_cell.is_empty() {
            self.cells.push((pair.group_row, cells.col, group_cell.to_string()));
        }
        if !subject_cell.is_empty() {
            self.cells.push((pair.subject_row, cells.col, subject_cell.to_string()));
        }
        self
    }

    pub fn grid(&self) -> MemoryGrid {
        let mut g = MemoryGrid::new();
        for (r, c, t) in &self.cells {
            g.set(*r, *c, t.clone());
        }
        g
    }
}

fn col_letters(mut col: u32) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    out.iter().rev().collect()
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write a minimal .xlsx with one sheet whose cells are inline strings.
pub fn write_xlsx(path: &Path, sheet_name: &str, cells: &[(u32, u32, String)]) {
    let mut sorted: Vec<&(u32, u32, String)> = cells.iter().collect();
    sorted.sort_by_key(|(r, c, _)| (*r, *c));

    let mut sheet_data = String::new();
    let mut current_row: Option<u32> = None;
    for (r, c, text) in sorted {
        if current_row != Some(*r) {
            if current_row.is_some() {
                sheet_data.push_str("</row>");
            }
            sheet_data.push_str(&format!("<row r=\"{r}\">"));
            current_row = Some(*r);
        }
        sheet_data.push_str(&format!(
            "<c r=\"{}{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
            col_letters(*c),
            r,
            xml_escape(text)
        ));
    }
    if current_row.is_some() {
        sheet_data.push_str("</row>");
    }

    let parts: Vec<(&str, String)> = vec![
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
        ),
        (
            "xl/workbook.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
                xml_escape(sheet_name)
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
        ),
        (
            "xl/worksheets/sheet1.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
            ),
        ),
    ];

    let file = File::create(path).expect("create xlsx");
    let mut zip = zip::ZipWriter::new(file);
    let opts = zip::write::FileOptions::default();
    for (name, body) in parts {
        zip.start_file(name, opts).expect("start zip entry");
        zip.write_all(body.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish xlsx");
}

use std::collections::HashMap;

/// Read-only view over one sheet. Rows and columns are 1-based; cells that
/// were never written read as empty text.
pub trait Grid {
    fn cell_text(&self, row: u32, col: u32) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    cells: HashMap<(u32, u32), String>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, row: u32, col: u32, text: impl Into<String>) {
        self.cells.insert((row, col), text.into());
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Grid for MemoryGrid {
    fn cell_text(&self, row: u32, col: u32) -> String {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }
}

/// Parse an A1-style reference ("B7", "AA12") into 1-based (row, col).
pub fn parse_cell_ref(r: &str) -> Option<(u32, u32)> {
    let split = r.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = r.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let v = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        col = col.checked_mul(26)?.checked_add(v)?;
    }
    let row = digits.parse::<u32>().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}

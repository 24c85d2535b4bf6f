use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::layout::GridLayout;

pub const CONFIG_FILE: &str = "timetable.toml";
pub const DEFAULT_SHEET: &str = "Преподаватели";

/// Workspace settings, read from `<workspace>/timetable.toml` when present.
///
/// `TIMETABLE_SHEET` overrides the sheet name from the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet: String,
    /// Where rendered documents go; relative paths are resolved against the
    /// workspace.
    pub output_dir: Option<PathBuf>,
    pub layout: GridLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_SHEET.to_string(),
            output_dir: None,
            layout: GridLayout::default(),
        }
    }
}

impl Config {
    pub fn load(workspace: &Path) -> anyhow::Result<Self> {
        let path = workspace.join(CONFIG_FILE);
        let mut cfg = if path.is_file() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
            Self::from_toml(&text)
                .with_context(|| format!("invalid config {}", path.to_string_lossy()))?
        } else {
            Self::default()
        };

        if let Ok(sheet) = env::var("TIMETABLE_SHEET") {
            if !sheet.trim().is_empty() {
                cfg.sheet = sheet;
            }
        }
        Ok(cfg)
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn output_dir(&self, workspace: &Path) -> PathBuf {
        match &self.output_dir {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => workspace.join(p),
            None => workspace.to_path_buf(),
        }
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimetableError>;

#[derive(Debug, Error)]
pub enum TimetableError {
    /// The expected sheet is missing from the workbook. Fatal for an ingest run.
    #[error("worksheet \"{sheet}\" not found")]
    SourceUnavailable { sheet: String },

    #[error("workbook could not be read: {0}")]
    Workbook(String),

    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("stored document is malformed: {0}")]
    Document(#[from] serde_json::Error),

    #[error("no schedule found for {title}")]
    EmptyResult { title: String },

    #[error("no teacher matches \"{query}\"")]
    TeacherNotFound { query: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TimetableError {
    /// Stable code reported over the sidecar channel.
    pub fn code(&self) -> &'static str {
        match self {
            TimetableError::SourceUnavailable { .. } => "source_unavailable",
            TimetableError::Workbook(_) => "workbook_unreadable",
            TimetableError::Persistence(_) | TimetableError::Document(_) => "db_failed",
            TimetableError::EmptyResult { .. } | TimetableError::TeacherNotFound { .. } => {
                "not_found"
            }
            TimetableError::Io(_) => "io_failed",
        }
    }

    /// "Nothing found" outcomes are user-visible results, not system faults.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TimetableError::EmptyResult { .. } | TimetableError::TeacherNotFound { .. }
        )
    }
}

impl From<zip::result::ZipError> for TimetableError {
    fn from(e: zip::result::ZipError) -> Self {
        TimetableError::Workbook(e.to_string())
    }
}

impl From<quick_xml::Error> for TimetableError {
    fn from(e: quick_xml::Error) -> Self {
        TimetableError::Workbook(e.to_string())
    }
}

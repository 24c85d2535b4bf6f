//! Heuristic parsing of timetable cell text.
//!
//! Grammar of the group/room line:
//!
//! ```text
//! group-run  := (group-code "~"? ";"?)+
//! group-code := DIGIT DIGIT CYRILLIC-LETTER        e.g. "22з"
//! room-code  := DIGIT{1,2} "-" DIGIT{3}            e.g. "1-467"
//! line       := ... group-run WS+ "а." room-code ...
//! ```
//!
//! Anything that does not contain that shape is treated as plain subject
//! text. A miss is not an error.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellParts {
    pub group: String,
    pub classroom: String,
    pub subject: String,
}

fn group_and_room_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)((?:[0-9]{2}[а-я]~?;?)+)\s+а\.([0-9]{1,2}-[0-9]{3})")
            .expect("group/room pattern compiles")
    })
}

fn group_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[0-9]{2}[а-я]$").expect("group token pattern compiles"))
}

fn room_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,2}-[0-9]{3}$").expect("room token pattern compiles"))
}

fn semicolon_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r";+").expect("semicolon run pattern compiles"))
}

/// Collapse runs of `;` and drop trailing ones.
pub fn normalize_semicolons(raw: &str) -> String {
    semicolon_run_re()
        .replace_all(raw, ";")
        .trim_end_matches(';')
        .to_string()
}

pub fn classify_cell(raw: &str) -> CellParts {
    let cleaned = normalize_semicolons(raw);

    let Some(caps) = group_and_room_re().captures(&cleaned) else {
        return CellParts {
            subject: cleaned.trim().to_string(),
            ..CellParts::default()
        };
    };

    let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
    let group = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    let classroom = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

    let mut subject = String::with_capacity(cleaned.len());
    subject.push_str(&cleaned[..whole.start]);
    subject.push_str(&cleaned[whole.end..]);

    CellParts {
        group: group.to_string(),
        classroom: classroom.to_string(),
        subject: subject.trim().to_string(),
    }
}

/// How a free-text lookup token should be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Group,
    Room,
    Teacher,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Group => "group",
            QueryKind::Room => "room",
            QueryKind::Teacher => "teacher",
        }
    }
}

pub fn classify_token(token: &str) -> QueryKind {
    let t = token.trim();
    if group_token_re().is_match(t) {
        QueryKind::Group
    } else if room_token_re().is_match(t) {
        QueryKind::Room
    } else {
        QueryKind::Teacher
    }
}

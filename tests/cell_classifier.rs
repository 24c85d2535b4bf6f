use timetabled::classify::{classify_cell, classify_token, normalize_semicolons, CellParts, QueryKind};

fn parts(group: &str, classroom: &str, subject: &str) -> CellParts {
    CellParts {
        group: group.into(),
        classroom: classroom.into(),
        subject: subject.into(),
    }
}

#[test]
fn group_room_and_subject_are_split() {
    assert_eq!(
        classify_cell("22з а.1-467 Матанализ"),
        parts("22з", "1-467", "Матанализ")
    );
}

#[test]
fn group_room_line_alone_leaves_empty_subject() {
    assert_eq!(classify_cell("22з а.1-103"), parts("22з", "1-103", ""));
}

#[test]
fn text_without_room_is_subject_only() {
    assert_eq!(classify_cell("Лекция"), parts("", "", "Лекция"));
    // A group code with no room marker does not match.
    assert_eq!(classify_cell("22з Алгебра"), parts("", "", "22з Алгебра"));
}

#[test]
fn several_groups_keep_their_separators() {
    let p = classify_cell("21а;22б~;23в а.12-345 Физика");
    assert_eq!(p.group, "21а;22б~;23в");
    assert_eq!(p.classroom, "12-345");
    assert_eq!(p.subject, "Физика");
}

#[test]
fn trailing_semicolons_are_dropped_before_matching() {
    assert_eq!(normalize_semicolons("22з;;;"), "22з");
    let p = classify_cell("22з;;23а;; а.1-103");
    // The separator before the room marker stays part of the group run.
    assert_eq!(p.group, "22з;23а;");
    assert_eq!(p.classroom, "1-103");
}

#[test]
fn uppercase_cyrillic_group_matches() {
    let p = classify_cell("22З а.1-103");
    assert_eq!(p.group, "22З");
    assert_eq!(p.classroom, "1-103");
}

#[test]
fn text_around_the_match_is_joined_into_subject() {
    let p = classify_cell("Практика 22з а.1-103 (доп.)");
    assert_eq!(p.group, "22з");
    assert_eq!(p.subject, "Практика  (доп.)");
}

#[test]
fn blank_cell_is_blank() {
    assert_eq!(classify_cell("   "), CellParts::default());
}

#[test]
fn lookup_tokens_are_classified() {
    assert_eq!(classify_token("22з"), QueryKind::Group);
    assert_eq!(classify_token(" 22З "), QueryKind::Group);
    assert_eq!(classify_token("1-103"), QueryKind::Room);
    assert_eq!(classify_token("12-345"), QueryKind::Room);
    assert_eq!(classify_token("123-45"), QueryKind::Teacher);
    assert_eq!(classify_token("Иванов"), QueryKind::Teacher);
    assert_eq!(classify_token("22зз"), QueryKind::Teacher);
}

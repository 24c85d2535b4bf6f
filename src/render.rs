//! HTML documents for the teacher view and the filtered (group/room) view.

use crate::layout::{DayOfWeek, WeekParity};
use crate::model::{DaySlot, ExtendedEntry, WeekSchedule};

const STYLE: &str = "table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
.week-header { background-color: #e8e8e8; font-weight: bold; }";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, heading: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"ru\">
<head>
<meta charset=\"UTF-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
<title>{}</title>
<style>
{STYLE}
</style>
</head>
<body>
<h1>{}</h1>
{body}
</body>
</html>
",
        escape_html(title),
        escape_html(heading),
    )
}

fn entry_cells(slot: &DaySlot) -> String {
    if slot.entries.is_empty() {
        return "<td colspan=\"3\"></td>".to_string();
    }
    slot.entries
        .iter()
        .map(|e| {
            format!(
                "<td>{}</td><td>{}</td><td>{}</td>",
                escape_html(&e.subject),
                escape_html(&e.group),
                escape_html(&e.classroom)
            )
        })
        .collect()
}

fn week_rows(slots: &[DaySlot]) -> String {
    let mut rows = String::new();
    for day in DayOfWeek::ALL {
        let day_slots: Vec<&DaySlot> = slots.iter().filter(|s| s.day_of_week == day).collect();
        let Some((first, rest)) = day_slots.split_first() else {
            rows.push_str(&format!(
                "<tr><td rowspan=\"1\">{}</td><td></td><td colspan=\"3\"></td></tr>\n",
                day.label()
            ));
            continue;
        };
        rows.push_str(&format!(
            "<tr><td rowspan=\"{}\">{}</td><td>{}</td>{}</tr>\n",
            day_slots.len(),
            day.label(),
            first.time.label(),
            entry_cells(first)
        ));
        for slot in rest {
            rows.push_str(&format!(
                "<tr><td>{}</td>{}</tr>\n",
                slot.time.label(),
                entry_cells(slot)
            ));
        }
    }
    rows
}

/// Both weeks of one teacher, every weekday listed even when free.
pub fn render_teacher_table(schedule: &WeekSchedule) -> String {
    let mut body = String::from(
        "<table>
<thead>
<tr><th>День недели</th><th>Время</th><th>Занятие</th><th>Группа</th><th>Аудитория</th></tr>
</thead>
<tbody>
",
    );
    for parity in WeekParity::ALL {
        body.push_str(&format!("<tr><th colspan=\"5\">{}</th></tr>\n", parity.heading()));
        body.push_str(&week_rows(schedule.week(parity)));
    }
    body.push_str("</tbody>\n</table>");
    body
}

pub fn render_teacher_document(name: &str, schedule: &WeekSchedule) -> String {
    page(
        &format!("Расписание для {name}"),
        &format!("Расписание для преподавателя: {name}"),
        &render_teacher_table(schedule),
    )
}

/// Rows for already sorted entries: a header whenever the week changes and a
/// day cell spanning each run of entries on the same day.
pub fn render_entries_table(entries: &[ExtendedEntry]) -> String {
    let mut body = String::from(
        "<table>
<tr><th>День</th><th>Преподаватель</th><th>Время</th><th>Предмет</th><th>Группа</th><th>Аудитория</th></tr>
",
    );

    let mut i = 0;
    let mut current_week: Option<WeekParity> = None;
    while i < entries.len() {
        let head = &entries[i];
        if current_week != Some(head.week_parity) {
            current_week = Some(head.week_parity);
            body.push_str(&format!(
                "<tr class=\"week-header\"><td colspan=\"6\">{}</td></tr>\n",
                head.week_parity.heading()
            ));
        }

        let run = entries[i..]
            .iter()
            .take_while(|e| e.week_parity == head.week_parity && e.day_of_week == head.day_of_week)
            .count();

        for (k, e) in entries[i..i + run].iter().enumerate() {
            let day_cell = if k == 0 {
                format!("<td rowspan=\"{run}\">{}</td>", e.day_of_week.label())
            } else {
                String::new()
            };
            body.push_str(&format!(
                "<tr>{day_cell}<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&e.teacher),
                e.time.label(),
                escape_html(&e.subject),
                escape_html(&e.group),
                escape_html(&e.classroom)
            ));
        }
        i += run;
    }

    body.push_str("</table>");
    body
}

pub fn render_filtered_document(title: &str, entries: &[ExtendedEntry]) -> String {
    let heading = format!("Расписание для {title}");
    page(&heading, &heading, &render_entries_table(entries))
}

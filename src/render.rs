use crate::controllers::ListView;
use crate::models::{Appointment, Participant};

const LOADING: &str = "Loading...";

pub fn dashboard() -> String {
    [
        "Dashboard",
        "",
        "  Appointments  - scheduled appointments, their schedulers and participants",
        "  Participants  - people who can be invited to appointments",
    ]
    .join("\n")
}

pub fn appointments_view(list: &ListView<Appointment>) -> String {
    let body = if list.is_loading() {
        LOADING.to_string()
    } else {
        let rows = list
            .rows()
            .iter()
            .map(|a| {
                let participants = a
                    .participants
                    .iter()
                    .map(|p| format!("{} <{}>", p.name, p.email))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![
                    a.id.to_string(),
                    format!("{}: {}", a.title, a.description),
                    format!("{} <{}>", a.scheduler_name, a.scheduler_email),
                    participants,
                    format!("{} - {}", a.start_at, a.end_at),
                ]
            })
            .collect();
        table(&["ID", "Appointment", "Scheduler", "Participants", "Date"], rows)
    };
    with_header("Appointments", list.error(), body)
}

pub fn participants_view(list: &ListView<Participant>) -> String {
    let body = if list.is_loading() {
        LOADING.to_string()
    } else {
        let rows = list
            .rows()
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.email.clone(),
                    p.created_at.clone(),
                ]
            })
            .collect();
        table(&["ID", "Name", "Email", "Date"], rows)
    };
    with_header("Participants", list.error(), body)
}

fn with_header(title: &str, error: Option<&str>, body: String) -> String {
    match error {
        Some(error) => format!("{title}\n{error}\n\n{body}"),
        None => format!("{title}\n\n{body}"),
    }
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "Nothing here yet.".to_string();
    }
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

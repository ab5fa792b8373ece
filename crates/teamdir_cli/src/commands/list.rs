//! List command implementation.

use super::CommandResult;
use teamdir_core::{search, Member};
use teamdir_sync::{MemberStore, Session};

/// Runs the list command.
pub fn run<S: MemberStore>(session: &Session<S>, term: Option<&str>, format: &str) -> CommandResult {
    let members = search(session.directory().members(), term.unwrap_or(""));

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&members)?);
        }
        _ => {
            print!("{}", render_table(&members));
        }
    }

    Ok(())
}

/// Renders members as an aligned text table.
pub fn render_table(members: &[&Member]) -> String {
    if members.is_empty() {
        return "No members found.\n".to_string();
    }

    let rows: Vec<[String; 6]> = members
        .iter()
        .map(|m| {
            [
                m.emp_id.clone(),
                m.name.clone(),
                m.designation.clone(),
                m.department.to_string(),
                m.tasks.len().to_string(),
                m.skills.len().to_string(),
            ]
        })
        .collect();

    let headers = ["EMP ID", "NAME", "DESIGNATION", "DEPARTMENT", "TASKS", "SKILLS"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&format!("\n{} member(s)\n", rows.len()));
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

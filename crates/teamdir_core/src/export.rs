//! CSV report export.
//!
//! One row per task. Members without tasks get a single row with `N/A` in
//! the task columns. Skill and certification strings are flattened per member
//! and repeated on every row of that member.

use crate::error::{CoreError, CoreResult};
use crate::model::Member;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column headers of the report.
pub const EXPORT_HEADERS: [&str; 11] = [
    "Name",
    "Employee ID",
    "Designation",
    "Department",
    "Task",
    "Client",
    "Role",
    "Duration",
    "Skills",
    "Certifications",
    "Day-to-Day Details",
];

const NOT_APPLICABLE: &str = "N/A";

/// A row of the report, one value per header.
pub type ReportRow = [String; 11];

/// Returns the report file name for a date, e.g. `Internal_Team_Report_2024-05-01.csv`.
pub fn report_filename(date: NaiveDate) -> String {
    format!("Internal_Team_Report_{}.csv", date.format("%Y-%m-%d"))
}

/// A built report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReport {
    rows: Vec<ReportRow>,
}

impl CsvReport {
    /// Builds the report. Fails on an empty member list.
    pub fn build(members: &[Member]) -> CoreResult<Self> {
        if members.is_empty() {
            return Err(CoreError::EmptyExport);
        }

        let mut rows = Vec::new();
        for member in members {
            let skills = member
                .skills
                .iter()
                .map(|s| format!("{} ({})", s.name, s.proficiency))
                .collect::<Vec<_>>()
                .join("; ");
            let certifications = member
                .skills
                .iter()
                .map(|s| s.certifications.as_str())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join("; ");

            let base = |task: [String; 4], day_to_day: String| -> ReportRow {
                let [task_name, client, role, duration] = task;
                [
                    member.name.clone(),
                    member.emp_id.clone(),
                    member.designation.clone(),
                    member.department.to_string(),
                    task_name,
                    client,
                    role,
                    duration,
                    skills.clone(),
                    certifications.clone(),
                    day_to_day,
                ]
            };

            if member.tasks.is_empty() {
                let na = || NOT_APPLICABLE.to_string();
                rows.push(base([na(), na(), na(), na()], na()));
            } else {
                for task in &member.tasks {
                    rows.push(base(
                        [
                            task.name.clone(),
                            task.client.clone(),
                            task.role.clone(),
                            task.duration(),
                        ],
                        task.day_to_day.clone().unwrap_or_default(),
                    ));
                }
            }
        }

        Ok(Self { rows })
    }

    /// Returns the data rows (without the header).
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Renders the report. The header is bare; every data field is quoted.
    pub fn to_csv_string(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(EXPORT_HEADERS.join(","));
        for row in &self.rows {
            let line = row
                .iter()
                .map(|field| quote(field))
                .collect::<Vec<_>>()
                .join(",");
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Writes the report into `dir` under the dated file name.
    pub fn write_to_dir(&self, dir: &Path, date: NaiveDate) -> CoreResult<PathBuf> {
        let path = dir.join(report_filename(date));
        fs::write(&path, self.to_csv_string())?;
        info!(path = %path.display(), rows = self.rows.len(), "report exported");
        Ok(path)
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

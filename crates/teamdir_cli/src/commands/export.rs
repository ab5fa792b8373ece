//! Export command implementation.

use super::CommandResult;
use chrono::{NaiveDate, Utc};
use std::path::Path;
use teamdir_core::CsvReport;
use teamdir_sync::{MemberStore, Session};

/// Runs the export command. The filename carries today's UTC date.
pub fn run<S: MemberStore>(session: &Session<S>, out: &Path) -> CommandResult {
    write_report(session, out, Utc::now().date_naive())
}

fn write_report<S: MemberStore>(session: &Session<S>, out: &Path, date: NaiveDate) -> CommandResult {
    let report = CsvReport::build(session.directory().members())?;
    let path = report.write_to_dir(out, date)?;
    println!("Exported {} row(s) to {}", report.rows().len(), path.display());
    Ok(())
}

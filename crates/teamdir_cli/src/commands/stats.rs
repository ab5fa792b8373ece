//! Stats command implementation.

use super::CommandResult;
use teamdir_core::DirectoryStats;
use teamdir_sync::{MemberStore, Session};

/// Runs the stats command.
pub fn run<S: MemberStore>(session: &Session<S>, format: &str) -> CommandResult {
    let stats = DirectoryStats::compute(session.directory().members());

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        _ => {
            print!("{}", render(&stats));
        }
    }

    Ok(())
}

/// Renders statistics as text.
pub fn render(stats: &DirectoryStats) -> String {
    let mut out = String::new();
    out.push_str("Team Overview\n");
    out.push_str("=============\n");
    out.push_str(&format!("Headcount:       {}\n", stats.headcount));
    out.push_str(&format!("Total projects:  {}\n", stats.total_projects));
    out.push_str(&format!("Core skills:     {}\n", stats.core_skills));
    out.push_str(&format!("Skill density:   {:.1}\n", stats.skill_density));

    if !stats.top_skills.is_empty() {
        out.push_str("\nTop skills\n");
        for skill in &stats.top_skills {
            out.push_str(&format!("  {:<20} {}\n", skill.name, skill.count));
        }
    }

    out.push_str("\nDepartments\n");
    for share in &stats.departments {
        out.push_str(&format!(
            "  {:<14} {:>3}  {:>5.1}%\n",
            share.department.as_str(),
            share.count,
            share.percentage
        ));
    }
    out
}

//! Show command implementation.

use super::{resolve_member, CommandResult};
use teamdir_core::Member;
use teamdir_sync::{MemberStore, Session};

/// Runs the show command.
pub fn run<S: MemberStore>(session: &mut Session<S>, key: &str, format: &str) -> CommandResult {
    let id = resolve_member(session, key)?;
    session.select(&id);
    let member = session
        .directory()
        .get(&id)
        .ok_or_else(|| format!("member not found: {key}"))?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(member)?);
        }
        _ => {
            print!("{}", render_member(member));
        }
    }

    Ok(())
}

/// Renders a member profile with tasks and skills.
pub fn render_member(member: &Member) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} [{}]\n", member.name, member.initials()));
    out.push_str(&format!("  ID:          {}\n", member.id));
    out.push_str(&format!("  Employee ID: {}\n", member.emp_id));
    out.push_str(&format!("  Designation: {}\n", member.designation));
    out.push_str(&format!("  Department:  {}\n", member.department));
    if let Some(summary) = member.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("  Summary:     {summary}\n"));
    }

    out.push_str(&format!("\nProjects ({})\n", member.tasks.len()));
    for task in &member.tasks {
        out.push_str(&format!("  - {} @ {}", task.name, task.client));
        if !task.role.is_empty() {
            out.push_str(&format!(" as {}", task.role));
        }
        out.push_str(&format!(" ({})\n", task.duration()));
        if let Some(text) = task.day_to_day.as_deref().filter(|t| !t.is_empty()) {
            out.push_str(&format!("      {text}\n"));
        }
        out.push_str(&format!("      id: {}\n", task.id));
    }

    out.push_str(&format!("\nSkills ({})\n", member.skills.len()));
    for skill in &member.skills {
        out.push_str(&format!("  - {} ({})", skill.name, skill.proficiency));
        if !skill.certifications.is_empty() {
            out.push_str(&format!(" [{}]", skill.certifications));
        }
        out.push_str(&format!("  id: {}\n", skill.id));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamdir_testkit::sample_members;

    #[test]
    fn renders_profile_tasks_and_skills() {
        let members = sample_members();
        let text = render_member(&members[0]);

        assert!(text.starts_with("Ann Lee [AL]\n"));
        assert!(text.contains("Department:  IT"));
        assert!(text.contains("Summary:     Platform engineering lead"));
        assert!(text.contains("Projects (2)"));
        assert!(text.contains("- Payments API @ Globex as Architect (2024-02 to Ongoing)"));
        assert!(text.contains("- Core banking migration @ Acme as Lead (2023-01 to 2023-12)"));
        assert!(text.contains("Cutover planning"));
        assert!(text.contains("- Rust (Expert) [Rust Foundation]"));
        assert!(text.contains("- SQL (Intermediate)"));
    }

    #[test]
    fn omits_empty_sections() {
        let members = sample_members();
        let text = render_member(&members[2]);
        assert!(!text.contains("Summary:"));
        assert!(text.contains("Projects (0)"));
        assert!(text.contains("Skills (0)"));
    }
}

//! Task, skill and summary commands.

use super::{resolve_member, CommandResult};
use teamdir_core::{Proficiency, RecordId, SkillDraft, TaskDraft};
use teamdir_sync::{MemberStore, Session};

/// Builds a task draft; `to` of `None` marks the task as ongoing.
pub fn task_draft(
    name: String,
    client: String,
    role: String,
    from: String,
    to: Option<String>,
    description: Option<String>,
    day_to_day: Option<String>,
) -> TaskDraft {
    let draft = TaskDraft::new(name, client).with_role(role);
    let mut draft = match to {
        Some(to) => draft.with_period(from, to),
        None => draft.ongoing_since(from),
    };
    draft.description = description;
    if let Some(text) = day_to_day {
        draft = draft.with_day_to_day(text);
    }
    draft
}

/// Adds a task to a member.
pub async fn add_task<S: MemberStore>(
    session: &mut Session<S>,
    key: &str,
    draft: TaskDraft,
) -> CommandResult {
    let member_id = resolve_member(session, key)?;
    let task_id = session.add_task(&member_id, draft).await?;
    println!("Added task {task_id}");
    Ok(())
}

/// Removes a task from a member.
pub async fn remove_task<S: MemberStore>(
    session: &mut Session<S>,
    key: &str,
    task_id: &str,
) -> CommandResult {
    let member_id = resolve_member(session, key)?;
    session
        .remove_task(&member_id, &RecordId::from(task_id))
        .await?;
    println!("Removed task {task_id}");
    Ok(())
}

/// Adds a skill to a member.
pub async fn add_skill<S: MemberStore>(
    session: &mut Session<S>,
    key: &str,
    name: String,
    proficiency: Proficiency,
    certifications: String,
) -> CommandResult {
    let member_id = resolve_member(session, key)?;
    let draft = SkillDraft::new(name, proficiency).with_certifications(certifications);
    let skill_id = session.add_skill(&member_id, draft).await?;
    println!("Added skill {skill_id}");
    Ok(())
}

/// Removes a skill from a member.
pub async fn remove_skill<S: MemberStore>(
    session: &mut Session<S>,
    key: &str,
    skill_id: &str,
) -> CommandResult {
    let member_id = resolve_member(session, key)?;
    session
        .remove_skill(&member_id, &RecordId::from(skill_id))
        .await?;
    println!("Removed skill {skill_id}");
    Ok(())
}

/// Replaces a member's summary.
pub async fn set_summary<S: MemberStore>(
    session: &mut Session<S>,
    key: &str,
    text: String,
) -> CommandResult {
    let member_id = resolve_member(session, key)?;
    session.set_summary(&member_id, text).await?;
    println!("Updated summary for {member_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_period() {
        let draft = task_draft(
            "Audit".into(),
            "Acme".into(),
            "Lead".into(),
            "2023-01".into(),
            Some("2023-06".into()),
            None,
            Some("Fieldwork".into()),
        );
        assert!(!draft.is_ongoing);
        assert_eq!(draft.to, "2023-06");
        assert_eq!(draft.day_to_day.as_deref(), Some("Fieldwork"));
    }

    #[test]
    fn ongoing_task() {
        let draft = task_draft(
            "Audit".into(),
            "Acme".into(),
            String::new(),
            "2024-01".into(),
            None,
            Some("Quarterly review".into()),
            None,
        );
        assert!(draft.is_ongoing);
        assert!(draft.to.is_empty());
        assert_eq!(draft.description.as_deref(), Some("Quarterly review"));
        assert!(draft.validate().is_ok());
    }
}

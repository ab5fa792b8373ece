//! Member add, update and delete commands.

use super::{resolve_member, CommandResult, StdinConfirm};
use teamdir_core::{AlwaysConfirm, Confirm, Department, Member, MemberDraft};
use teamdir_sync::{MemberStore, Session};

/// Profile fields to change; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    /// Full name.
    pub name: Option<String>,
    /// Employee id.
    pub emp_id: Option<String>,
    /// Designation.
    pub designation: Option<String>,
    /// Department.
    pub department: Option<Department>,
}

impl ProfileChanges {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.emp_id.is_none()
            && self.designation.is_none()
            && self.department.is_none()
    }

    /// Applies the changes, rejecting a profile that would fail validation.
    pub fn apply(self, member: &Member) -> CommandResult<Member> {
        let mut updated = member.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(emp_id) = self.emp_id {
            updated.emp_id = emp_id;
        }
        if let Some(designation) = self.designation {
            updated.designation = designation;
        }
        if let Some(department) = self.department {
            updated.department = department;
        }
        MemberDraft::new(
            updated.name.clone(),
            updated.emp_id.clone(),
            updated.designation.clone(),
            updated.department,
        )
        .validate()?;
        Ok(updated)
    }
}

/// Adds a member.
pub async fn add<S: MemberStore>(
    session: &mut Session<S>,
    name: String,
    emp_id: String,
    designation: String,
    department: Department,
    summary: Option<String>,
) -> CommandResult {
    let mut draft = MemberDraft::new(name, emp_id, designation, department);
    if let Some(summary) = summary {
        draft = draft.with_summary(summary);
    }
    let id = session.add_member(draft).await?;
    println!("Added member {id}");
    Ok(())
}

/// Updates a member's profile fields.
pub async fn update<S: MemberStore>(
    session: &mut Session<S>,
    key: &str,
    changes: ProfileChanges,
) -> CommandResult {
    if changes.is_empty() {
        return Err("nothing to update; pass at least one field".into());
    }
    let id = resolve_member(session, key)?;
    let current = session
        .directory()
        .get(&id)
        .ok_or_else(|| format!("member not found: {key}"))?;
    let updated = changes.apply(current)?;
    session.update_member(updated).await;
    println!("Updated member {id}");
    Ok(())
}

/// Deletes a member, asking for confirmation unless `yes` is set.
pub async fn delete<S: MemberStore>(session: &mut Session<S>, key: &str, yes: bool) -> CommandResult {
    let id = resolve_member(session, key)?;
    let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &StdinConfirm };
    if session.delete_member(&id, confirm).await {
        println!("Deleted member {id}");
    } else {
        println!("Deletion cancelled");
    }
    Ok(())
}

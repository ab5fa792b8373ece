//! The in-memory member directory.
//!
//! All mutations go through [`Directory`]. Each mutating call reports a
//! [`Mutation`] telling the caller whether the whole collection must be
//! saved; there is no diffing, a save always rewrites everything.

use crate::error::{CoreError, CoreResult};
use crate::id::RecordId;
use crate::model::{Member, MemberDraft, SkillDraft, TaskDraft};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prompt shown before a member is deleted.
pub const DELETE_PROMPT: &str =
    "Confirm deletion of this resource? Changes will sync immediately.";

/// Interactive confirmation for destructive operations.
pub trait Confirm {
    /// Returns true if the user accepted the prompt.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Outcome of a mutating call.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The collection changed (or may have); a save must follow.
    Applied,
    /// Nothing happened; no save.
    Skipped,
}

impl Mutation {
    /// Returns true if a save must follow.
    pub fn requires_save(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

/// Active view of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Team analytics.
    #[default]
    Dashboard,
    /// Member directory.
    Members,
    /// New member form.
    AddMember,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            View::Dashboard => "dashboard",
            View::Members => "members",
            View::AddMember => "add-member",
        };
        f.write_str(label)
    }
}

/// The member collection plus the view state that mutations touch.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    members: Vec<Member>,
    view: View,
    selected: Option<RecordId>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given members.
    pub fn from_members(members: Vec<Member>) -> Self {
        Self {
            members,
            ..Self::default()
        }
    }

    /// Returns the members in collection order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Looks up a member by identifier.
    pub fn get(&self, id: &RecordId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Looks up a member by identifier, falling back to the employee id.
    ///
    /// Employee ids are not guaranteed unique; the first match wins.
    pub fn find(&self, key: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.id == *key)
            .or_else(|| self.members.iter().find(|m| m.emp_id == key))
    }

    /// Returns the active view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Switches the active view and clears the selection.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.selected = None;
    }

    /// Returns the selected member id.
    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    /// Selects a member for the detail view. Returns false if it does not exist.
    pub fn select(&mut self, id: &RecordId) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replaces the whole collection with a freshly loaded one.
    ///
    /// Used for the bootstrap load; never requires a save.
    pub fn replace_all(&mut self, members: Vec<Member>) {
        self.members = members;
        if let Some(id) = &self.selected {
            if !self.members.iter().any(|m| &m.id == id) {
                self.selected = None;
            }
        }
    }

    /// Adds a member from a draft and switches to the directory view.
    pub fn add(&mut self, draft: MemberDraft) -> CoreResult<RecordId> {
        let member = Member::from_draft(draft)?;
        let id = member.id.clone();
        self.members.push(member);
        self.set_view(View::Members);
        Ok(id)
    }

    /// Replaces the member with the same identifier.
    ///
    /// An unknown identifier leaves the collection untouched but still
    /// requires a save.
    pub fn update(&mut self, member: Member) -> Mutation {
        if let Some(slot) = self.members.iter_mut().find(|m| m.id == member.id) {
            *slot = member;
        }
        Mutation::Applied
    }

    /// Deletes a member after confirmation.
    ///
    /// Clears the selection if it pointed at the deleted member.
    pub fn delete(&mut self, id: &RecordId, confirm: &dyn Confirm) -> Mutation {
        if !confirm.confirm(DELETE_PROMPT) {
            return Mutation::Skipped;
        }
        self.members.retain(|m| &m.id != id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Mutation::Applied
    }

    /// Adds a task at the head of a member's task list.
    pub fn add_task(&mut self, member_id: &RecordId, draft: TaskDraft) -> CoreResult<RecordId> {
        draft.validate()?;
        let mut member = self.cloned(member_id)?;
        let task = draft.into_task();
        let task_id = task.id.clone();
        member.tasks.insert(0, task);
        let _ = self.update(member);
        Ok(task_id)
    }

    /// Removes a task from a member.
    pub fn remove_task(&mut self, member_id: &RecordId, task_id: &RecordId) -> CoreResult<Mutation> {
        let mut member = self.cloned(member_id)?;
        member.tasks.retain(|t| &t.id != task_id);
        Ok(self.update(member))
    }

    /// Adds a skill at the head of a member's skill list.
    pub fn add_skill(&mut self, member_id: &RecordId, draft: SkillDraft) -> CoreResult<RecordId> {
        draft.validate()?;
        let mut member = self.cloned(member_id)?;
        let skill = draft.into_skill();
        let skill_id = skill.id.clone();
        member.skills.insert(0, skill);
        let _ = self.update(member);
        Ok(skill_id)
    }

    /// Removes a skill from a member.
    pub fn remove_skill(
        &mut self,
        member_id: &RecordId,
        skill_id: &RecordId,
    ) -> CoreResult<Mutation> {
        let mut member = self.cloned(member_id)?;
        member.skills.retain(|s| &s.id != skill_id);
        Ok(self.update(member))
    }

    /// Replaces a member's summary.
    pub fn set_summary(
        &mut self,
        member_id: &RecordId,
        summary: impl Into<String>,
    ) -> CoreResult<Mutation> {
        let mut member = self.cloned(member_id)?;
        member.summary = Some(summary.into());
        Ok(self.update(member))
    }

    fn cloned(&self, id: &RecordId) -> CoreResult<Member> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CoreError::MemberNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, Proficiency};

    fn draft(name: &str, emp_id: &str) -> MemberDraft {
        MemberDraft::new(name, emp_id, "Analyst", Department::It)
    }

    #[test]
    fn add_assigns_id_and_switches_view() {
        let mut dir = Directory::new();
        assert_eq!(dir.view(), View::Dashboard);

        let id = dir.add(draft("Ann", "E1")).unwrap();
        let member = dir.get(&id).unwrap();
        assert!(member.tasks.is_empty());
        assert!(member.skills.is_empty());
        assert_eq!(dir.view(), View::Members);
    }

    #[test]
    fn add_appends_in_order() {
        let mut dir = Directory::new();
        dir.add(draft("Ann", "E1")).unwrap();
        dir.add(draft("Bob", "E2")).unwrap();
        let names: Vec<_> = dir.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bob"]);
    }

    #[test]
    fn invalid_draft_is_rejected() {
        let mut dir = Directory::new();
        assert!(dir.add(draft("", "E1")).is_err());
        assert!(dir.is_empty());
        assert_eq!(dir.view(), View::Dashboard);
    }

    #[test]
    fn update_replaces_by_id() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();

        let mut member = dir.get(&id).unwrap().clone();
        member.designation = "Lead".into();
        assert!(dir.update(member).requires_save());
        assert_eq!(dir.get(&id).unwrap().designation, "Lead");
    }

    #[test]
    fn update_of_unknown_member_still_saves() {
        let mut dir = Directory::new();
        dir.add(draft("Ann", "E1")).unwrap();
        let stranger = Member::from_draft(draft("Zed", "E9")).unwrap();

        assert_eq!(dir.update(stranger), Mutation::Applied);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn delete_clears_matching_selection() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();
        assert!(dir.select(&id));

        assert_eq!(dir.delete(&id, &AlwaysConfirm), Mutation::Applied);
        assert!(dir.is_empty());
        assert!(dir.selected().is_none());
    }

    #[test]
    fn delete_keeps_other_selection() {
        let mut dir = Directory::new();
        let ann = dir.add(draft("Ann", "E1")).unwrap();
        let bob = dir.add(draft("Bob", "E2")).unwrap();
        dir.select(&bob);

        let _ = dir.delete(&ann, &AlwaysConfirm);
        assert_eq!(dir.selected(), Some(&bob));
    }

    #[test]
    fn refused_delete_is_skipped() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();

        let refuse = |_: &str| false;
        assert_eq!(dir.delete(&id, &refuse), Mutation::Skipped);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn delete_prompt_is_shown() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();
        let seen = std::cell::RefCell::new(String::new());
        let record = |prompt: &str| {
            *seen.borrow_mut() = prompt.to_string();
            true
        };
        let _ = dir.delete(&id, &record);
        assert_eq!(seen.borrow().as_str(), DELETE_PROMPT);
    }

    #[test]
    fn view_change_clears_selection() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();
        dir.select(&id);
        dir.set_view(View::Dashboard);
        assert!(dir.selected().is_none());
        assert!(!dir.select(&RecordId::from("missing")));
    }

    #[test]
    fn tasks_and_skills_insert_at_head() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();

        dir.add_task(&id, TaskDraft::new("First", "Acme")).unwrap();
        let second = dir.add_task(&id, TaskDraft::new("Second", "Globex")).unwrap();
        dir.add_skill(&id, SkillDraft::new("Rust", Proficiency::Expert))
            .unwrap();
        dir.add_skill(&id, SkillDraft::new("SQL", Proficiency::Beginner))
            .unwrap();

        let member = dir.get(&id).unwrap();
        assert_eq!(member.tasks[0].id, second);
        assert_eq!(member.tasks[1].name, "First");
        assert_eq!(member.skills[0].name, "SQL");
    }

    #[test]
    fn remove_task_and_skill() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();
        let task = dir.add_task(&id, TaskDraft::new("Audit", "Acme")).unwrap();
        let skill = dir
            .add_skill(&id, SkillDraft::new("Excel", Proficiency::Intermediate))
            .unwrap();

        assert!(dir.remove_task(&id, &task).unwrap().requires_save());
        assert!(dir.remove_skill(&id, &skill).unwrap().requires_save());
        let member = dir.get(&id).unwrap();
        assert!(member.tasks.is_empty());
        assert!(member.skills.is_empty());
    }

    #[test]
    fn detail_edits_need_existing_member() {
        let mut dir = Directory::new();
        let missing = RecordId::from("nope");
        assert!(matches!(
            dir.add_task(&missing, TaskDraft::new("A", "B")),
            Err(CoreError::MemberNotFound(_))
        ));
        assert!(dir.set_summary(&missing, "x").is_err());
    }

    #[test]
    fn set_summary() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();
        let _ = dir.set_summary(&id, "Ten years in audit").unwrap();
        assert_eq!(
            dir.get(&id).unwrap().summary.as_deref(),
            Some("Ten years in audit")
        );
    }

    #[test]
    fn find_by_id_or_employee_id() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();
        assert_eq!(dir.find(id.as_str()).unwrap().name, "Ann");
        assert_eq!(dir.find("E1").unwrap().id, id);
        assert!(dir.find("E2").is_none());
    }

    #[test]
    fn replace_all_drops_stale_selection() {
        let mut dir = Directory::new();
        let id = dir.add(draft("Ann", "E1")).unwrap();
        dir.select(&id);
        dir.replace_all(Vec::new());
        assert!(dir.selected().is_none());
    }
}

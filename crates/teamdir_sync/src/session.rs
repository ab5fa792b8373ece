//! A directory bound to a store.
//!
//! Every mutation is applied in memory first and then the whole collection
//! is saved. A failed save is recorded in the tracker and never rolls the
//! mutation back; the next successful save carries it.

use crate::error::SyncResult;
use crate::status::{SyncStatus, SyncTracker};
use crate::store::{MemberStore, StoreMode};
use std::sync::Arc;
use teamdir_core::{
    Confirm, Directory, Member, MemberDraft, Mutation, RecordId, SkillDraft, TaskDraft, View,
};
use tracing::debug;

/// Owns the in-memory directory and keeps it saved.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    tracker: Arc<SyncTracker>,
    directory: Directory,
    bootstrapped: bool,
}

impl<S: MemberStore> Session<S> {
    /// Creates a session with an empty directory. Call [`Session::bootstrap`]
    /// before mutating; saves are suppressed until it has run.
    pub fn new(store: S) -> Self {
        Self {
            store,
            tracker: Arc::new(SyncTracker::new()),
            directory: Directory::new(),
            bootstrapped: false,
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store mode.
    pub fn mode(&self) -> StoreMode {
        self.store.mode()
    }

    /// Returns the directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Returns the shared status tracker.
    pub fn tracker(&self) -> Arc<SyncTracker> {
        Arc::clone(&self.tracker)
    }

    /// Returns the published sync status.
    pub fn status(&self) -> SyncStatus {
        self.tracker.snapshot()
    }

    /// Returns true once the bootstrap load has finished.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Loads the collection.
    ///
    /// Never saves. Bootstrap is marked complete whatever the outcome; on
    /// failure the directory is left as it was.
    pub async fn bootstrap(&mut self) -> SyncResult<()> {
        let result = self.store.load(&self.tracker).await;
        self.bootstrapped = true;
        let members = result?;
        self.directory.replace_all(members);
        Ok(())
    }

    /// Saves the whole collection. Does nothing before bootstrap.
    pub async fn save(&self) -> SyncResult<()> {
        if !self.bootstrapped {
            debug!("Skipping save before bootstrap");
            return Ok(());
        }
        self.store
            .save(self.directory.members(), &self.tracker)
            .await
    }

    async fn persist(&self, mutation: Mutation) {
        if mutation.requires_save() {
            // The store already logged and recorded the failure.
            let _ = self.save().await;
        }
    }

    /// Adds a member and saves.
    pub async fn add_member(&mut self, draft: MemberDraft) -> SyncResult<RecordId> {
        let id = self.directory.add(draft)?;
        self.persist(Mutation::Applied).await;
        Ok(id)
    }

    /// Replaces a member and saves.
    pub async fn update_member(&mut self, member: Member) {
        let mutation = self.directory.update(member);
        self.persist(mutation).await;
    }

    /// Deletes a member after confirmation and saves.
    ///
    /// Returns false, without saving, if the confirmation was refused.
    pub async fn delete_member(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        let mutation = self.directory.delete(id, confirm);
        self.persist(mutation).await;
        mutation.requires_save()
    }

    /// Adds a task to a member and saves.
    pub async fn add_task(&mut self, member_id: &RecordId, draft: TaskDraft) -> SyncResult<RecordId> {
        let id = self.directory.add_task(member_id, draft)?;
        self.persist(Mutation::Applied).await;
        Ok(id)
    }

    /// Removes a task from a member and saves.
    pub async fn remove_task(&mut self, member_id: &RecordId, task_id: &RecordId) -> SyncResult<()> {
        let mutation = self.directory.remove_task(member_id, task_id)?;
        self.persist(mutation).await;
        Ok(())
    }

    /// Adds a skill to a member and saves.
    pub async fn add_skill(
        &mut self,
        member_id: &RecordId,
        draft: SkillDraft,
    ) -> SyncResult<RecordId> {
        let id = self.directory.add_skill(member_id, draft)?;
        self.persist(Mutation::Applied).await;
        Ok(id)
    }

    /// Removes a skill from a member and saves.
    pub async fn remove_skill(
        &mut self,
        member_id: &RecordId,
        skill_id: &RecordId,
    ) -> SyncResult<()> {
        let mutation = self.directory.remove_skill(member_id, skill_id)?;
        self.persist(mutation).await;
        Ok(())
    }

    /// Replaces a member's summary and saves.
    pub async fn set_summary(
        &mut self,
        member_id: &RecordId,
        summary: impl Into<String>,
    ) -> SyncResult<()> {
        let mutation = self.directory.set_summary(member_id, summary)?;
        self.persist(mutation).await;
        Ok(())
    }

    /// Selects a member for the detail view.
    pub fn select(&mut self, id: &RecordId) -> bool {
        self.directory.select(id)
    }

    /// Switches the active view.
    pub fn set_view(&mut self, view: View) {
        self.directory.set_view(view);
    }
}

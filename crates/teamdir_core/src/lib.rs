//! # teamdir Core
//!
//! In-memory model of the team directory.
//!
//! This crate provides:
//! - Member, task and skill records with their JSON wire format
//! - The directory: add/update/delete plus member-detail edits and view state
//! - The file codec (pretty JSON wrapped in base64)
//! - CSV report export
//! - Dashboard statistics and search
//!
//! ## Key Invariants
//!
//! - The directory is the single source of truth during a session
//! - Every mutation reports whether a save must follow
//! - New tasks and skills are inserted at the head of their sequence

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod codec;
mod directory;
mod error;
mod export;
mod id;
mod model;
mod search;
mod stats;

pub use codec::{decode_content, decode_members, encode_content, encode_members};
pub use directory::{AlwaysConfirm, Confirm, Directory, Mutation, View, DELETE_PROMPT};
pub use error::{CoreError, CoreResult};
pub use export::{report_filename, CsvReport, ReportRow, EXPORT_HEADERS};
pub use id::RecordId;
pub use model::{
    Department, Member, MemberDraft, Proficiency, Skill, SkillDraft, Task, TaskDraft,
};
pub use search::{matches_term, search};
pub use stats::{DepartmentShare, DirectoryStats, SkillCount};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

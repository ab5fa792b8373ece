//! # teamdir Testkit
//!
//! Shared test utilities:
//! - Fixtures: small, realistic directories
//! - Generators: proptest strategies for members, tasks and skills

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use fixtures::{member_with_tasks, sample_directory, sample_members};
pub use generators::{member_strategy, members_strategy, skill_strategy, task_strategy};

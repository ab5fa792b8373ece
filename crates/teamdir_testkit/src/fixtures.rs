//! Test fixtures.
//!
//! Provides small directories with fixed content for scenario tests.

use teamdir_core::{
    Department, Directory, Member, MemberDraft, Proficiency, RecordId, SkillDraft, TaskDraft,
};

/// Builds a directory with three members:
///
/// - Ann Lee (IT): two tasks, two skills, one certified
/// - Bob Stone (Audit): no tasks, one skill
/// - Cy Park (OPS): no tasks, no skills
pub fn sample_directory() -> Directory {
    let mut dir = Directory::new();

    let ann = dir
        .add(
            MemberDraft::new("Ann Lee", "EMP-001", "Senior Analyst", Department::It)
                .with_summary("Platform engineering lead"),
        )
        .expect("valid fixture");
    dir.add_task(
        &ann,
        TaskDraft::new("Core banking migration", "Acme")
            .with_role("Lead")
            .with_period("2023-01", "2023-12")
            .with_day_to_day("Cutover planning"),
    )
    .expect("valid fixture");
    dir.add_task(
        &ann,
        TaskDraft::new("Payments API", "Globex")
            .with_role("Architect")
            .ongoing_since("2024-02"),
    )
    .expect("valid fixture");
    dir.add_skill(
        &ann,
        SkillDraft::new("Rust", Proficiency::Expert).with_certifications("Rust Foundation"),
    )
    .expect("valid fixture");
    dir.add_skill(&ann, SkillDraft::new("SQL", Proficiency::Intermediate))
        .expect("valid fixture");

    let bob = dir
        .add(MemberDraft::new(
            "Bob Stone",
            "EMP-002",
            "Auditor",
            Department::Audit,
        ))
        .expect("valid fixture");
    dir.add_skill(
        &bob,
        SkillDraft::new("IFRS", Proficiency::Expert).with_certifications("ACCA"),
    )
    .expect("valid fixture");

    dir.add(MemberDraft::new("Cy Park", "EMP-003", "Clerk", Department::Ops))
        .expect("valid fixture");

    dir
}

/// Returns the members of [`sample_directory`].
pub fn sample_members() -> Vec<Member> {
    sample_directory().members().to_vec()
}

/// Builds a single member with `tasks` tasks and two skills.
pub fn member_with_tasks(tasks: usize) -> (Directory, RecordId) {
    let mut dir = Directory::new();
    let id = dir
        .add(MemberDraft::new(
            "Dee Quinn",
            "EMP-100",
            "Consultant",
            Department::FrontOffice,
        ))
        .expect("valid fixture");
    for i in 0..tasks {
        dir.add_task(
            &id,
            TaskDraft::new(format!("Project {i}"), format!("Client {i}")).with_role("Member"),
        )
        .expect("valid fixture");
    }
    dir.add_skill(
        &id,
        SkillDraft::new("Excel", Proficiency::Expert).with_certifications("MOS"),
    )
    .expect("valid fixture");
    dir.add_skill(&id, SkillDraft::new("Negotiation", Proficiency::Beginner))
        .expect("valid fixture");
    (dir, id)
}

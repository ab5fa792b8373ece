//! Property-based test generators using proptest.
//!
//! Text strategies include quotes, commas, newlines and non-ASCII characters
//! so codec and export properties see awkward input.

use proptest::prelude::*;
use teamdir_core::{Department, Member, Proficiency, RecordId, Skill, Task};

/// Strategy for free text, including characters that need escaping.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ,\"'\\n\u{e9}\u{4e2d}\u{1f600}-]{0,24}")
        .expect("Invalid regex")
}

/// Strategy for identifiers.
pub fn record_id_strategy() -> impl Strategy<Value = RecordId> {
    prop::string::string_regex("[a-f0-9]{8}(-[a-f0-9]{4}){0,3}")
        .expect("Invalid regex")
        .prop_map(RecordId::from_string)
}

/// Strategy for departments.
pub fn department_strategy() -> impl Strategy<Value = Department> {
    prop::sample::select(Department::ALL.to_vec())
}

/// Strategy for proficiency levels.
pub fn proficiency_strategy() -> impl Strategy<Value = Proficiency> {
    prop_oneof![
        Just(Proficiency::Beginner),
        Just(Proficiency::Intermediate),
        Just(Proficiency::Expert),
    ]
}

/// Strategy for tasks.
pub fn task_strategy() -> impl Strategy<Value = Task> {
    (
        record_id_strategy(),
        (text_strategy(), text_strategy(), text_strategy()),
        (text_strategy(), text_strategy(), any::<bool>()),
        (
            prop::option::of(text_strategy()),
            prop::option::of(text_strategy()),
        ),
    )
        .prop_map(
            |(id, (name, client, role), (from, to, is_ongoing), (description, day_to_day))| Task {
                id,
                name,
                client,
                role,
                from,
                to,
                is_ongoing,
                description,
                day_to_day,
            },
        )
}

/// Strategy for skills.
pub fn skill_strategy() -> impl Strategy<Value = Skill> {
    (
        record_id_strategy(),
        text_strategy(),
        proficiency_strategy(),
        text_strategy(),
    )
        .prop_map(|(id, name, proficiency, certifications)| Skill {
            id,
            name,
            proficiency,
            certifications,
        })
}

/// Strategy for members with up to four tasks and four skills.
pub fn member_strategy() -> impl Strategy<Value = Member> {
    (
        record_id_strategy(),
        (text_strategy(), text_strategy(), text_strategy()),
        department_strategy(),
        prop::collection::vec(task_strategy(), 0..4),
        prop::collection::vec(skill_strategy(), 0..4),
        prop::option::of(text_strategy()),
    )
        .prop_map(
            |(id, (emp_id, name, designation), department, tasks, skills, summary)| Member {
                id,
                emp_id,
                name,
                designation,
                department,
                tasks,
                skills,
                summary,
            },
        )
}

/// Strategy for whole collections.
pub fn members_strategy() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec(member_strategy(), 0..6)
}

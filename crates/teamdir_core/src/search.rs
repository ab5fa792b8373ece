//! Directory search.

use crate::model::Member;

/// Returns true if the member matches a search term.
///
/// Matches case-insensitively on name, employee id, any skill name or any
/// task client. An empty term matches everyone.
pub fn matches_term(member: &Member, term: &str) -> bool {
    let needle = term.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    hit(&member.name)
        || hit(&member.emp_id)
        || member.skills.iter().any(|s| hit(&s.name))
        || member.tasks.iter().any(|t| hit(&t.client))
}

/// Filters members by a search term, keeping collection order.
pub fn search<'a>(members: &'a [Member], term: &str) -> Vec<&'a Member> {
    members.iter().filter(|m| matches_term(m, term)).collect()
}

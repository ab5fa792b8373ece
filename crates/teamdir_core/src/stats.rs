//! Dashboard statistics.

use crate::model::{Department, Member};
use serde::Serialize;
use std::collections::HashMap;

const TOP_SKILLS: usize = 10;

/// How often a normalized skill name occurs across members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    /// Skill name, trimmed and uppercased.
    pub name: String,
    /// Number of member skills with this name.
    pub count: usize,
}

/// Share of members in one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentShare {
    /// Department.
    pub department: Department,
    /// Number of members.
    pub count: usize,
    /// Percentage of the headcount (0-100).
    pub percentage: f64,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryStats {
    /// Number of members.
    pub headcount: usize,
    /// Total number of tasks.
    pub total_projects: usize,
    /// Distinct normalized skill names.
    pub core_skills: usize,
    /// Average skills per member, rounded to one decimal.
    pub skill_density: f64,
    /// Most common skills, descending.
    pub top_skills: Vec<SkillCount>,
    /// Members per department.
    pub departments: Vec<DepartmentShare>,
}

impl DirectoryStats {
    /// Computes statistics over a member list.
    pub fn compute(members: &[Member]) -> Self {
        let headcount = members.len();
        let total_projects = members.iter().map(|m| m.tasks.len()).sum();
        let total_skills: usize = members.iter().map(|m| m.skills.len()).sum();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for skill in members.iter().flat_map(|m| &m.skills) {
            *counts.entry(normalize(&skill.name)).or_default() += 1;
        }
        let core_skills = counts.len();

        let mut top_skills: Vec<SkillCount> = counts
            .into_iter()
            .map(|(name, count)| SkillCount { name, count })
            .collect();
        top_skills.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        top_skills.truncate(TOP_SKILLS);

        let skill_density = if headcount == 0 {
            0.0
        } else {
            round_one(total_skills as f64 / headcount as f64)
        };

        let departments = Department::ALL
            .iter()
            .map(|&department| {
                let count = members.iter().filter(|m| m.department == department).count();
                let percentage = if headcount == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / headcount as f64
                };
                DepartmentShare {
                    department,
                    count,
                    percentage,
                }
            })
            .collect();

        Self {
            headcount,
            total_projects,
            core_skills,
            skill_density,
            top_skills,
            departments,
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! Member, task and skill records.
//!
//! Field names on the wire follow the stored JSON file (`empId`, `isOngoing`,
//! `dayToDay`, ...). Optional fields are omitted when absent.

use crate::error::{CoreError, CoreResult};
use crate::id::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Department a member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    /// Information technology.
    #[serde(rename = "IT")]
    It,
    /// Audit.
    #[serde(rename = "Audit")]
    Audit,
    /// Operations.
    #[serde(rename = "OPS")]
    Ops,
    /// Front office.
    #[serde(rename = "FRONT OFFICE")]
    FrontOffice,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 4] = [
        Department::It,
        Department::Audit,
        Department::Ops,
        Department::FrontOffice,
    ];

    /// Returns the label used in the stored file and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::Audit => "Audit",
            Department::Ops => "OPS",
            Department::FrontOffice => "FRONT OFFICE",
        }
    }
}

impl Default for Department {
    fn default() -> Self {
        Department::It
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['_', '-'], " ").to_uppercase();
        match normalized.as_str() {
            "IT" => Ok(Department::It),
            "AUDIT" => Ok(Department::Audit),
            "OPS" => Ok(Department::Ops),
            "FRONT OFFICE" | "FRONTOFFICE" => Ok(Department::FrontOffice),
            _ => Err(CoreError::validation(
                "department",
                format!("unknown department '{s}' (expected IT, Audit, OPS or FRONT OFFICE)"),
            )),
        }
    }
}

/// Skill proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    /// Beginner.
    Beginner,
    /// Intermediate.
    Intermediate,
    /// Expert.
    Expert,
}

impl Proficiency {
    /// Returns the label used in the stored file and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Expert => "Expert",
        }
    }
}

impl Default for Proficiency {
    fn default() -> Self {
        Proficiency::Beginner
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Proficiency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Proficiency::Beginner),
            "intermediate" => Ok(Proficiency::Intermediate),
            "expert" => Ok(Proficiency::Expert),
            _ => Err(CoreError::validation(
                "proficiency",
                format!("unknown proficiency '{s}' (expected Beginner, Intermediate or Expert)"),
            )),
        }
    }
}

/// A project assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task identifier.
    pub id: RecordId,
    /// Project or task name.
    pub name: String,
    /// Client the work is for.
    pub client: String,
    /// Role on the project.
    #[serde(default)]
    pub role: String,
    /// Start period.
    #[serde(default)]
    pub from: String,
    /// End period, ignored while ongoing.
    #[serde(default)]
    pub to: String,
    /// Whether the assignment is still running.
    #[serde(default)]
    pub is_ongoing: bool,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Day-to-day narrative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_to_day: Option<String>,
}

impl Task {
    /// Formats the assignment period, e.g. `2024-01 to Ongoing`.
    pub fn duration(&self) -> String {
        let end = if self.is_ongoing {
            "Ongoing"
        } else {
            self.to.as_str()
        };
        format!("{} to {}", self.from, end)
    }
}

/// A skill held by a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill identifier.
    pub id: RecordId,
    /// Skill name.
    pub name: String,
    /// Proficiency level.
    pub proficiency: Proficiency,
    /// Free-text certifications.
    #[serde(default)]
    pub certifications: String,
}

/// A team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member identifier.
    pub id: RecordId,
    /// Human-assigned employee identifier.
    pub emp_id: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub designation: String,
    /// Department.
    pub department: Department,
    /// Assignments, newest first.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Skills, newest first.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Free-text profile summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Member {
    /// Creates a member from a validated draft with a fresh identifier.
    pub fn from_draft(draft: MemberDraft) -> CoreResult<Self> {
        draft.validate()?;
        Ok(Self {
            id: RecordId::new(),
            emp_id: draft.emp_id,
            name: draft.name,
            designation: draft.designation,
            department: draft.department,
            tasks: Vec::new(),
            skills: Vec::new(),
            summary: draft.summary,
        })
    }

    /// Returns up to two uppercase initials of the member's name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Input for creating a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    /// Employee identifier.
    pub emp_id: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub designation: String,
    /// Department.
    pub department: Department,
    /// Optional summary.
    pub summary: Option<String>,
}

impl MemberDraft {
    /// Creates a draft with the required fields.
    pub fn new(
        name: impl Into<String>,
        emp_id: impl Into<String>,
        designation: impl Into<String>,
        department: Department,
    ) -> Self {
        Self {
            emp_id: emp_id.into(),
            name: name.into(),
            designation: designation.into(),
            department,
            summary: None,
        }
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Checks that name and employee id are present.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("member", "name is required"));
        }
        if self.emp_id.trim().is_empty() {
            return Err(CoreError::validation("member", "employee id is required"));
        }
        Ok(())
    }
}

/// Input for adding a task to a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Project or task name.
    pub name: String,
    /// Client.
    pub client: String,
    /// Role.
    pub role: String,
    /// Start period.
    pub from: String,
    /// End period.
    pub to: String,
    /// Still running.
    pub is_ongoing: bool,
    /// Description.
    pub description: Option<String>,
    /// Day-to-day narrative.
    pub day_to_day: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with name and client.
    pub fn new(name: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client: client.into(),
            ..Self::default()
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets a closed period.
    pub fn with_period(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = from.into();
        self.to = to.into();
        self.is_ongoing = false;
        self
    }

    /// Marks the task as ongoing since `from`.
    pub fn ongoing_since(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self.to.clear();
        self.is_ongoing = true;
        self
    }

    /// Sets the day-to-day narrative.
    pub fn with_day_to_day(mut self, text: impl Into<String>) -> Self {
        self.day_to_day = Some(text.into());
        self
    }

    /// Checks that name and client are present.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("task", "name is required"));
        }
        if self.client.trim().is_empty() {
            return Err(CoreError::validation("task", "client is required"));
        }
        Ok(())
    }

    pub(crate) fn into_task(self) -> Task {
        Task {
            id: RecordId::new(),
            name: self.name,
            client: self.client,
            role: self.role,
            from: self.from,
            to: self.to,
            is_ongoing: self.is_ongoing,
            description: self.description,
            day_to_day: self.day_to_day,
        }
    }
}

/// Input for adding a skill to a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDraft {
    /// Skill name.
    pub name: String,
    /// Proficiency.
    pub proficiency: Proficiency,
    /// Certifications.
    pub certifications: String,
}

impl SkillDraft {
    /// Creates a draft.
    pub fn new(name: impl Into<String>, proficiency: Proficiency) -> Self {
        Self {
            name: name.into(),
            proficiency,
            certifications: String::new(),
        }
    }

    /// Sets the certifications text.
    pub fn with_certifications(mut self, certifications: impl Into<String>) -> Self {
        self.certifications = certifications.into();
        self
    }

    /// Checks that the name is present.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("skill", "name is required"));
        }
        Ok(())
    }

    pub(crate) fn into_skill(self) -> Skill {
        Skill {
            id: RecordId::new(),
            name: self.name,
            proficiency: self.proficiency,
            certifications: self.certifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_labels_round_trip() {
        for dept in Department::ALL {
            assert_eq!(dept.as_str().parse::<Department>().unwrap(), dept);
            let json = serde_json::to_string(&dept).unwrap();
            assert_eq!(json, format!("\"{}\"", dept.as_str()));
        }
        assert_eq!(
            "front_office".parse::<Department>().unwrap(),
            Department::FrontOffice
        );
        assert!("Sales".parse::<Department>().is_err());
    }

    #[test]
    fn proficiency_parse_is_case_insensitive() {
        assert_eq!("EXPERT".parse::<Proficiency>().unwrap(), Proficiency::Expert);
        assert!("guru".parse::<Proficiency>().is_err());
    }

    #[test]
    fn member_wire_format_uses_camel_case() {
        let member = Member {
            id: RecordId::from("m1"),
            emp_id: "EMP-1".into(),
            name: "Ada Lovelace".into(),
            designation: "Analyst".into(),
            department: Department::FrontOffice,
            tasks: vec![Task {
                id: RecordId::from("t1"),
                name: "Ledger".into(),
                client: "Acme".into(),
                role: "Lead".into(),
                from: "2024-01".into(),
                to: String::new(),
                is_ongoing: true,
                description: None,
                day_to_day: Some("Reconciliation".into()),
            }],
            skills: vec![],
            summary: None,
        };

        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["empId"], "EMP-1");
        assert_eq!(value["department"], "FRONT OFFICE");
        assert_eq!(value["tasks"][0]["isOngoing"], true);
        assert_eq!(value["tasks"][0]["dayToDay"], "Reconciliation");
        assert!(value.get("summary").is_none());
        assert!(value["tasks"][0].get("description").is_none());
    }

    #[test]
    fn member_decodes_without_sequences() {
        let json = r#"{"id":"m1","empId":"E1","name":"A","designation":"D","department":"OPS"}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.tasks.is_empty());
        assert!(member.skills.is_empty());
        assert_eq!(member.department, Department::Ops);
    }

    #[test]
    fn task_duration() {
        let task = TaskDraft::new("Ledger", "Acme")
            .with_period("2023-01", "2023-06")
            .into_task();
        assert_eq!(task.duration(), "2023-01 to 2023-06");

        let task = TaskDraft::new("Ledger", "Acme")
            .ongoing_since("2024-02")
            .into_task();
        assert_eq!(task.duration(), "2024-02 to Ongoing");
    }

    #[test]
    fn drafts_require_fields() {
        assert!(MemberDraft::new("", "E1", "", Department::It).validate().is_err());
        assert!(MemberDraft::new("Ann", " ", "", Department::It).validate().is_err());
        assert!(TaskDraft::new("Ledger", "").validate().is_err());
        assert!(SkillDraft::new("  ", Proficiency::Expert).validate().is_err());
    }

    #[test]
    fn initials() {
        let member = Member::from_draft(MemberDraft::new(
            "grace brewster hopper",
            "E2",
            "Engineer",
            Department::It,
        ))
        .unwrap();
        assert_eq!(member.initials(), "GB");
    }
}

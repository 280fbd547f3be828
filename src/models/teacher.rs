//! Teacher record model shared with the portal front end.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Employment status of a teacher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TeacherStatus {
    #[default]
    Active,
    Inactive,
}

impl TeacherStatus {
    pub const ALL: [TeacherStatus; 2] = [TeacherStatus::Active, TeacherStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeacherStatus::Active => "Active",
            TeacherStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(TeacherStatus::Active),
            "Inactive" => Some(TeacherStatus::Inactive),
            _ => None,
        }
    }
}

/// Portal role assigned to a teacher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TeacherRole {
    Admin,
    #[default]
    Teacher,
    Staff,
}

impl TeacherRole {
    pub const ALL: [TeacherRole; 3] = [TeacherRole::Admin, TeacherRole::Teacher, TeacherRole::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeacherRole::Admin => "Admin",
            TeacherRole::Teacher => "Teacher",
            TeacherRole::Staff => "Staff",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(TeacherRole::Admin),
            "Teacher" => Some(TeacherRole::Teacher),
            "Staff" => Some(TeacherRole::Staff),
            _ => None,
        }
    }
}

/// A teacher record as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub status: TeacherStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TeacherRole>,
}

/// Attributes of a teacher that has not been assigned an id yet.
///
/// Used as the add-teacher draft. Starts out empty with status `Active`
/// and role `Teacher`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub status: TeacherStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub role: TeacherRole,
}

impl NewTeacher {
    /// Check the fields the add-teacher form marks as required.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Subject", &self.subject),
            ("Department", &self.department),
            ("Phone", &self.phone),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", label)));
            }
        }

        if !is_valid_email(&self.email) {
            return Err(AppError::Validation(format!(
                "Email '{}' is not a valid address",
                self.email
            )));
        }

        Ok(())
    }

    pub fn into_teacher(self, id: String) -> Teacher {
        Teacher {
            id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            status: self.status,
            avatar: self.avatar.filter(|a| !a.is_empty()),
            last_active: self.last_active.filter(|s| !s.is_empty()),
            join_date: self.join_date.filter(|s| !s.is_empty()),
            phone: Some(self.phone),
            department: Some(self.department),
            role: Some(self.role),
        }
    }
}

/// Partial update applied to a dialog's working copy.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<TeacherStatus>,
    #[serde(default)]
    pub last_active: Option<String>,
    #[serde(default)]
    pub join_date: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<TeacherRole>,
}

impl TeacherPatch {
    pub fn apply_to_teacher(self, teacher: &mut Teacher) {
        if let Some(name) = self.name {
            teacher.name = name;
        }
        if let Some(email) = self.email {
            teacher.email = email;
        }
        if let Some(subject) = self.subject {
            teacher.subject = subject;
        }
        if let Some(status) = self.status {
            teacher.status = status;
        }
        if let Some(last_active) = self.last_active {
            teacher.last_active = non_empty(last_active);
        }
        if let Some(join_date) = self.join_date {
            teacher.join_date = non_empty(join_date);
        }
        if let Some(phone) = self.phone {
            teacher.phone = non_empty(phone);
        }
        if let Some(department) = self.department {
            teacher.department = non_empty(department);
        }
        if self.role.is_some() {
            teacher.role = self.role;
        }
    }

    pub fn apply_to_draft(self, draft: &mut NewTeacher) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        if let Some(subject) = self.subject {
            draft.subject = subject;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(last_active) = self.last_active {
            draft.last_active = non_empty(last_active);
        }
        if let Some(join_date) = self.join_date {
            draft.join_date = non_empty(join_date);
        }
        if let Some(phone) = self.phone {
            draft.phone = phone;
        }
        if let Some(department) = self.department {
            draft.department = department;
        }
        if let Some(role) = self.role {
            draft.role = role;
        }
    }
}

/// A cleared form field is stored as absent.
fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Loose `local@domain` check equivalent to an HTML email input.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.split('.').all(|label| !label.is_empty())
}

//! Initial portal contents injected at construction.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Teacher, TeacherRole, TeacherStatus};
use crate::errors::AppError;

/// The signed-in administrator shown in the profile dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub name: String,
    pub email: String,
}

impl Default for AdminProfile {
    fn default() -> Self {
        Self {
            name: "Admin User".to_string(),
            email: "admin@school.edu".to_string(),
        }
    }
}

/// Seed records and profile handed to a new portal.
#[derive(Debug, Clone)]
pub struct PortalSeed {
    pub teachers: Vec<Teacher>,
    pub admin: AdminProfile,
}

impl Default for PortalSeed {
    fn default() -> Self {
        Self {
            teachers: default_teachers(),
            admin: AdminProfile::default(),
        }
    }
}

impl PortalSeed {
    /// Read a JSON array of teacher records from disk.
    pub fn load_teachers(path: &Path) -> Result<Vec<Teacher>, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read seed file {:?}: {}", path, e))
        })?;
        let teachers: Vec<Teacher> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Invalid seed file {:?}: {}", path, e))
        })?;
        check_unique_ids(&teachers)?;
        Ok(teachers)
    }
}

pub(crate) fn check_unique_ids(teachers: &[Teacher]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for teacher in teachers {
        if !seen.insert(teacher.id.as_str()) {
            return Err(AppError::Config(format!(
                "Duplicate teacher id '{}' in seed data",
                teacher.id
            )));
        }
    }
    Ok(())
}

/// The three records the portal ships with.
pub fn default_teachers() -> Vec<Teacher> {
    vec![
        seed(
            "1",
            "Vivek",
            "Mathematics",
            TeacherStatus::Active,
            "https://randomuser.me/api/portraits/men/32.jpg",
            "2 hours ago",
            "2020-01-15",
            "+91 8978101934",
            "CSE",
            TeacherRole::Admin,
        ),
        seed(
            "2",
            "Ramana",
            "English",
            TeacherStatus::Inactive,
            "https://randomuser.me/api/portraits/men/75.jpg",
            "3 days ago",
            "2021-03-10",
            "+91 7095991234",
            "Humanities",
            TeacherRole::Teacher,
        ),
        seed(
            "3",
            "Prakash",
            "Science",
            TeacherStatus::Active,
            "https://randomuser.me/api/portraits/men/36.jpg",
            "3 hours ago",
            "2021-03-10",
            "+91 7799421234",
            "ISE",
            TeacherRole::Teacher,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    subject: &str,
    status: TeacherStatus,
    avatar: &str,
    last_active: &str,
    join_date: &str,
    phone: &str,
    department: &str,
    role: TeacherRole,
) -> Teacher {
    Teacher {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@school.edu", name.to_lowercase()),
        subject: subject.to_string(),
        status,
        avatar: Some(avatar.to_string()),
        last_active: Some(last_active.to_string()),
        join_date: Some(join_date.to_string()),
        phone: Some(phone.to_string()),
        department: Some(department.to_string()),
        role: Some(role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_seed() {
        let seed = PortalSeed::default();
        assert_eq!(seed.teachers.len(), 3);
        assert_eq!(seed.teachers[0].email, "vivek@school.edu");
        assert_eq!(seed.teachers[1].status, TeacherStatus::Inactive);
        assert_eq!(seed.admin.email, "admin@school.edu");
        assert!(check_unique_ids(&seed.teachers).is_ok());
    }

    #[test]
    fn test_load_teachers_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"a1","name":"Meera","email":"meera@school.edu","subject":"Physics","status":"Active","role":"Staff"}}]"#
        )
        .unwrap();

        let teachers = PortalSeed::load_teachers(file.path()).unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].role, Some(TeacherRole::Staff));
        assert!(teachers[0].phone.is_none());
    }

    #[test]
    fn test_load_teachers_rejects_duplicate_ids() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"1","name":"A","email":"a@x","subject":"S","status":"Active"}},
               {{"id":"1","name":"B","email":"b@x","subject":"S","status":"Active"}}]"#
        )
        .unwrap();

        let err = PortalSeed::load_teachers(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_teachers_missing_file() {
        let err = PortalSeed::load_teachers(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}

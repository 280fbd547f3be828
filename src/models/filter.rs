//! Filter criteria narrowing the visible teacher list.

use serde::{Deserialize, Serialize};

use super::{TeacherRole, TeacherStatus};
use crate::errors::AppError;

/// Conjunctive filter criteria. Empty fields place no constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TeacherStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TeacherRole>,
}

impl FilterCriteria {
    /// Apply a patch on top of these criteria, validating enum values.
    pub fn merged(&self, patch: &FilterPatch) -> Result<Self, AppError> {
        let mut next = self.clone();
        if let Some(search) = &patch.search {
            next.search = search.clone();
        }
        if let Some(subject) = &patch.subject {
            next.subject = subject.clone();
        }
        if let Some(status) = &patch.status {
            next.status = parse_optional(status, TeacherStatus::parse, "status")?;
        }
        if let Some(role) = &patch.role {
            next.role = parse_optional(role, TeacherRole::parse, "role")?;
        }
        Ok(next)
    }
}

/// Selector values as submitted by the filter panel or query string.
///
/// An empty string resets the corresponding criterion.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.subject.is_none() && self.status.is_none() && self.role.is_none()
    }
}

fn parse_optional<T>(
    value: &str,
    parse: fn(&str) -> Option<T>,
    field: &str,
) -> Result<Option<T>, AppError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse(value)
        .map(Some)
        .ok_or_else(|| AppError::Validation(format!("Unknown {} '{}'", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sets_and_clears() {
        let criteria = FilterCriteria::default();
        let patch = FilterPatch {
            status: Some("Inactive".to_string()),
            role: Some("Admin".to_string()),
            ..FilterPatch::default()
        };
        let merged = criteria.merged(&patch).unwrap();
        assert_eq!(merged.status, Some(TeacherStatus::Inactive));
        assert_eq!(merged.role, Some(TeacherRole::Admin));
        assert!(merged.search.is_empty());

        let clear = FilterPatch {
            status: Some(String::new()),
            ..FilterPatch::default()
        };
        let cleared = merged.merged(&clear).unwrap();
        assert_eq!(cleared.status, None);
        assert_eq!(cleared.role, Some(TeacherRole::Admin));
    }

    #[test]
    fn test_merge_rejects_unknown_enum() {
        let patch = FilterPatch {
            role: Some("Janitor".to_string()),
            ..FilterPatch::default()
        };
        let err = FilterCriteria::default().merged(&patch).unwrap_err();
        assert_eq!(err, AppError::Validation("Unknown role 'Janitor'".to_string()));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(FilterPatch::default().is_empty());
        // An explicit empty string still counts, it clears the field.
        let patch = FilterPatch {
            subject: Some(String::new()),
            ..FilterPatch::default()
        };
        assert!(!patch.is_empty());
    }
}

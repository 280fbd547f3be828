//! Filtered projections over the teacher list.
//!
//! Everything here is a pure function of the record slice and the criteria,
//! recomputed on every read.

use std::collections::HashSet;

use crate::models::{FilterCriteria, Teacher, TeacherRole, TeacherStatus};

/// Records matching every non-empty criterion, in original order.
///
/// The search query is matched case-insensitively as a substring of the
/// name or the email.
pub fn filter_teachers(teachers: &[Teacher], criteria: &FilterCriteria) -> Vec<Teacher> {
    let query = criteria.search.to_lowercase();
    teachers
        .iter()
        .filter(|teacher| matches(teacher, criteria, &query))
        .cloned()
        .collect()
}

fn matches(teacher: &Teacher, criteria: &FilterCriteria, query: &str) -> bool {
    let matches_search = teacher.name.to_lowercase().contains(query)
        || teacher.email.to_lowercase().contains(query);
    let matches_subject = criteria.subject.is_empty() || teacher.subject == criteria.subject;
    let matches_status = criteria.status.is_none_or(|status| teacher.status == status);
    let matches_role = criteria.role.is_none_or(|role| teacher.role == Some(role));

    matches_search && matches_subject && matches_status && matches_role
}

/// Distinct subjects in order of first occurrence.
pub fn subject_options(teachers: &[Teacher]) -> Vec<String> {
    let mut seen = HashSet::new();
    teachers
        .iter()
        .filter(|t| seen.insert(t.subject.as_str()))
        .map(|t| t.subject.clone())
        .collect()
}

pub fn role_options() -> Vec<TeacherRole> {
    TeacherRole::ALL.to_vec()
}

pub fn status_options() -> Vec<TeacherStatus> {
    TeacherStatus::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_teachers;

    fn names(teachers: &[Teacher]) -> Vec<&str> {
        teachers.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let teachers = default_teachers();
        let view = filter_teachers(&teachers, &FilterCriteria::default());
        assert_eq!(view, teachers);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_and_email() {
        let teachers = default_teachers();
        let by_name = FilterCriteria {
            search: "VIVEK".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&filter_teachers(&teachers, &by_name)), ["Vivek"]);

        let by_email = FilterCriteria {
            search: "ana@SCHOOL".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&filter_teachers(&teachers, &by_email)), ["Ramana"]);

        let everyone = FilterCriteria {
            search: "school.edu".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_teachers(&teachers, &everyone).len(), 3);
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let teachers = default_teachers();
        let criteria = FilterCriteria {
            status: Some(TeacherStatus::Active),
            role: Some(TeacherRole::Teacher),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&filter_teachers(&teachers, &criteria)), ["Prakash"]);

        let none = FilterCriteria {
            subject: "English".to_string(),
            status: Some(TeacherStatus::Active),
            ..FilterCriteria::default()
        };
        assert!(filter_teachers(&teachers, &none).is_empty());
    }

    #[test]
    fn test_membership_matches_every_criterion() {
        let teachers = default_teachers();
        let subjects = ["", "Mathematics", "English", "Science", "Art"];
        let statuses = [None, Some(TeacherStatus::Active), Some(TeacherStatus::Inactive)];
        let roles = [
            None,
            Some(TeacherRole::Admin),
            Some(TeacherRole::Teacher),
            Some(TeacherRole::Staff),
        ];
        let searches = ["", "a", "PRAK", "zzz"];

        for subject in subjects {
            for status in statuses {
                for role in roles {
                    for search in searches {
                        let criteria = FilterCriteria {
                            search: search.to_string(),
                            subject: subject.to_string(),
                            status,
                            role,
                        };
                        let view = filter_teachers(&teachers, &criteria);
                        for teacher in &teachers {
                            let q = search.to_lowercase();
                            let expected = (teacher.name.to_lowercase().contains(&q)
                                || teacher.email.to_lowercase().contains(&q))
                                && (subject.is_empty() || teacher.subject == subject)
                                && status.is_none_or(|s| teacher.status == s)
                                && role.is_none_or(|r| teacher.role == Some(r));
                            assert_eq!(view.contains(teacher), expected, "{:?}", criteria);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_filter_is_pure() {
        let teachers = default_teachers();
        let snapshot = teachers.clone();
        let criteria = FilterCriteria {
            search: "a".to_string(),
            ..FilterCriteria::default()
        };

        let first = filter_teachers(&teachers, &criteria);
        let second = filter_teachers(&teachers, &criteria);
        assert_eq!(first, second);
        assert_eq!(teachers, snapshot);
    }

    #[test]
    fn test_role_filter_excludes_records_without_role() {
        let mut teachers = default_teachers();
        teachers[2].role = None;
        let criteria = FilterCriteria {
            role: Some(TeacherRole::Teacher),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&filter_teachers(&teachers, &criteria)), ["Ramana"]);
    }

    #[test]
    fn test_subject_options_first_occurrence_order() {
        let mut teachers = default_teachers();
        let mut extra = teachers[0].clone();
        extra.id = "4".to_string();
        teachers.push(extra);

        assert_eq!(
            subject_options(&teachers),
            ["Mathematics", "English", "Science"]
        );

        teachers.retain(|t| t.subject != "English");
        assert_eq!(subject_options(&teachers), ["Mathematics", "Science"]);
    }

    #[test]
    fn test_static_options() {
        assert_eq!(
            role_options(),
            [TeacherRole::Admin, TeacherRole::Teacher, TeacherRole::Staff]
        );
        assert_eq!(
            status_options(),
            [TeacherStatus::Active, TeacherStatus::Inactive]
        );
    }
}

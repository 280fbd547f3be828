//! In-memory teacher store.
//!
//! The store is the only owner of teacher records. Every successful mutation
//! bumps the revision id reported to clients.

mod ids;

pub use ids::*;

use crate::errors::AppError;
use crate::models::{NewTeacher, Teacher};

/// Ordered collection of teacher records with unique ids.
#[derive(Debug, Clone)]
pub struct TeacherStore {
    teachers: Vec<Teacher>,
    ids: IdGenerator,
    revision_id: u64,
}

impl TeacherStore {
    /// Seeds must already have unique ids.
    pub fn new(seed: Vec<Teacher>, strategy: IdStrategy) -> Result<Self, AppError> {
        let ids = IdGenerator::new(strategy, seed.iter().map(|t| t.id.as_str()))?;
        Ok(Self {
            teachers: seed,
            ids,
            revision_id: 0,
        })
    }

    pub fn revision_id(&self) -> u64 {
        self.revision_id
    }

    pub fn len(&self) -> usize {
        self.teachers.len()
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn get(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Append a new record under a fresh id.
    pub fn add(&mut self, data: NewTeacher) -> Result<Teacher, AppError> {
        let teachers = &self.teachers;
        let id = self
            .ids
            .next_id(|candidate| teachers.iter().any(|t| t.id == candidate))?;
        let teacher = data.into_teacher(id);

        self.teachers.push(teacher.clone());
        self.revision_id += 1;

        tracing::info!(id = %teacher.id, name = %teacher.name, "Teacher added");
        Ok(teacher)
    }

    /// Replace the record with the same id. Returns false if none matched.
    pub fn edit(&mut self, teacher: Teacher) -> bool {
        let Some(slot) = self.teachers.iter_mut().find(|t| t.id == teacher.id) else {
            tracing::debug!(id = %teacher.id, "Edit ignored, no such teacher");
            return false;
        };

        tracing::info!(id = %teacher.id, "Teacher updated");
        *slot = teacher;
        self.revision_id += 1;
        true
    }

    /// Remove the record with `id`, returning it if it was present.
    pub fn delete(&mut self, id: &str) -> Option<Teacher> {
        let index = self.teachers.iter().position(|t| t.id == id)?;
        let removed = self.teachers.remove(index);
        self.revision_id += 1;

        tracing::info!(id = %removed.id, name = %removed.name, "Teacher deleted");
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_teachers, TeacherStatus};

    fn store() -> TeacherStore {
        TeacherStore::new(default_teachers(), IdStrategy::Sequential).unwrap()
    }

    fn draft(name: &str) -> NewTeacher {
        NewTeacher {
            name: name.to_string(),
            email: format!("{}@school.edu", name.to_lowercase()),
            subject: "History".to_string(),
            phone: "+91 9000000000".to_string(),
            department: "Humanities".to_string(),
            ..NewTeacher::default()
        }
    }

    #[test]
    fn test_add_grows_by_one_with_unique_id() {
        let mut store = store();
        let added = store.add(draft("Test")).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(added.id, "4");
        assert_eq!(store.list().iter().filter(|t| t.id == added.id).count(), 1);
        assert_eq!(store.list().last().unwrap().name, "Test");
        assert_eq!(store.revision_id(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = store();
        store.delete("2");
        let first = store.add(draft("First")).unwrap();
        let second = store.add(draft("Second")).unwrap();

        // Length-derived ids would have produced "3" and collided with Prakash.
        assert_eq!(first.id, "4");
        assert_eq!(second.id, "5");

        store.delete(&second.id);
        let third = store.add(draft("Third")).unwrap();
        assert_eq!(third.id, "6");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = store();
        let removed = store.delete("1").unwrap();
        assert_eq!(removed.name, "Vivek");
        let after_first = store.list().to_vec();
        let revision = store.revision_id();

        assert!(store.delete("1").is_none());
        assert_eq!(store.list(), after_first.as_slice());
        assert_eq!(store.revision_id(), revision);
    }

    #[test]
    fn test_edit_replaces_only_matching_record() {
        let mut store = store();
        let before = store.list().to_vec();

        let mut changed = store.get("2").unwrap().clone();
        changed.status = TeacherStatus::Active;
        changed.name = "Ramana K".to_string();
        assert!(store.edit(changed.clone()));

        assert_eq!(store.get("2"), Some(&changed));
        assert_eq!(store.list()[0], before[0]);
        assert_eq!(store.list()[2], before[2]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let mut store = store();
        let before = store.list().to_vec();
        let mut ghost = before[0].clone();
        ghost.id = "99".to_string();

        assert!(!store.edit(ghost));
        assert_eq!(store.list(), before.as_slice());
        assert_eq!(store.revision_id(), 0);
    }
}

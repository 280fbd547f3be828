//! Identifier generation for new teacher records.

use std::str::FromStr;

use crate::errors::AppError;

/// How fresh teacher ids are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Monotonic counter, never reused after deletes.
    #[default]
    Sequential,
    /// Random UUID v4.
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(IdStrategy::Sequential),
            "uuid" => Ok(IdStrategy::Uuid),
            other => Err(AppError::Config(format!("Unknown id strategy '{}'", other))),
        }
    }
}

/// Produces ids that do not depend on the current collection size.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: u64,
}

impl IdGenerator {
    /// Start past the largest numeric id among `existing`.
    pub fn new<'a>(
        strategy: IdStrategy,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, AppError> {
        let next = match existing
            .into_iter()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
        {
            Some(max) => match (max.checked_add(1), strategy) {
                (Some(next), _) => next,
                // The counter is never consulted for UUIDs.
                (None, IdStrategy::Uuid) => max,
                (None, IdStrategy::Sequential) => {
                    return Err(AppError::Config(format!(
                        "Seed id {} leaves no room for new sequential ids",
                        max
                    )))
                }
            },
            None => 1,
        };
        Ok(Self { strategy, next })
    }

    /// Next id for which `in_use` returns false.
    pub fn next_id(&mut self, in_use: impl Fn(&str) -> bool) -> Result<String, AppError> {
        loop {
            let candidate = match self.strategy {
                IdStrategy::Sequential => {
                    let id = self.next;
                    self.next = id.checked_add(1).ok_or_else(|| {
                        AppError::Internal("Sequential teacher ids exhausted".to_string())
                    })?;
                    id.to_string()
                }
                IdStrategy::Uuid => uuid::Uuid::new_v4().to_string(),
            };
            if !in_use(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_starts_after_max() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential, ["1", "7", "abc", "3"]).unwrap();
        assert_eq!(ids.next_id(|_| false).unwrap(), "8");
        assert_eq!(ids.next_id(|_| false).unwrap(), "9");
    }

    #[test]
    fn test_sequential_empty_starts_at_one() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential, Vec::<&str>::new()).unwrap();
        assert_eq!(ids.next_id(|_| false).unwrap(), "1");
    }

    #[test]
    fn test_skips_ids_in_use() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential, ["1"]).unwrap();
        assert_eq!(ids.next_id(|id| id == "2" || id == "3").unwrap(), "4");
    }

    #[test]
    fn test_largest_seed_id_rejected() {
        let max = u64::MAX.to_string();
        let err = IdGenerator::new(IdStrategy::Sequential, [max.as_str()]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let mut ids = IdGenerator::new(IdStrategy::Uuid, [max.as_str()]).unwrap();
        assert!(ids.next_id(|_| false).is_ok());
    }

    #[test]
    fn test_counter_exhaustion_is_an_error() {
        let near_max = (u64::MAX - 1).to_string();
        let mut ids = IdGenerator::new(IdStrategy::Sequential, [near_max.as_str()]).unwrap();
        assert!(matches!(ids.next_id(|_| false), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_uuid_strategy() {
        let mut ids = IdGenerator::new(IdStrategy::Uuid, ["1"]).unwrap();
        let id = ids.next_id(|_| false).unwrap();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("UUID".parse::<IdStrategy>().unwrap(), IdStrategy::Uuid);
        assert_eq!(
            "sequential".parse::<IdStrategy>().unwrap(),
            IdStrategy::Sequential
        );
        assert!("random".parse::<IdStrategy>().is_err());
    }
}

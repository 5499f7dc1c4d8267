// Priority assignment for newly enqueued jobs

use super::error::{DomainError, Result};
use super::job::{NewJob, Priority};

/// Highest priority reported by an empty store
pub const EMPTY_QUEUE_PRIORITY: Priority = 0;

/// Number a batch of descriptions after the current highest priority.
///
/// The i-th description (0-based) gets `highest + 1 + i`, so submission
/// order becomes priority order and every value is strictly above `highest`.
/// Fails instead of wrapping when the batch would run past `Priority::MAX`.
pub fn assign_priorities<S>(highest: Priority, descriptions: &[S]) -> Result<Vec<NewJob>>
where
    S: AsRef<str>,
{
    let overflow = || DomainError::PriorityOverflow {
        highest,
        count: descriptions.len(),
    };

    let mut next = highest.checked_add(1).ok_or_else(overflow)?;
    let mut jobs = Vec::with_capacity(descriptions.len());

    for (i, description) in descriptions.iter().enumerate() {
        if i > 0 {
            next = next.checked_add(1).ok_or_else(overflow)?;
        }
        jobs.push(NewJob::new(description.as_ref(), next));
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_starts_at_one() {
        let jobs = assign_priorities(EMPTY_QUEUE_PRIORITY, &["x", "y"]).unwrap();

        assert_eq!(jobs, vec![NewJob::new("x", 1), NewJob::new("y", 2)]);
    }

    #[test]
    fn test_continues_after_highest() {
        let jobs = assign_priorities(41, &["a", "b", "c"]).unwrap();
        let priorities: Vec<_> = jobs.iter().map(|j| j.priority).collect();

        assert_eq!(priorities, vec![42, 43, 44]);
    }

    #[test]
    fn test_negative_highest() {
        let jobs = assign_priorities(-5, &["a"]).unwrap();
        assert_eq!(jobs[0].priority, -4);
    }

    #[test]
    fn test_empty_batch() {
        let jobs = assign_priorities::<&str>(10, &[]).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_duplicate_descriptions_kept() {
        let jobs = assign_priorities(0, &["same", "same"]).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].description, jobs[1].description);
        assert!(jobs[0].priority < jobs[1].priority);
    }

    #[test]
    fn test_overflow_rejected() {
        let err = assign_priorities(Priority::MAX - 1, &["a", "b"]).unwrap_err();

        assert_eq!(
            err,
            DomainError::PriorityOverflow {
                highest: Priority::MAX - 1,
                count: 2
            }
        );
    }

    #[test]
    fn test_fills_up_to_max() {
        let jobs = assign_priorities(Priority::MAX - 2, &["a", "b"]).unwrap();
        assert_eq!(jobs[1].priority, Priority::MAX);
    }
}

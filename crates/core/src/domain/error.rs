// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Priority overflow: cannot append {count} jobs after priority {highest}")]
    PriorityOverflow { highest: i64, count: usize },
}

pub type Result<T> = std::result::Result<T, DomainError>;

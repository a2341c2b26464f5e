//! Error types for clause database construction

use crate::sat::literal::Variable;
use thiserror::Error;

/// Clause database errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseDbError {
    #[error("empty clause cannot be stored")]
    EmptyClause,

    #[error("unit clause on variable {0} belongs on the trail, not in the clause database")]
    UnitClause(Variable),

    #[error("variable {var} out of range: database has {num_vars} variables")]
    VariableOutOfRange { var: Variable, num_vars: usize },

    #[error("literal on variable {0} appears twice in the same clause")]
    DuplicateLiteral(Variable),

    #[error("clause contains both polarities of variable {0}")]
    Tautology(Variable),

    #[error("no long clause at offset {0}")]
    UnknownClause(u32),

    #[error("clause arena is full")]
    ArenaExhausted,
}

/// Result type for clause database operations
pub type ClauseDbResult<T> = Result<T, ClauseDbError>;

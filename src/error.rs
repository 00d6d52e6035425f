// Error taxonomy for the move decision core

use thiserror::Error;

/// Failures that prevent a move decision from being made at all
///
/// Running out of safe moves is not an error: the selector always falls back
/// to some direction. Only input that cannot describe a board is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("unknown agent '{0}' is not present on the board")]
    UnknownAgent(String),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

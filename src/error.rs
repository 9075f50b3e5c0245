use std::fmt;

/// Why a game command was refused. A refused command never changes the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The command's precondition does not hold; carries a short reason
    /// suitable for a status line.
    InvalidMove(&'static str),
    /// Tried to deal with no cards left in the stock. Restore it instead.
    EmptyStock,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidMove(reason) => write!(f, "Invalid move: {}", reason),
            MoveError::EmptyStock => write!(f, "No cards left in stock"),
        }
    }
}

impl std::error::Error for MoveError {}

//! Reducer output shared by task, column and workflow commands

use crate::types::BoardState;

/// What a command computed from the current board.
///
/// `state` is `None` when the command leaves the board as it was, in which
/// case nothing is swapped in or persisted.
#[derive(Debug, Clone)]
pub struct Reduction<T> {
    pub state: Option<BoardState>,
    pub output: T,
}

impl<T> Reduction<T> {
    pub fn changed(state: BoardState, output: T) -> Self {
        Self {
            state: Some(state),
            output,
        }
    }

    pub fn unchanged(output: T) -> Self {
        Self {
            state: None,
            output,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.state.is_some()
    }
}

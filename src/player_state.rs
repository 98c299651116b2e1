//! The player's mutable game state: which cells are open/flagged, the overall game
//! status, and flag mode.

use crate::board::{Board, CellState};

/// Tracks whether the game is still being played, has been cleared, or has hit a
/// mine. Transitions are monotone within a single game; [`Operation::RestartOperation`](crate::operation::Operation::RestartOperation)
/// resets back to `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Cleared,
    Over,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub game_status: GameStatus,
    pub cell_states: Board<CellState>,
    pub flag_mode: bool,
}

//! The operations a Mines program is made of, and the result of applying a click to
//! the player.

use crate::board::Cell;

/// One line of a program's trailing operation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    NoOperation,
    SwitchOperation,
    RestartOperation,
    ClickOperation { cell: Cell, is_left_button: bool },
}

/// What happened when cells were opened (or attempted to be opened).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenResult {
    /// A mine was among the cells; nothing was opened, the game is over.
    Over,
    /// The cells opened by flood-fill, in BFS order.
    Cells(Vec<Cell>),
}

/// The outcome of one [`Operation::ClickOperation`], recorded by the player so the
/// command selector can inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickResult {
    pub previous_cell_state: crate::board::CellState,
    pub is_left_click: bool,
    pub clicked_cell: Cell,
    pub open_result: Option<OpenResult>,
}

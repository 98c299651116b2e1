//! A parsed Mines program: the immutable digit board and the operation list that
//! drives it.

use crate::board::{Board, CellDigit};
use crate::operation::Operation;

#[derive(Debug, Clone)]
pub struct Program {
    pub cell_digits: Board<CellDigit>,
    pub operation_list: Vec<Operation>,
}

//! Maps `(operation, player's last click result, clicked cell's digit)` to exactly one
//! [`Command`]. A closed set of matches, not a lookup table: the original interpreter's
//! dict-of-dicts dispatch ported to Rust's pattern matching.

use crate::board::CellState;
use crate::command::table::{self, Command};
use crate::command::types::CommandName;
use crate::io::InputSource;
use crate::operation::{ClickResult, OpenResult, Operation};
use crate::player::Player;
use std::io::Write;

fn select_click_on_opened_command<S: InputSource, W: Write>(
    click_result: &ClickResult,
    clicked_digit: u8,
) -> Command<S, W> {
    if let Some(open_result) = &click_result.open_result {
        return match open_result {
            OpenResult::Over => table::reset_r(),
            OpenResult::Cells(_) => table::push_sum(),
        };
    }

    if click_result.is_left_click {
        match clicked_digit {
            0 => table::pop(),
            1 => table::positive(),
            2 => table::dup(),
            3 => table::add(),
            4 => table::sub(),
            5 => table::mul(),
            6 => table::div(),
            7 => table::modulo(),
            8 => table::perform_l(),
            _ => unreachable!("digit 9 on an opened cell cannot occur"),
        }
    } else {
        match clicked_digit {
            0 => table::push_n(),
            1 => table::not(),
            2 => table::roll(),
            3 => table::in_n(),
            4 => table::in_c(),
            5 => table::out_n(),
            6 => table::out_c(),
            7 => table::skip(),
            8 => table::perform_r(),
            _ => unreachable!("digit 9 on an opened cell cannot occur"),
        }
    }
}

fn select_click_command<S: InputSource, W: Write>(
    cell: crate::board::Cell,
    player: &Player,
) -> Command<S, W> {
    let click_result = player
        .last_click_result()
        .expect("command selector only runs after perform_operation(ClickOperation)");
    let clicked_digit = player.cell_digit(cell);

    match click_result.previous_cell_state {
        CellState::Unopened => {
            if click_result.is_left_click {
                match clicked_digit {
                    0 => table::push_count(),
                    9 => table::reset_l(),
                    _ => table::push_n(),
                }
            } else {
                table::swap()
            }
        }
        CellState::Flagged => {
            if click_result.is_left_click {
                table::noop()
            } else {
                table::swap()
            }
        }
        CellState::Opened => select_click_on_opened_command(click_result, clicked_digit),
    }
}

/// Picks the command a just-performed operation triggers. Must be called only after
/// [`Player::perform_operation`] so `player.last_click_result()` reflects `operation`.
pub fn select_command<S: InputSource, W: Write>(
    operation: Operation,
    player: &Player,
) -> Command<S, W> {
    match operation {
        Operation::NoOperation | Operation::RestartOperation => table::noop(),
        Operation::SwitchOperation => table::reverse(),
        Operation::ClickOperation { cell, .. } => select_click_command(cell, player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, BoardSize, CELL_DIGIT_MINE};

    fn digit_board(width: usize, height: usize, digit: u8) -> Board<u8> {
        Board::new(BoardSize::new(width, height), |_| digit)
    }

    #[test]
    fn no_operation_and_restart_select_noop() {
        let player = Player::new(digit_board(2, 2, 0));
        assert_eq!(
            select_command::<crate::io::EchoInputSource, Vec<u8>>(Operation::NoOperation, &player)
                .name,
            CommandName::Noop
        );
        assert_eq!(
            select_command::<crate::io::EchoInputSource, Vec<u8>>(
                Operation::RestartOperation,
                &player
            )
            .name,
            CommandName::Noop
        );
    }

    #[test]
    fn switch_selects_reverse() {
        let player = Player::new(digit_board(2, 2, 0));
        assert_eq!(
            select_command::<crate::io::EchoInputSource, Vec<u8>>(
                Operation::SwitchOperation,
                &player
            )
            .name,
            CommandName::Reverse
        );
    }

    #[test]
    fn unopened_left_click_on_zero_selects_push_count() {
        let mut player = Player::new(digit_board(2, 2, 0));
        let op = Operation::ClickOperation {
            cell: (0, 0),
            is_left_button: true,
        };
        player.perform_operation(op);
        assert_eq!(
            select_command::<crate::io::EchoInputSource, Vec<u8>>(op, &player).name,
            CommandName::PushCount
        );
    }

    #[test]
    fn unopened_left_click_on_mine_selects_reset_l() {
        let mut player = Player::new(digit_board(1, 1, CELL_DIGIT_MINE));
        let op = Operation::ClickOperation {
            cell: (0, 0),
            is_left_button: true,
        };
        player.perform_operation(op);
        assert_eq!(
            select_command::<crate::io::EchoInputSource, Vec<u8>>(op, &player).name,
            CommandName::ResetL
        );
    }

    #[test]
    fn unopened_right_click_selects_swap() {
        let mut player = Player::new(digit_board(2, 2, 0));
        let op = Operation::ClickOperation {
            cell: (0, 0),
            is_left_button: false,
        };
        player.perform_operation(op);
        assert_eq!(
            select_command::<crate::io::EchoInputSource, Vec<u8>>(op, &player).name,
            CommandName::Swap
        );
    }

    #[test]
    fn opened_left_click_digit_three_selects_add() {
        // A lone mine at (1,1) on a 3x3 board gives every non-mine cell digit 1,
        // except corners/edges not adjacent to it; use a denser layout instead.
        let size = BoardSize::new(3, 3);
        let mines = [(0, 0), (2, 0), (0, 2)];
        let board = Board::new(size, |cell| {
            if mines.contains(&cell) {
                CELL_DIGIT_MINE
            } else {
                mines
                    .iter()
                    .filter(|&&m| size.iter_adjacent_cells(cell).any(|n| n == m))
                    .count() as u8
            }
        });
        let mut player = Player::new(board);
        assert_eq!(player.cell_digit((1, 1)), 3);
        let op = Operation::ClickOperation {
            cell: (1, 1),
            is_left_button: true,
        };
        player.perform_operation(op); // opens the cell
        player.perform_operation(op); // clicks it again, now opened
        assert_eq!(
            select_command::<crate::io::EchoInputSource, Vec<u8>>(op, &player).name,
            CommandName::Add
        );
    }
}

//! The player: owns the board's cell-state grid and resolves clicks (open, flag,
//! chord) against the immutable digit board, via BFS flood-fill.

use crate::board::{Board, BoardSize, Cell, CellDigit, CellState, CELL_DIGIT_MINE};
use crate::operation::{ClickResult, OpenResult, Operation};
use crate::player_state::{GameStatus, PlayerState};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Player {
    board_size: BoardSize,
    cell_digits: Board<CellDigit>,
    mine_number: usize,

    player_state: PlayerState,
    rest_mine_count: isize,
    rest_safe_count: usize,
    last_click_result: Option<ClickResult>,
}

impl Player {
    pub fn new(cell_digits: Board<CellDigit>) -> Self {
        let board_size = cell_digits.size();
        let mine_number = cell_digits
            .iter_values()
            .filter(|&digit| digit == CELL_DIGIT_MINE)
            .count();
        let initial_safe_count = board_size.width * board_size.height - mine_number;

        let player_state = PlayerState {
            game_status: GameStatus::Playing,
            cell_states: Board::new(board_size, |_| CellState::Unopened),
            flag_mode: false,
        };

        Player {
            board_size,
            cell_digits,
            mine_number,
            player_state,
            rest_mine_count: mine_number as isize,
            rest_safe_count: initial_safe_count,
            last_click_result: None,
        }
    }

    /// Opens `cells` via BFS flood-fill through digit-0 regions, or declares the game
    /// over if any of them is a mine. Mirrors the opening procedure of the
    /// [`MineSweeper::open`](crate) implementations this crate was derived from.
    fn open_or_over(&mut self, cells: impl IntoIterator<Item = Cell>) -> OpenResult {
        let mut queue: VecDeque<Cell> = cells.into_iter().collect();

        if queue
            .iter()
            .any(|&cell| self.cell_digits.get(cell) == CELL_DIGIT_MINE)
        {
            self.player_state.game_status = GameStatus::Over;
            return OpenResult::Over;
        }

        let mut opened = Vec::new();
        while let Some(cell) = queue.pop_front() {
            if self.player_state.cell_states.get(cell) != CellState::Unopened {
                continue;
            }
            self.player_state.cell_states.set(cell, CellState::Opened);
            self.rest_safe_count -= 1;
            opened.push(cell);

            if self.cell_digits.get(cell) == 0 {
                queue.extend(self.board_size.iter_adjacent_cells(cell));
            }
        }

        if self.rest_safe_count == 0 {
            self.player_state.game_status = GameStatus::Cleared;
        }

        OpenResult::Cells(opened)
    }

    /// A right-click on an opened cell chords: if the flagged neighbour count equals
    /// the cell's digit, every unopened neighbour is returned as safe to open.
    fn chord_cells(&self, cell: Cell) -> Vec<Cell> {
        let mut unopened = Vec::new();
        let mut flagged_count = 0usize;
        for next in self.board_size.iter_adjacent_cells(cell) {
            match self.player_state.cell_states.get(next) {
                CellState::Unopened => unopened.push(next),
                CellState::Flagged => flagged_count += 1,
                CellState::Opened => {}
            }
        }
        if flagged_count as CellDigit == self.cell_digits.get(cell) {
            unopened
        } else {
            Vec::new()
        }
    }

    fn perform_click(&mut self, cell: Cell, is_left_button: bool) {
        let previous_cell_state = self.player_state.cell_states.get(cell);
        let is_left_click = is_left_button ^ self.player_state.flag_mode;
        let mut open_result = None;

        match previous_cell_state {
            CellState::Unopened => {
                if is_left_click {
                    open_result = Some(self.open_or_over([cell]));
                } else {
                    self.player_state.cell_states.set(cell, CellState::Flagged);
                    self.rest_mine_count -= 1;
                }
            }
            CellState::Flagged => {
                if !is_left_click {
                    self.player_state.cell_states.set(cell, CellState::Unopened);
                    self.rest_mine_count += 1;
                }
            }
            CellState::Opened => {
                if !is_left_click {
                    let chord_cells = self.chord_cells(cell);
                    if !chord_cells.is_empty() {
                        open_result = Some(self.open_or_over(chord_cells));
                    }
                }
            }
        }

        self.last_click_result = Some(ClickResult {
            previous_cell_state,
            is_left_click,
            clicked_cell: cell,
            open_result,
        });
    }

    fn perform_switch(&mut self) {
        self.player_state.flag_mode ^= true;
    }

    fn perform_restart(&mut self) {
        let board_size = self.board_size;
        for cell in board_size.iter_cells() {
            self.player_state.cell_states.set(cell, CellState::Unopened);
        }
        self.rest_mine_count = self.mine_number as isize;
        self.rest_safe_count = board_size.width * board_size.height - self.mine_number;
        self.player_state.game_status = GameStatus::Playing;
    }

    pub fn perform_operation(&mut self, operation: Operation) {
        self.last_click_result = None;
        match operation {
            Operation::ClickOperation { cell, is_left_button } => {
                self.perform_click(cell, is_left_button);
            }
            Operation::SwitchOperation => self.perform_switch(),
            Operation::RestartOperation => self.perform_restart(),
            Operation::NoOperation => {}
        }
    }

    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    pub fn cell_digit(&self, cell: Cell) -> CellDigit {
        self.cell_digits.get(cell)
    }

    pub fn mine_number(&self) -> usize {
        self.mine_number
    }

    pub fn player_state(&self) -> &PlayerState {
        &self.player_state
    }

    pub fn game_status(&self) -> GameStatus {
        self.player_state.game_status
    }

    pub fn rest_mine_count(&self) -> isize {
        self.rest_mine_count
    }

    pub fn rest_safe_count(&self) -> usize {
        self.rest_safe_count
    }

    pub fn last_click_result(&self) -> Option<&ClickResult> {
        self.last_click_result.as_ref()
    }

    /// Implements "safe first click" for a game front-end: swaps in a new digit
    /// board, but only while still `Playing`, with a matching size and mine count,
    /// and without changing the digit under any cell that is already open. Returns
    /// whether the replacement happened.
    pub fn replace_cell_digits_safely(&mut self, cell_digits: Board<CellDigit>) -> bool {
        if self.player_state.game_status != GameStatus::Playing {
            return false;
        }
        if cell_digits.size() != self.board_size {
            return false;
        }
        let new_mine_count = cell_digits
            .iter_values()
            .filter(|&digit| digit == CELL_DIGIT_MINE)
            .count();
        if new_mine_count != self.mine_number {
            return false;
        }
        for cell in self.board_size.iter_cells() {
            if self.player_state.cell_states.get(cell) != CellState::Opened {
                continue;
            }
            if cell_digits.get(cell) != self.cell_digits.get(cell) {
                return false;
            }
        }
        self.cell_digits = cell_digits;
        true
    }
}

//! Turns Mines source text into a [`Program`]: a board of mine-adjacency digits plus
//! the trailing list of click operations.

use crate::board::{Board, BoardSize, CellDigit, CELL_DIGIT_MINE};
use crate::operation::Operation;
use crate::program::Program;
use std::fmt::{Display, Formatter};

/// A syntax error in Mines source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `,`/`;`-separated coordinate did not match `[+-]?[0-9]+`.
    IntegerSyntax(String),
    /// A non-empty, non-`!`, non-`@` operation line had neither a valid `,` nor `;`
    /// click.
    OperationSyntax(String),
    /// No board block was found.
    NoBoard,
    /// The board was immediately followed by end of input, with no operations.
    NoOperations,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IntegerSyntax(value) => {
                write!(f, "Number '{value}' is not a valid integer.")
            }
            ParseError::OperationSyntax(line) => {
                write!(f, "Operation '{line}' is inconsistent.")
            }
            ParseError::NoBoard => write!(f, "No board."),
            ParseError::NoOperations => write!(f, "No operations."),
        }
    }
}

impl std::error::Error for ParseError {}

fn format_line(line: &str) -> String {
    let before_comment = match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    };
    before_comment
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\u{b}' | '\u{c}' | '\r'))
        .collect()
}

fn is_signed_int(value: &str) -> bool {
    let bytes = value.as_bytes();
    let digits = match bytes.first() {
        Some(b'+') | Some(b'-') => &bytes[1..],
        _ => bytes,
    };
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

fn parse_int(value: &str) -> Result<i128, ParseError> {
    if !is_signed_int(value) {
        return Err(ParseError::IntegerSyntax(value.to_string()));
    }
    value
        .parse()
        .map_err(|_| ParseError::IntegerSyntax(value.to_string()))
}

/// Tries to read `line` as a click on `separator` (`,` for left, `;` for right).
/// Returns `Ok(None)` if the separator is absent (try the other button next);
/// propagates a syntax error if the separator is present but either side isn't a
/// valid integer, matching the original interpreter: once a separator is found, a bad
/// integer on either side is fatal rather than falling through to the other button.
fn parse_click_operation(
    line: &str,
    board_size: BoardSize,
    is_left_button: bool,
) -> Result<Option<Operation>, ParseError> {
    let separator = if is_left_button { ',' } else { ';' };
    let Some(index) = line.find(separator) else {
        return Ok(None);
    };
    let column = parse_int(&line[..index])?;
    let row = parse_int(&line[index + 1..])?;
    Ok(Some(Operation::ClickOperation {
        cell: board_size.wrapped_cell(column, row),
        is_left_button,
    }))
}

fn parse_operation(line: &str, board_size: BoardSize) -> Result<Operation, ParseError> {
    match line {
        "" => Ok(Operation::NoOperation),
        "!" => Ok(Operation::SwitchOperation),
        "@" => Ok(Operation::RestartOperation),
        _ => {
            if let Some(operation) = parse_click_operation(line, board_size, true)? {
                return Ok(operation);
            }
            if let Some(operation) = parse_click_operation(line, board_size, false)? {
                return Ok(operation);
            }
            Err(ParseError::OperationSyntax(line.to_string()))
        }
    }
}

fn is_board_line(line: &str, board_width: usize) -> bool {
    line.len() == board_width && line.bytes().all(|b| b == b'.' || b == b'*')
}

/// Parses a complete Mines source file into a [`Program`].
pub fn parse(code: &str) -> Result<Program, ParseError> {
    let formatted_lines: Vec<String> = code.split('\n').map(format_line).collect();

    let header_count = formatted_lines
        .iter()
        .position(|line| !line.is_empty())
        .unwrap_or(formatted_lines.len());
    if header_count == formatted_lines.len() {
        return Err(ParseError::NoBoard);
    }

    let board_width = formatted_lines[header_count].len();
    let board_height = formatted_lines[header_count..]
        .iter()
        .take_while(|line| is_board_line(line, board_width))
        .count();

    if board_width * board_height == 0 {
        return Err(ParseError::NoBoard);
    }

    let board_size = BoardSize::new(board_width, board_height);
    let board_rows: Vec<&[u8]> = formatted_lines[header_count..header_count + board_height]
        .iter()
        .map(|line| line.as_bytes())
        .collect();

    let cell_digits = Board::new(board_size, |(column, row)| -> CellDigit {
        if board_rows[row][column] == b'*' {
            return CELL_DIGIT_MINE;
        }
        board_size
            .iter_adjacent_cells((column, row))
            .filter(|&(c, r)| board_rows[r][c] == b'*')
            .count() as CellDigit
    });

    let operation_list = formatted_lines[header_count + board_height..]
        .iter()
        .map(|line| parse_operation(line, board_size))
        .collect::<Result<Vec<_>, _>>()?;

    if operation_list.is_empty() {
        return Err(ParseError::NoOperations);
    }

    Ok(Program {
        cell_digits,
        operation_list,
    })
}

//! The 25 stack-machine commands: each a (name, optional validator, executor) triple.
//! A validator inspects [`RuntimeState`] without mutating it; if it reports an error,
//! the executor is skipped and the step is "tried but refused" rather than aborted.

use crate::command::types::{CommandErrorType, CommandName};
use crate::io::InputSource;
use crate::operation::{OpenResult, Operation};
use crate::runtime_state::RuntimeState;
use crate::util::{floor_div, floor_mod};
use std::io::Write;

/// A command as it sits in the dispatch table: `validate` gates `execute` without
/// mutating state.
pub struct Command<S: InputSource, W: Write> {
    pub name: CommandName,
    pub validate: Option<fn(&RuntimeState<S, W>) -> Option<CommandErrorType>>,
    pub execute: fn(&mut RuntimeState<S, W>),
}

impl<S: InputSource, W: Write> Command<S, W> {
    const fn new(
        name: CommandName,
        validate: Option<fn(&RuntimeState<S, W>) -> Option<CommandErrorType>>,
        execute: fn(&mut RuntimeState<S, W>),
    ) -> Self {
        Command {
            name,
            validate,
            execute,
        }
    }
}

fn clicked_cell_digit<S: InputSource, W: Write>(runtime: &RuntimeState<S, W>) -> i128 {
    let click_result = runtime
        .player
        .last_click_result()
        .expect("push(n)/push(count)/push(sum) only selected after a click");
    runtime.player.cell_digit(click_result.clicked_cell) as i128
}

fn opened_cells<S: InputSource, W: Write>(runtime: &RuntimeState<S, W>) -> &[crate::board::Cell] {
    let click_result = runtime
        .player
        .last_click_result()
        .expect("push(count)/push(sum) only selected after a click that opened cells");
    match &click_result.open_result {
        Some(OpenResult::Cells(cells)) => cells,
        _ => panic!("push(count)/push(sum) only selected when open_result is a cell list"),
    }
}

fn run_push_n<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let digit = clicked_cell_digit(runtime);
    runtime.stack.push_one(digit);
}

fn run_push_count<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let count = opened_cells(runtime).len() as i128;
    runtime.stack.push_one(count);
}

fn run_push_sum<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let sum: i128 = opened_cells(runtime)
        .iter()
        .map(|&cell| runtime.player.cell_digit(cell) as i128)
        .sum();
    runtime.stack.push_one(sum);
}

fn validate_pops<S: InputSource, W: Write>(
    pop_count: usize,
) -> fn(&RuntimeState<S, W>) -> Option<CommandErrorType> {
    match pop_count {
        1 => |runtime| (runtime.stack.len() < 1).then_some(CommandErrorType::StackUnderflow),
        2 => |runtime| (runtime.stack.len() < 2).then_some(CommandErrorType::StackUnderflow),
        _ => unreachable!("only 1- and 2-pop commands exist in this dispatch table"),
    }
}

fn run_pop<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    runtime.stack.pop_one();
}

fn run_positive<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let top = runtime.stack.pop_one();
    runtime.stack.push_one(if top > 0 { 1 } else { 0 });
}

fn run_dup<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let top = runtime.stack.pop_one();
    runtime.stack.push([top, top]);
}

fn run_add<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let pops = runtime.stack.pop_many(2);
    runtime.stack.push_one(pops[1] + pops[0]);
}

fn run_sub<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let pops = runtime.stack.pop_many(2);
    runtime.stack.push_one(pops[1] - pops[0]);
}

fn run_mul<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let pops = runtime.stack.pop_many(2);
    runtime.stack.push_one(pops[1] * pops[0]);
}

fn validate_div<S: InputSource, W: Write>(runtime: &RuntimeState<S, W>) -> Option<CommandErrorType> {
    if runtime.stack.len() < 2 {
        return Some(CommandErrorType::StackUnderflow);
    }
    if runtime.stack.peek(0) == 0 {
        return Some(CommandErrorType::ZeroDivision);
    }
    None
}

fn run_div<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let pops = runtime.stack.pop_many(2);
    runtime.stack.push_one(floor_div(pops[1], pops[0]));
}

fn run_mod<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let pops = runtime.stack.pop_many(2);
    runtime.stack.push_one(floor_mod(pops[1], pops[0]));
}

fn run_not<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let top = runtime.stack.pop_one();
    runtime.stack.push_one(if top == 0 { 1 } else { 0 });
}

fn validate_roll<S: InputSource, W: Write>(runtime: &RuntimeState<S, W>) -> Option<CommandErrorType> {
    if runtime.stack.len() < 2 {
        return Some(CommandErrorType::StackUnderflow);
    }
    if (runtime.stack.len() as i128) < 2 + runtime.stack.peek(1).abs() {
        return Some(CommandErrorType::StackUnderflow);
    }
    None
}

fn run_roll<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let pops = runtime.stack.pop_many(2);
    runtime.stack.roll(pops[1], pops[0]);
}

fn validate_in_n<S: InputSource, W: Write>(runtime: &RuntimeState<S, W>) -> Option<CommandErrorType> {
    (!runtime.input_buffer.validate_request_integer()).then_some(CommandErrorType::InputMismatch)
}

fn run_in_n<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let value = runtime.input_buffer.request_integer();
    runtime.stack.push_one(value);
}

fn validate_in_c<S: InputSource, W: Write>(runtime: &RuntimeState<S, W>) -> Option<CommandErrorType> {
    (!runtime.input_buffer.validate_request_char()).then_some(CommandErrorType::InputMismatch)
}

fn run_in_c<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let value = runtime.input_buffer.request_char();
    runtime.stack.push_one(value);
}

fn run_out_n<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let top = runtime.stack.pop_one();
    runtime.output_buffer.write_as_integer(top);
}

fn validate_out_c<S: InputSource, W: Write>(runtime: &RuntimeState<S, W>) -> Option<CommandErrorType> {
    if runtime.stack.is_empty() {
        return Some(CommandErrorType::StackUnderflow);
    }
    if !runtime.output_buffer.validate_write_as_char(runtime.stack.peek(0)) {
        return Some(CommandErrorType::UnicodeRange);
    }
    None
}

fn run_out_c<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let top = runtime.stack.pop_one();
    runtime.output_buffer.write_as_char(top);
}

fn run_skip<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let top = runtime.stack.pop_one();
    runtime.operation_pointer.advance(top);
}

fn run_perform<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>, is_left_button: bool) {
    let pops = runtime.stack.pop_many(2);
    let cell = runtime.player.board_size().wrapped_cell(pops[1], pops[0]);
    runtime
        .operation_queue
        .push_back(Operation::ClickOperation { cell, is_left_button });
}

fn run_perform_l<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    run_perform(runtime, true);
}

fn run_perform_r<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    run_perform(runtime, false);
}

fn run_reset_l<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    runtime.operation_queue.push_back(Operation::RestartOperation);
}

fn run_reset_r<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    runtime.stack.clear();
    runtime.operation_queue.push_back(Operation::RestartOperation);
}

fn run_swap<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    let pops = runtime.stack.pop_many(2);
    runtime.stack.push([pops[0], pops[1]]);
}

fn run_reverse<S: InputSource, W: Write>(runtime: &mut RuntimeState<S, W>) {
    runtime.stack.reverse();
}

fn run_noop<S: InputSource, W: Write>(_runtime: &mut RuntimeState<S, W>) {}

pub fn push_n<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::PushN, None, run_push_n)
}

pub fn push_count<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::PushCount, None, run_push_count)
}

pub fn push_sum<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::PushSum, None, run_push_sum)
}

pub fn pop<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Pop, Some(validate_pops(1)), run_pop)
}

pub fn positive<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Positive, Some(validate_pops(1)), run_positive)
}

pub fn dup<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Dup, Some(validate_pops(1)), run_dup)
}

pub fn add<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Add, Some(validate_pops(2)), run_add)
}

pub fn sub<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Sub, Some(validate_pops(2)), run_sub)
}

pub fn mul<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Mul, Some(validate_pops(2)), run_mul)
}

pub fn div<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Div, Some(validate_div), run_div)
}

pub fn modulo<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Mod, Some(validate_div), run_mod)
}

pub fn not<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Not, Some(validate_pops(1)), run_not)
}

pub fn roll<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Roll, Some(validate_roll), run_roll)
}

pub fn in_n<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::InN, Some(validate_in_n), run_in_n)
}

pub fn in_c<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::InC, Some(validate_in_c), run_in_c)
}

pub fn out_n<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::OutN, Some(validate_pops(1)), run_out_n)
}

pub fn out_c<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::OutC, Some(validate_out_c), run_out_c)
}

pub fn skip<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Skip, Some(validate_pops(1)), run_skip)
}

pub fn perform_l<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::PerformL, Some(validate_pops(2)), run_perform_l)
}

pub fn perform_r<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::PerformR, Some(validate_pops(2)), run_perform_r)
}

pub fn reset_l<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::ResetL, None, run_reset_l)
}

pub fn reset_r<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::ResetR, None, run_reset_r)
}

pub fn swap<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Swap, Some(validate_pops(2)), run_swap)
}

pub fn reverse<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Reverse, None, run_reverse)
}

pub fn noop<S: InputSource, W: Write>() -> Command<S, W> {
    Command::new(CommandName::Noop, None, run_noop)
}

//! End-to-end scenarios driving a parsed program through a [`Runner`] exactly the way
//! a front end would, exercising the click-to-command pipeline rather than any one
//! module in isolation.

use mines_vm::command::{CommandErrorType, CommandName};
use mines_vm::io::EchoInputSource;
use mines_vm::player_state::GameStatus;
use mines_vm::runner::StepResult;
use mines_vm::{parse, Runner};

fn command_names(source: &str, input: &str, steps: usize) -> Vec<CommandName> {
    let program = parse(source).unwrap();
    let mut names = Vec::new();
    let mut runner = Runner::new(
        program,
        EchoInputSource::new(input),
        Vec::new(),
        Some(Box::new(|result: &StepResult| names.push(result.command_name))),
    );
    for _ in 0..steps {
        assert!(runner.step(), "run ended before {steps} steps");
    }
    names
}

/// S1 — a left click on a mine-free board flood-fills every cell, and `push(count)`
/// pushes how many were opened; the board being fully cleared is itself the
/// interesting result (no mines means one click always finishes the game).
#[test]
fn s1_hello_via_push_count() {
    let program = parse("...\n...\n...\n0,0\n5;0\n").unwrap();
    let mut runner = Runner::new(program, EchoInputSource::new(""), Vec::new(), None);
    assert!(runner.step());
    assert_eq!(runner.runtime_state().player.game_status(), GameStatus::Cleared);
    assert_eq!(runner.runtime_state().stack.peek(0), 9);
}

// Shared by S2 and S4: opens two cells with digits 4 and 6 (chosen so a right click
// on each, once opened, selects in(c) and out(c) respectively with nothing else on
// the stack in between), then echoes whatever single character is on the input.
const IN_OUT_CHAR_BOARD: &str = "\
***.***
*...*.*
....*..
1,1
5,1
1;1
5;1
";

#[test]
fn s2_print_bang_via_in_c_out_c() {
    let program = parse(IN_OUT_CHAR_BOARD).unwrap();
    let mut runner = Runner::new(program, EchoInputSource::new("!"), Vec::new(), None);
    for _ in 0..4 {
        assert!(runner.step());
    }
    assert_eq!(runner.runtime_state().output_buffer.get_ref().as_slice(), b"!");
}

#[test]
fn s4_echo_one_char_via_in_c_out_c() {
    let program = parse(IN_OUT_CHAR_BOARD).unwrap();
    let mut runner = Runner::new(program, EchoInputSource::new("A"), Vec::new(), None);
    for _ in 0..4 {
        assert!(runner.step());
    }
    assert_eq!(runner.runtime_state().output_buffer.get_ref().as_slice(), b"A");
}

/// S3 — opening a mine sets `over` and leaves every cell unopened; `reset(l)` queues
/// a restart that fires on the very next step, before the explicit `@` is ever
/// consulted.
#[test]
fn s3_mine_ends_with_reset() {
    let program = parse("*.\n..\n0,0\n@\n").unwrap();
    let mut runner = Runner::new(program, EchoInputSource::new(""), Vec::new(), None);

    assert!(runner.step());
    assert_eq!(runner.runtime_state().player.game_status(), GameStatus::Over);
    for cell in runner.runtime_state().player.board_size().iter_cells() {
        assert_eq!(
            runner.runtime_state().player.player_state().cell_states.get(cell),
            mines_vm::board::CellState::Unopened
        );
    }

    assert!(runner.step());
    assert_eq!(runner.runtime_state().player.game_status(), GameStatus::Playing);
}

/// S5 — chording an opened cell once its flagged-neighbour count matches its digit
/// opens the rest of its safe neighbours at once and pushes their digit sum.
#[test]
fn s5_chord_opens_remaining_neighbors() {
    let source = "*..\n...\n...\n1,1\n0;0\n1;1\n";
    let names = command_names(source, "", 3);
    assert_eq!(names, vec![CommandName::PushN, CommandName::Swap, CommandName::PushSum]);

    let program = parse(source).unwrap();
    let mut runner = Runner::new(program, EchoInputSource::new(""), Vec::new(), None);
    for _ in 0..3 {
        runner.step();
    }
    assert_eq!(runner.runtime_state().player.game_status(), GameStatus::Cleared);
}

/// S6 — `skip` consumes the stack top as a signed pointer offset on top of the
/// operation pointer's own auto-advance, so a popped `1` causes the operation two
/// steps ahead to run next rather than the immediately following one.
#[test]
fn s6_skip_jumps_over_the_next_operation() {
    // Column 3 is an all-safe gap, so the two mine clusters' adjacency counts never
    // interact: (1,1) has exactly one mine neighbour (opens to push(n) = 1), (5,1) has
    // exactly seven (opens to push(n) = 7). Re-clicking (5,1) with the right button
    // selects `skip` (opened, digit 7, no chord); it pops the top of the stack (the
    // 1 just pushed) and advances the operation pointer by that amount on top of its
    // own auto-advance, so the repeated "1,1" at index 3 never runs and (5,1)'s next
    // left click (index 4, now opened) selects `mod` instead.
    let source = "\
*...***
....*.*
....**.
5,1
1,1
5;1
1,1
5,1
";
    let names = command_names(source, "", 4);
    assert_eq!(
        names,
        vec![CommandName::PushN, CommandName::PushN, CommandName::Skip, CommandName::Mod],
        "the repeated '1,1' at index 3 must be skipped over, not executed"
    );
}

/// `div`/`mod` never execute with a zero divisor; the command is refused and the
/// stack is left exactly as it was.
#[test]
fn div_by_zero_is_refused_without_mutating_the_stack() {
    let source = "\
***.***
....*.*
....*..
5,1
1,1
1;1
5,1
";
    let program = parse(source).unwrap();
    let mut errors = Vec::new();
    let mut runner = Runner::new(
        program,
        EchoInputSource::new("0"),
        Vec::new(),
        Some(Box::new(|result: &StepResult| errors.push(result.command_error))),
    );
    for _ in 0..4 {
        assert!(runner.step());
    }
    assert_eq!(errors, vec![None, None, None, Some(CommandErrorType::ZeroDivision)]);

    let stack = &runner.runtime_state().stack;
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.peek(0), 0, "divisor was left on top, untouched");
}

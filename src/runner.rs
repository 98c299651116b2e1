//! Drives a [`Program`] to completion, one step at a time.

use crate::command::{select_command, CommandErrorType, CommandName};
use crate::io::InputSource;
use crate::operation::Operation;
use crate::player_state::GameStatus;
use crate::program::Program;
use crate::runtime_state::RuntimeState;
use std::io::Write;

/// What happened during one [`Runner::step`]: the operation that ran, the command it
/// selected, and the error (if any) that kept the command from executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub operation: Operation,
    pub command_name: CommandName,
    pub command_error: Option<CommandErrorType>,
}

/// Observes every step, e.g. to drive an interactive debugger.
pub type StepListener<'a> = Box<dyn FnMut(&StepResult) + 'a>;

/// Owns the [`RuntimeState`] and repeatedly selects and applies the next command.
pub struct Runner<'a, S: InputSource, W: Write> {
    runtime_state: RuntimeState<S, W>,
    step_listener: Option<StepListener<'a>>,
}

impl<'a, S: InputSource, W: Write> Runner<'a, S, W> {
    pub fn new(
        program: Program,
        input_source: S,
        output_sink: W,
        step_listener: Option<StepListener<'a>>,
    ) -> Self {
        Runner {
            runtime_state: RuntimeState::new(program, input_source, output_sink),
            step_listener,
        }
    }

    pub fn runtime_state(&self) -> &RuntimeState<S, W> {
        &self.runtime_state
    }

    /// Runs one operation/command cycle. Returns `false` once the game has been
    /// cleared (the only terminal state; `over` is recoverable via `reset(l/r)`).
    pub fn step(&mut self) -> bool {
        if self.runtime_state.player.game_status() == GameStatus::Cleared {
            return false;
        }

        let operation = self.runtime_state.next_operation();
        self.runtime_state.player.perform_operation(operation);

        let command = select_command(operation, &self.runtime_state.player);
        let command_error = command
            .validate
            .and_then(|validate| validate(&self.runtime_state));

        if command_error.is_none() {
            (command.execute)(&mut self.runtime_state);
        }

        if let Some(listener) = &mut self.step_listener {
            listener(&StepResult {
                operation,
                command_name: command.name,
                command_error,
            });
        }

        true
    }

    /// Steps until the game is cleared.
    pub fn run(&mut self) {
        while self.step() {}
    }
}

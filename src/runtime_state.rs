//! The mutable state a running program acts on: the player, the circular operation
//! pointer, the ephemeral operation queue `perform`/`reset` feed into, the stack, and
//! the I/O buffers.

use crate::io::{InputBuffer, InputSource, OutputBuffer};
use crate::operation::Operation;
use crate::operation_pointer::OperationPointer;
use crate::player::Player;
use crate::program::Program;
use crate::stack::Stack;
use std::collections::VecDeque;
use std::io::Write;

pub struct RuntimeState<S: InputSource, W: Write> {
    pub player: Player,
    pub operation_pointer: OperationPointer,
    /// Operations enqueued by `perform(l/r)`/`reset(l/r)`; drained before the
    /// operation pointer is consulted again.
    pub operation_queue: VecDeque<Operation>,
    pub stack: Stack,
    pub input_buffer: InputBuffer<S>,
    pub output_buffer: OutputBuffer<W>,
}

impl<S: InputSource, W: Write> RuntimeState<S, W> {
    pub fn new(program: Program, input_source: S, output_sink: W) -> Self {
        RuntimeState {
            player: Player::new(program.cell_digits),
            operation_pointer: OperationPointer::new(program.operation_list),
            operation_queue: VecDeque::new(),
            stack: Stack::new(),
            input_buffer: InputBuffer::new(input_source),
            output_buffer: OutputBuffer::new(output_sink),
        }
    }

    /// The operation a step should act on: the queue's head if `perform`/`reset` left
    /// one waiting, otherwise the next operation from the pointer.
    pub fn next_operation(&mut self) -> Operation {
        match self.operation_queue.pop_front() {
            Some(operation) => operation,
            None => self.operation_pointer.request_operation(),
        }
    }
}

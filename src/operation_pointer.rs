//! A circular index into the parsed operation list.

use crate::operation::Operation;

#[derive(Debug, Clone)]
pub struct OperationPointer {
    operation_list: Vec<Operation>,
    index: usize,
}

impl OperationPointer {
    /// Panics if `operation_list` is empty; the parser guarantees at least one
    /// operation.
    pub fn new(operation_list: Vec<Operation>) -> Self {
        assert!(
            !operation_list.is_empty(),
            "operation pointer requires a non-empty operation list"
        );
        OperationPointer {
            operation_list,
            index: 0,
        }
    }

    /// Advances the index by `n` (which may be negative), wrapping modulo the list
    /// length.
    pub fn advance(&mut self, n: i128) {
        let len = self.operation_list.len() as i128;
        self.index = (self.index as i128 + n).rem_euclid(len) as usize;
    }

    /// Returns the operation under the pointer, then advances by one.
    pub fn request_operation(&mut self) -> Operation {
        let operation = self.operation_list[self.index];
        self.advance(1);
        operation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(n: usize) -> Vec<Operation> {
        (0..n).map(|_| Operation::NoOperation).collect()
    }

    #[test]
    fn request_operation_wraps_around() {
        let mut pointer = OperationPointer::new(ops(3));
        for _ in 0..3 {
            pointer.request_operation();
        }
        assert_eq!(pointer.index, 0);
    }

    #[test]
    fn advance_by_negative_len_is_noop() {
        let mut pointer = OperationPointer::new(ops(5));
        pointer.advance(2);
        let before = pointer.index;
        pointer.advance(-5);
        assert_eq!(pointer.index, before);
    }

    #[test]
    fn advance_handles_negative_wraparound() {
        let mut pointer = OperationPointer::new(ops(4));
        pointer.advance(-1);
        assert_eq!(pointer.index, 3);
    }
}

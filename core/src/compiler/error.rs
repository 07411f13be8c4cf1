//! Bytecode compilation errors.

use thiserror::Error;

use crate::vm::{Opcode, OperandType, Register};

/// Errors that can occur during bytecode compilation.
///
/// Two families: contract violations (a generator or builder bug; the
/// compilation unit is abandoned with a diagnostic naming the offender)
/// and resource limits, which can legitimately occur with very large
/// functions and fail only that function. Malformed input trees are
/// neither: the generator trusts its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An emitted instruction carried the wrong number of operands.
    #[error("{opcode:?} takes {expected} operand(s), got {found}")]
    OperandCountMismatch {
        opcode: Opcode,
        expected: usize,
        found: usize,
    },

    /// An emitted operand did not match the opcode's declared kind.
    #[error("Operand {operand} of {opcode:?} is not {expected:?}")]
    OperandTypeMismatch {
        opcode: Opcode,
        operand: usize,
        expected: OperandType,
    },

    /// A label was finalized while a jump to it was still unpatched.
    #[error("Label {label} was never bound")]
    UnboundLabel { label: usize },

    /// A label was bound to a second offset.
    #[error("Label {label} bound twice")]
    LabelRebound { label: usize },

    /// A second pending jump was parked on one label. Multi-jump
    /// targets take one label per site.
    #[error("Label {label} already has a pending jump")]
    LabelReused { label: usize },

    /// A released register was not the most recently allocated live
    /// temporary.
    #[error("Register {register:?} is not the innermost live temporary")]
    InvalidRegisterRelease { register: Register },

    /// More than 256 distinct constants in one function.
    #[error("Constant pool limit of 256 entries exceeded")]
    ConstantPoolOverflow,

    /// The frame ran out of addressable registers.
    #[error("Frame limit of {} registers exceeded", Register::MAX_LOCAL_INDEX as u16 + 1)]
    FrameOverflow,

    /// More feedback slots than the operand encoding can address.
    #[error("Feedback vector limit of 256 slots exceeded")]
    TooManyFeedbackSlots,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompileError::OperandCountMismatch {
            opcode: Opcode::Star,
            expected: 1,
            found: 0,
        };
        assert_eq!(format!("{}", err), "Star takes 1 operand(s), got 0");

        let err = CompileError::InvalidRegisterRelease {
            register: Register::local(3),
        };
        assert_eq!(
            format!("{}", err),
            "Register r3 is not the innermost live temporary"
        );

        assert_eq!(
            format!("{}", CompileError::FrameOverflow),
            "Frame limit of 128 registers exceeded"
        );
    }
}

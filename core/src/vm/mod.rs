mod code;
mod instruction_set;

pub use code::{
    BytecodeArray, BytecodeArrayIterator, Constant, DecodeError, DecodedInstruction, HeapHandle,
    RuntimeFunctionId,
};
pub use instruction_set::{InvalidOpcode, Opcode, OperandType, Register};

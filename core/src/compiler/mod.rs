//! Bytecode compiler for resolved syntax trees.
//!
//! This module turns a [`FunctionLiteral`](crate::syntax::FunctionLiteral)
//! into a [`BytecodeArray`](crate::vm::BytecodeArray) plus the feedback
//! vector layout its inline caches need. The generator walks the tree
//! once; the builder underneath checks every operand against the
//! instruction set and patches forward jumps at bind time.
//!
//! ## Design
//!
//! - Accumulator discipline: expression visits deliver into the
//!   accumulator, temporaries spill only when an instruction needs a
//!   second input
//! - LIFO temporary registers above the function's locals; the frame
//!   size is the high-water mark
//! - Forward jumps emit a placeholder and are patched when their label
//!   binds, promoting to a pool-based form when the offset outgrows a
//!   byte
//! - Feedback slots are numbered during generation and surfaced beside
//!   the finished artifact

mod builder;
mod constant_pool;
mod error;
mod feedback;
mod generator;
mod labels;
mod registers;


pub use builder::BytecodeArrayBuilder;
pub use error::CompileError;
pub use feedback::{FeedbackSlot, FeedbackSlotKind, FeedbackVectorSpec};
pub use generator::{BytecodeGenerator, CompiledFunction, Heap};
pub use labels::Label;
pub use registers::RegisterAllocator;

//! Flint - a register-machine bytecode compiler for embedders
//!
//! # Overview
//!
//! Flint lowers resolved syntax trees into compact interpreter bytecode.
//! The target machine keeps its latest value in an accumulator and spills
//! everything else into a frame of byte-addressed registers, so most
//! instructions name at most one register and stay two or three bytes
//! long. Alongside the instruction stream the compiler emits:
//!
//! - A constant pool of numbers, strings and heap handles
//! - A feedback vector layout for the interpreter's inline caches
//! - Frame metadata (register count, parameter count)
//!
//! # Quick Start
//!
//! ```ignore
//! use flint::{BytecodeGenerator, Heap};
//! use flint::syntax::{BinaryOp, Expr, FunctionLiteral, LanguageMode, Literal, Stmt};
//! use bumpalo::Bump;
//!
//! // Build a resolved tree in an arena: `function f() { return 40 + 2; }`
//! let arena = Bump::new();
//! let sum = arena.alloc(Expr::Binary {
//!     op: BinaryOp::Add,
//!     left: arena.alloc(Expr::Literal(Literal::Number(40.0))),
//!     right: arena.alloc(Expr::Literal(Literal::Number(2.0))),
//! });
//! let body: &[&Stmt] = arena.alloc_slice_copy(&[&*arena.alloc(Stmt::Return(Some(sum)))]);
//! let function = FunctionLiteral {
//!     name: "f",
//!     parameter_count: 1,
//!     local_count: 0,
//!     language_mode: LanguageMode::Sloppy,
//!     declared_globals: &[],
//!     body,
//! };
//!
//! // Compile it against the embedder's heap
//! let compiled = BytecodeGenerator::compile(&function, &mut my_heap).unwrap();
//! println!("{:?}", compiled.bytecode);
//! ```
//!
//! # Two Layers
//!
//! The compiler is split the way most users want to consume it:
//!
//! 1. **Generator** ([`BytecodeGenerator`]): walks a tree and drives the builder
//! 2. **Builder** ([`BytecodeArrayBuilder`]): append-only instruction assembly,
//!    usable directly by embedders that produce bytecode from their own IR

// Re-export the compiler surface from flint_core
pub use flint_core::compiler::{
    BytecodeArrayBuilder, BytecodeGenerator, CompileError, CompiledFunction, FeedbackSlot,
    FeedbackSlotKind, FeedbackVectorSpec, Heap, Label, RegisterAllocator,
};

// Re-export the bytecode artifact types
pub use flint_core::vm::{
    BytecodeArray, BytecodeArrayIterator, Constant, DecodeError, DecodedInstruction, HeapHandle,
    InvalidOpcode, Opcode, OperandType, Register, RuntimeFunctionId,
};

// Syntax trees are consumed wholesale, so expose the module itself
pub use flint_core::syntax;

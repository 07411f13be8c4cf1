extern crate alloc;

use alloc::vec::Vec;
use bumpalo::Bump;
use flint_core::compiler::{BytecodeArrayBuilder, BytecodeGenerator, Heap};
use flint_core::syntax::{Expr, FunctionLiteral, LanguageMode, Literal, Stmt, VariableLocation};
use flint_core::vm::{BytecodeArray, Constant, HeapHandle, Opcode, Register};
use postcard::{from_bytes, to_allocvec};
use std::ops::Deref;

struct NullHeap;

impl Heap for NullHeap {
    fn internalize_declarations(&mut self, _names: &[&str]) -> HeapHandle {
        HeapHandle(0)
    }
}

#[test]
fn test_postcard() {
    // Test a plain instruction stream
    let mut builder = BytecodeArrayBuilder::new();
    builder.load_literal(Constant::Smi(40)).unwrap();
    builder
        .store_accumulator_in_register(Register::local(0))
        .unwrap();
    builder.load_literal(Constant::Smi(2)).unwrap();
    builder
        .binary_operation(Opcode::Add, Register::local(0))
        .unwrap();
    builder.return_value().unwrap();
    let bytecode = builder.finalize(1, 1).unwrap();

    let v: Vec<u8> = to_allocvec(&bytecode).unwrap();
    assert_eq!(&[9, 1, 40, 33, 0, 1, 2, 64, 0, 144, 1, 1, 0], v.deref());
    let deserialized: BytecodeArray = from_bytes(&v).unwrap();
    assert_eq!(deserialized, bytecode);
    println!("✓ Instruction stream round-trip");

    // Test the constant pool payloads
    let mut builder = BytecodeArrayBuilder::new();
    builder.load_literal(Constant::Double(0.5)).unwrap();
    builder.load_literal(Constant::Str("hi".into())).unwrap();
    builder.return_value().unwrap();
    let bytecode = builder.finalize(0, 1).unwrap();

    let v = to_allocvec(&bytecode).unwrap();
    assert_eq!(
        &[5, 2, 0, 2, 1, 144, 0, 1, 2, 1, 0, 0, 0, 0, 0, 0, 224, 63, 2, 2, 104, 105],
        v.deref()
    );
    let deserialized: BytecodeArray = from_bytes(&v).unwrap();
    assert_eq!(deserialized, bytecode);
    println!("✓ Constant pool round-trip");

    // Test heap handles in the pool
    let mut builder = BytecodeArrayBuilder::new();
    builder
        .load_literal(Constant::Handle(HeapHandle(7)))
        .unwrap();
    builder.return_value().unwrap();
    let bytecode = builder.finalize(0, 1).unwrap();

    let v = to_allocvec(&bytecode).unwrap();
    assert_eq!(&[3, 2, 0, 144, 0, 1, 1, 3, 7], v.deref());
    let deserialized: BytecodeArray = from_bytes(&v).unwrap();
    assert_eq!(deserialized, bytecode);
    println!("✓ Heap handle round-trip");
}

#[test]
fn test_compiled_function() {
    // a = 1; return a;  with `a` at script scope
    let arena = Bump::new();
    let a_store = arena.alloc(Expr::Variable {
        name: "a",
        location: VariableLocation::Global,
    });
    let a_load = arena.alloc(Expr::Variable {
        name: "a",
        location: VariableLocation::Global,
    });
    let assignment = arena.alloc(Expr::Assignment {
        target: a_store,
        value: arena.alloc(Expr::Literal(Literal::Number(1.0))),
    });
    let body = arena.alloc_slice_copy(&[
        &*arena.alloc(Stmt::Expression(assignment)),
        &*arena.alloc(Stmt::Return(Some(a_load))),
    ]);
    let function = FunctionLiteral {
        name: "f",
        parameter_count: 1,
        local_count: 0,
        language_mode: LanguageMode::Sloppy,
        declared_globals: &[],
        body,
    };
    let compiled = BytecodeGenerator::compile(&function, &mut NullHeap).unwrap();

    // Bytecode first, then the feedback slot kinds (Store, Load)
    let v = to_allocvec(&compiled).unwrap();
    assert_eq!(
        &[9, 1, 1, 17, 0, 0, 16, 0, 1, 144, 0, 1, 1, 2, 1, 97, 2, 1, 0],
        v.deref()
    );
    let deserialized = from_bytes(&v).unwrap();
    assert_eq!(compiled, deserialized);
    println!("✓ Compiled function round-trip");
}

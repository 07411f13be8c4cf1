//! Low-level bytecode assembly.
//!
//! The builder appends instructions to a growing buffer and owns the
//! bookkeeping a well formed stream needs: the constant pool, the label
//! arena, and operand validation. Emission methods are semantic
//! (`load_literal`, `jump_if_false`) rather than byte-level, and every
//! one funnels through a single validated encoder, so a miswired call
//! site surfaces as an error instead of a corrupt encoding.
//!
//! ## Design
//!
//! - Forward jumps are emitted with a placeholder displacement and
//!   patched when their label is bound
//! - A jump whose displacement does not fit the inline signed byte is
//!   rewritten to its same-length `*Constant` twin, with the
//!   displacement interned as a pool Smi
//! - Binding a label starts a new basic block, which resets the state
//!   behind `ToBoolean` elision and implicit-return placement

use tracing::trace;

use crate::{
    Vec,
    compiler::{
        CompileError,
        constant_pool::ConstantPoolBuilder,
        feedback::FeedbackSlot,
        labels::{Label, LabelArena, PatchSite},
    },
    syntax::LanguageMode,
    vm::{BytecodeArray, Constant, Opcode, OperandType, Register, RuntimeFunctionId},
};

/// One operand value on its way into the byte stream.
#[derive(Debug, Clone, Copy)]
enum Operand {
    Imm8(i8),
    Reg(Register),
    Idx8(u8),
    Idx16(u16),
    Count8(u8),
}

impl Operand {
    fn matches(self, kind: OperandType) -> bool {
        matches!(
            (self, kind),
            (Operand::Imm8(_), OperandType::Imm8)
                | (Operand::Reg(_), OperandType::Reg8)
                | (Operand::Idx8(_), OperandType::Idx8)
                | (Operand::Idx16(_), OperandType::Idx16)
                | (Operand::Count8(_), OperandType::Count8)
        )
    }

    fn write(self, code: &mut Vec<u8>) {
        match self {
            Operand::Imm8(v) => code.push(v as u8),
            Operand::Reg(r) => code.push(r.to_operand()),
            Operand::Idx8(v) => code.push(v),
            Operand::Idx16(v) => code.extend_from_slice(&v.to_ne_bytes()),
            Operand::Count8(v) => code.push(v),
        }
    }
}

/// Feedback slots are capped at 256, so the index fits an `Idx8`.
fn slot_operand(slot: FeedbackSlot) -> Operand {
    Operand::Idx8(slot.index() as u8)
}

/// Assembles one function's instruction stream.
#[derive(Default)]
pub struct BytecodeArrayBuilder {
    code: Vec<u8>,
    constants: ConstantPoolBuilder,
    labels: LabelArena,
    /// Opcode of the last instruction in the current basic block.
    last_opcode: Option<Opcode>,
    /// Whether the current basic block already ended in `Return`.
    exit_seen_in_block: bool,
}

impl BytecodeArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset the next instruction will land on.
    pub fn current_offset(&self) -> usize {
        self.code.len()
    }

    /// Validate `operands` against the opcode's signature and append
    /// the encoded instruction. Nothing is written on a mismatch.
    fn emit(&mut self, opcode: Opcode, operands: &[Operand]) -> Result<(), CompileError> {
        let types = opcode.operand_types();
        if operands.len() != types.len() {
            return Err(CompileError::OperandCountMismatch {
                opcode,
                expected: types.len(),
                found: operands.len(),
            });
        }
        for (i, (operand, kind)) in operands.iter().zip(types).enumerate() {
            if !operand.matches(*kind) {
                return Err(CompileError::OperandTypeMismatch {
                    opcode,
                    operand: i,
                    expected: *kind,
                });
            }
        }
        self.code.push(opcode as u8);
        for operand in operands {
            operand.write(&mut self.code);
        }
        self.last_opcode = Some(opcode);
        if matches!(opcode, Opcode::Return) {
            self.exit_seen_in_block = true;
        }
        Ok(())
    }

    // === Constants ===

    /// Pool index of `constant`, interning it on first sight.
    pub fn intern_constant(&mut self, constant: Constant) -> Result<u8, CompileError> {
        self.constants.intern(constant)
    }

    /// Load a literal into the accumulator through the cheapest
    /// encoding: `LdaZero` for zero, `LdaSmi8` for other Smis that fit
    /// a signed byte, a pool load for everything else.
    pub fn load_literal(&mut self, constant: Constant) -> Result<(), CompileError> {
        match constant {
            Constant::Smi(0) => self.emit(Opcode::LdaZero, &[]),
            Constant::Smi(v) if v >= i8::MIN as i32 && v <= i8::MAX as i32 => {
                self.emit(Opcode::LdaSmi8, &[Operand::Imm8(v as i8)])
            }
            other => {
                let index = self.constants.intern(other)?;
                self.emit(Opcode::LdaConstant, &[Operand::Idx8(index)])
            }
        }
    }

    pub fn load_undefined(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::LdaUndefined, &[])
    }

    pub fn load_null(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::LdaNull, &[])
    }

    pub fn load_the_hole(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::LdaTheHole, &[])
    }

    pub fn load_true(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::LdaTrue, &[])
    }

    pub fn load_false(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::LdaFalse, &[])
    }

    // === Register transfers ===

    pub fn load_accumulator_with_register(
        &mut self,
        register: Register,
    ) -> Result<(), CompileError> {
        self.emit(Opcode::Ldar, &[Operand::Reg(register)])
    }

    pub fn store_accumulator_in_register(
        &mut self,
        register: Register,
    ) -> Result<(), CompileError> {
        self.emit(Opcode::Star, &[Operand::Reg(register)])
    }

    // === Globals and context ===

    /// Load the global named by pool entry `name_index`.
    pub fn load_global(&mut self, name_index: u8, slot: FeedbackSlot) -> Result<(), CompileError> {
        self.emit(
            Opcode::LdaGlobal,
            &[Operand::Idx8(name_index), slot_operand(slot)],
        )
    }

    /// Store the accumulator into the global named by pool entry
    /// `name_index`.
    pub fn store_global(&mut self, name_index: u8, slot: FeedbackSlot) -> Result<(), CompileError> {
        self.emit(
            Opcode::StaGlobal,
            &[Operand::Idx8(name_index), slot_operand(slot)],
        )
    }

    /// Load a slot out of the context object held in `context`.
    pub fn load_context_slot(
        &mut self,
        context: Register,
        slot_index: u8,
    ) -> Result<(), CompileError> {
        self.emit(
            Opcode::LdaContextSlot,
            &[Operand::Reg(context), Operand::Idx8(slot_index)],
        )
    }

    // === Properties ===

    /// Load `object`'s property named by the string in the accumulator.
    pub fn load_named_property(
        &mut self,
        object: Register,
        slot: FeedbackSlot,
        mode: LanguageMode,
    ) -> Result<(), CompileError> {
        let opcode = match mode {
            LanguageMode::Sloppy => Opcode::LoadIcSloppy,
            LanguageMode::Strict => Opcode::LoadIcStrict,
        };
        self.emit(opcode, &[Operand::Reg(object), slot_operand(slot)])
    }

    /// Load `object`'s element keyed by the accumulator.
    pub fn load_keyed_property(
        &mut self,
        object: Register,
        slot: FeedbackSlot,
        mode: LanguageMode,
    ) -> Result<(), CompileError> {
        let opcode = match mode {
            LanguageMode::Sloppy => Opcode::KeyedLoadIcSloppy,
            LanguageMode::Strict => Opcode::KeyedLoadIcStrict,
        };
        self.emit(opcode, &[Operand::Reg(object), slot_operand(slot)])
    }

    /// Store the accumulator into `object`'s property named by the
    /// string in `name`.
    pub fn store_named_property(
        &mut self,
        object: Register,
        name: Register,
        slot: FeedbackSlot,
        mode: LanguageMode,
    ) -> Result<(), CompileError> {
        let opcode = match mode {
            LanguageMode::Sloppy => Opcode::StoreIcSloppy,
            LanguageMode::Strict => Opcode::StoreIcStrict,
        };
        self.emit(
            opcode,
            &[Operand::Reg(object), Operand::Reg(name), slot_operand(slot)],
        )
    }

    /// Store the accumulator into `object`'s element keyed by `key`.
    pub fn store_keyed_property(
        &mut self,
        object: Register,
        key: Register,
        slot: FeedbackSlot,
        mode: LanguageMode,
    ) -> Result<(), CompileError> {
        let opcode = match mode {
            LanguageMode::Sloppy => Opcode::KeyedStoreIcSloppy,
            LanguageMode::Strict => Opcode::KeyedStoreIcStrict,
        };
        self.emit(
            opcode,
            &[Operand::Reg(object), Operand::Reg(key), slot_operand(slot)],
        )
    }

    // === Operators ===

    /// `acc = lhs <op> acc`.
    pub fn binary_operation(&mut self, opcode: Opcode, lhs: Register) -> Result<(), CompileError> {
        debug_assert!(opcode.is_binary_operation());
        self.emit(opcode, &[Operand::Reg(lhs)])
    }

    /// `acc = lhs <test> acc`, leaving a boolean.
    pub fn compare_operation(&mut self, opcode: Opcode, lhs: Register) -> Result<(), CompileError> {
        debug_assert!(opcode.is_comparison());
        self.emit(opcode, &[Operand::Reg(lhs)])
    }

    pub fn logical_not(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::LogicalNot, &[])
    }

    pub fn type_of(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::TypeOf, &[])
    }

    /// Coerce the accumulator to a boolean, unless the last instruction
    /// in this basic block already left one there.
    pub fn cast_accumulator_to_boolean(&mut self) -> Result<(), CompileError> {
        if self.last_opcode.is_some_and(Opcode::produces_boolean) {
            return Ok(());
        }
        self.emit(Opcode::ToBoolean, &[])
    }

    // === Calls ===

    /// Call the function in `callee` with `arg_count` arguments. The
    /// receiver and arguments occupy the registers following `callee`.
    pub fn call(
        &mut self,
        callee: Register,
        receiver: Register,
        arg_count: u8,
    ) -> Result<(), CompileError> {
        debug_assert_eq!(receiver.index() as i16, callee.index() as i16 + 1);
        self.emit(
            Opcode::Call,
            &[
                Operand::Reg(callee),
                Operand::Reg(receiver),
                Operand::Count8(arg_count),
            ],
        )
    }

    /// Call into the runtime with arguments in the register run
    /// starting at `first_arg`.
    pub fn call_runtime(
        &mut self,
        function: RuntimeFunctionId,
        first_arg: Register,
        arg_count: u8,
    ) -> Result<(), CompileError> {
        self.emit(
            Opcode::CallRuntime,
            &[
                Operand::Idx16(function.to_operand()),
                Operand::Reg(first_arg),
                Operand::Count8(arg_count),
            ],
        )
    }

    // === Control flow ===

    pub fn new_label(&mut self) -> Label {
        self.labels.new_label()
    }

    /// Bind `label` to the current offset and patch the jump that was
    /// waiting for it, if any.
    pub fn bind(&mut self, label: Label) -> Result<(), CompileError> {
        let offset = self.code.len();
        if let Some(site) = self.labels.bind(label, offset)? {
            self.patch_jump(site, offset)?;
        }
        self.start_basic_block();
        Ok(())
    }

    pub fn jump(&mut self, label: Label) -> Result<(), CompileError> {
        self.emit_jump(Opcode::Jump, label)
    }

    pub fn jump_if_true(&mut self, label: Label) -> Result<(), CompileError> {
        self.emit_jump(Opcode::JumpIfTrue, label)
    }

    pub fn jump_if_false(&mut self, label: Label) -> Result<(), CompileError> {
        self.emit_jump(Opcode::JumpIfFalse, label)
    }

    /// Displacements are relative to the end of the jump instruction.
    fn emit_jump(&mut self, opcode: Opcode, label: Label) -> Result<(), CompileError> {
        let site = self.code.len();
        match self.labels.offset(label) {
            Some(target) => {
                // Backward jump, displacement known now.
                let displacement = target as isize - (site + opcode.size()) as isize;
                match i8::try_from(displacement) {
                    Ok(d8) => self.emit(opcode, &[Operand::Imm8(d8)]),
                    Err(_) => {
                        let index = self.constants.intern(Constant::Smi(displacement as i32))?;
                        let promoted = opcode.constant_jump_variant().unwrap_or(opcode);
                        self.emit(promoted, &[Operand::Idx8(index)])
                    }
                }
            }
            None => {
                // Forward jump, park a placeholder and patch at bind.
                self.labels
                    .record_patch_site(label, PatchSite { offset: site, opcode })?;
                self.emit(opcode, &[Operand::Imm8(0)])
            }
        }
    }

    /// Rewrite the parked jump at `site` now that its target is known.
    /// Inline and constant jump forms encode to the same length, so
    /// promotion never moves later code.
    fn patch_jump(&mut self, site: PatchSite, target: usize) -> Result<(), CompileError> {
        let displacement = target as isize - (site.offset + site.opcode.size()) as isize;
        debug_assert!(displacement >= 0, "forward jump resolved backwards");
        match i8::try_from(displacement) {
            Ok(d8) => {
                self.code[site.offset + 1] = d8 as u8;
            }
            Err(_) => {
                let index = self.constants.intern(Constant::Smi(displacement as i32))?;
                let promoted = site.opcode.constant_jump_variant().unwrap_or(site.opcode);
                trace!(offset = site.offset, displacement, "promoting jump to constant form");
                self.code[site.offset] = promoted as u8;
                self.code[site.offset + 1] = index;
            }
        }
        Ok(())
    }

    fn start_basic_block(&mut self) {
        self.last_opcode = None;
        self.exit_seen_in_block = false;
    }

    // === Function exit ===

    pub fn return_value(&mut self) -> Result<(), CompileError> {
        self.emit(Opcode::Return, &[])
    }

    /// Guarantee execution cannot run off the end of the stream: if the
    /// current basic block has not returned, return undefined.
    pub fn ensure_return(&mut self) -> Result<(), CompileError> {
        if !self.exit_seen_in_block {
            self.load_undefined()?;
            self.return_value()?;
        }
        Ok(())
    }

    /// Seal the stream into an immutable artifact. Fails if any label
    /// still has a jump waiting for it.
    pub fn finalize(
        self,
        frame_size: u16,
        parameter_count: u8,
    ) -> Result<BytecodeArray, CompileError> {
        self.labels.check_all_patched()?;
        Ok(BytecodeArray::new(
            self.code.into_boxed_slice(),
            frame_size,
            parameter_count,
            self.constants.finish(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::feedback::{FeedbackSlotKind, FeedbackVectorSpec};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_loads_pick_the_cheapest_encoding() {
        let mut builder = BytecodeArrayBuilder::new();
        builder.load_literal(Constant::Smi(0)).unwrap();
        builder.load_literal(Constant::Smi(5)).unwrap();
        builder.load_literal(Constant::Smi(-3)).unwrap();
        builder.load_literal(Constant::Smi(127)).unwrap();
        builder.load_literal(Constant::Smi(-128)).unwrap();
        builder.load_literal(Constant::Smi(128)).unwrap();
        builder.load_literal(Constant::Double(0.0)).unwrap();
        assert_eq!(
            builder.code,
            vec![
                Opcode::LdaZero as u8,
                Opcode::LdaSmi8 as u8,
                5,
                Opcode::LdaSmi8 as u8,
                0xFD,
                Opcode::LdaSmi8 as u8,
                127,
                Opcode::LdaSmi8 as u8,
                0x80,
                Opcode::LdaConstant as u8,
                0,
                Opcode::LdaConstant as u8,
                1,
            ]
        );
        assert_eq!(
            builder.constants.finish().as_ref(),
            &[Constant::Smi(128), Constant::Double(0.0)]
        );
    }

    #[test]
    fn test_emit_rejects_malformed_operands() {
        let mut builder = BytecodeArrayBuilder::new();
        assert_eq!(
            builder.emit(Opcode::Star, &[]),
            Err(CompileError::OperandCountMismatch {
                opcode: Opcode::Star,
                expected: 1,
                found: 0,
            })
        );
        assert_eq!(
            builder.emit(Opcode::Star, &[Operand::Imm8(0)]),
            Err(CompileError::OperandTypeMismatch {
                opcode: Opcode::Star,
                operand: 0,
                expected: OperandType::Reg8,
            })
        );
        // A rejected emit leaves no bytes behind
        assert!(builder.code.is_empty());
    }

    #[test]
    fn test_property_opcodes_follow_language_mode() {
        let mut feedback = FeedbackVectorSpec::new();
        let load = feedback.reserve(FeedbackSlotKind::Load).unwrap();
        let store = feedback.reserve(FeedbackSlotKind::KeyedStore).unwrap();

        let mut builder = BytecodeArrayBuilder::new();
        builder
            .load_named_property(Register::local(0), load, LanguageMode::Sloppy)
            .unwrap();
        builder
            .load_named_property(Register::local(0), load, LanguageMode::Strict)
            .unwrap();
        builder
            .store_keyed_property(
                Register::local(0),
                Register::local(1),
                store,
                LanguageMode::Strict,
            )
            .unwrap();
        assert_eq!(
            builder.code,
            vec![
                Opcode::LoadIcSloppy as u8,
                0,
                0,
                Opcode::LoadIcStrict as u8,
                0,
                0,
                Opcode::KeyedStoreIcStrict as u8,
                0,
                1,
                1,
            ]
        );
    }

    #[test]
    fn test_forward_jump_is_patched_at_bind() {
        let mut builder = BytecodeArrayBuilder::new();
        let label = builder.new_label();
        builder.load_false().unwrap();
        builder.jump_if_false(label).unwrap();
        builder.load_literal(Constant::Smi(1)).unwrap();
        builder.bind(label).unwrap();
        builder.return_value().unwrap();
        // Jump site at 1, ends at 3, target 5: displacement +2
        assert_eq!(
            builder.code,
            vec![
                Opcode::LdaFalse as u8,
                Opcode::JumpIfFalse as u8,
                2,
                Opcode::LdaSmi8 as u8,
                1,
                Opcode::Return as u8,
            ]
        );
    }

    #[test]
    fn test_backward_jump_encodes_immediately() {
        let mut builder = BytecodeArrayBuilder::new();
        let top = builder.new_label();
        builder.bind(top).unwrap();
        builder.load_true().unwrap();
        builder.jump_if_true(top).unwrap();
        // Jump site at 1, ends at 3, target 0: displacement -3
        assert_eq!(
            builder.code,
            vec![Opcode::LdaTrue as u8, Opcode::JumpIfTrue as u8, 0xFD]
        );
    }

    #[test]
    fn test_forward_jump_promotes_to_constant_form() {
        // Displacement 127 still fits inline
        let mut builder = BytecodeArrayBuilder::new();
        let label = builder.new_label();
        builder.jump(label).unwrap();
        for _ in 0..63 {
            builder.load_literal(Constant::Smi(100)).unwrap();
        }
        builder.load_true().unwrap();
        builder.bind(label).unwrap();
        assert_eq!(builder.code[0], Opcode::Jump as u8);
        assert_eq!(builder.code[1], 127);
        assert!(builder.constants.is_empty());

        // One more byte of padding promotes the site in place
        let mut builder = BytecodeArrayBuilder::new();
        let label = builder.new_label();
        builder.intern_constant(Constant::Smi(1234)).unwrap();
        builder.jump(label).unwrap();
        for _ in 0..64 {
            builder.load_literal(Constant::Smi(100)).unwrap();
        }
        builder.bind(label).unwrap();
        assert_eq!(builder.code[0], Opcode::JumpConstant as u8);
        assert_eq!(builder.code[1], 1);
        assert_eq!(builder.code.len(), 130);
        assert_eq!(
            builder.constants.finish().as_ref(),
            &[Constant::Smi(1234), Constant::Smi(128)]
        );
    }

    #[test]
    fn test_backward_jump_promotes_to_constant_form() {
        let mut builder = BytecodeArrayBuilder::new();
        let top = builder.new_label();
        builder.bind(top).unwrap();
        for _ in 0..64 {
            builder.load_literal(Constant::Smi(100)).unwrap();
        }
        builder.jump(top).unwrap();
        // Jump site at 128, ends at 130, target 0: displacement -130
        assert_eq!(builder.code[128], Opcode::JumpConstant as u8);
        assert_eq!(builder.code[129], 0);
        assert_eq!(
            builder.constants.finish().as_ref(),
            &[Constant::Smi(-130)]
        );
    }

    #[test]
    fn test_boolean_casts_elide_after_boolean_producers() {
        let mut builder = BytecodeArrayBuilder::new();
        builder.load_true().unwrap();
        builder.cast_accumulator_to_boolean().unwrap();
        assert_eq!(builder.code, vec![Opcode::LdaTrue as u8]);

        builder.load_literal(Constant::Smi(0)).unwrap();
        builder.cast_accumulator_to_boolean().unwrap();
        // A second cast right after sees the ToBoolean and elides
        builder.cast_accumulator_to_boolean().unwrap();
        assert_eq!(
            builder.code,
            vec![
                Opcode::LdaTrue as u8,
                Opcode::LdaZero as u8,
                Opcode::ToBoolean as u8,
            ]
        );
    }

    #[test]
    fn test_boolean_cast_elision_stops_at_block_boundaries() {
        let mut builder = BytecodeArrayBuilder::new();
        let label = builder.new_label();
        builder.load_true().unwrap();
        builder.bind(label).unwrap();
        // Another block may jump here with anything in the accumulator
        builder.cast_accumulator_to_boolean().unwrap();
        assert_eq!(
            builder.code,
            vec![Opcode::LdaTrue as u8, Opcode::ToBoolean as u8]
        );
    }

    #[test]
    fn test_ensure_return_closes_open_blocks() {
        let mut builder = BytecodeArrayBuilder::new();
        builder.ensure_return().unwrap();
        assert_eq!(
            builder.code,
            vec![Opcode::LdaUndefined as u8, Opcode::Return as u8]
        );

        let mut builder = BytecodeArrayBuilder::new();
        builder.load_literal(Constant::Smi(0)).unwrap();
        builder.return_value().unwrap();
        builder.ensure_return().unwrap();
        assert_eq!(
            builder.code,
            vec![Opcode::LdaZero as u8, Opcode::Return as u8]
        );
    }

    #[test]
    fn test_ensure_return_fires_again_after_a_bind() {
        let mut builder = BytecodeArrayBuilder::new();
        let join = builder.new_label();
        builder.return_value().unwrap();
        builder.bind(join).unwrap();
        builder.ensure_return().unwrap();
        assert_eq!(
            builder.code,
            vec![
                Opcode::Return as u8,
                Opcode::LdaUndefined as u8,
                Opcode::Return as u8,
            ]
        );
    }

    #[test]
    fn test_finalize_rejects_unbound_labels() {
        let mut builder = BytecodeArrayBuilder::new();
        let label = builder.new_label();
        builder.jump(label).unwrap();
        assert_eq!(
            builder.finalize(0, 1).unwrap_err(),
            CompileError::UnboundLabel { label: 0 }
        );
    }

    #[test]
    fn test_finalize_carries_frame_and_pool() {
        let mut builder = BytecodeArrayBuilder::new();
        builder.load_literal(Constant::Double(3.14)).unwrap();
        builder
            .store_accumulator_in_register(Register::local(0))
            .unwrap();
        builder.load_literal(Constant::Str("pi".into())).unwrap();
        builder.return_value().unwrap();

        let array = builder.finalize(1, 1).unwrap();
        assert_eq!(array.frame_size(), 1);
        assert_eq!(array.parameter_count(), 1);
        assert_eq!(
            array.constant_pool(),
            &[Constant::Double(3.14), Constant::Str("pi".into())]
        );
        assert_eq!(
            array.code(),
            &[
                Opcode::LdaConstant as u8,
                0,
                Opcode::Star as u8,
                0,
                Opcode::LdaConstant as u8,
                1,
                Opcode::Return as u8,
            ]
        );
    }

    #[test]
    fn test_runtime_call_encodes_wide_function_id() {
        let mut builder = BytecodeArrayBuilder::new();
        builder
            .call_runtime(RuntimeFunctionId(0x0102), Register::local(0), 2)
            .unwrap();
        let id_bytes = 0x0102u16.to_ne_bytes();
        assert_eq!(
            builder.code,
            vec![Opcode::CallRuntime as u8, id_bytes[0], id_bytes[1], 0, 2]
        );
    }
}

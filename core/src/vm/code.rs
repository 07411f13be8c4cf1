use core::fmt;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    Box, String, Vec,
    vm::{InvalidOpcode, Opcode, OperandType, Register},
};

/// Opaque reference to an object interned by the embedder's heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeapHandle(pub u32);

/// Identifies a runtime function callable through `CallRuntime`.
///
/// Ids below [`RuntimeFunctionId::FIRST_EMBEDDER_ID`] belong to functions
/// the compiler itself emits calls to; embedders register their own
/// functions from there upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuntimeFunctionId(pub u16);

impl RuntimeFunctionId {
    /// Installs a batch of script-scope declarations on the global object.
    pub const DECLARE_GLOBALS: RuntimeFunctionId = RuntimeFunctionId(0);
    /// Assigns the initial value of one `var` declared at script scope.
    pub const INITIALIZE_VAR_GLOBAL: RuntimeFunctionId = RuntimeFunctionId(1);
    pub const FIRST_EMBEDDER_ID: RuntimeFunctionId = RuntimeFunctionId(256);

    pub const fn to_operand(self) -> u16 {
        self.0
    }
}

/// One constant pool entry.
///
/// Two entries never unify across kinds: a `Smi(3)` and a `Double(3.0)`
/// are distinct pool slots.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    /// Small integer, stored unboxed.
    Smi(i32),
    /// IEEE double. Pool dedup compares these by bit pattern.
    Double(f64),
    Str(ecow::EcoString),
    /// Heap object owned by the embedder.
    Handle(HeapHandle),
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Smi(v) => write!(f, "{}", v),
            Constant::Double(v) => write!(f, "{:?}", v),
            Constant::Str(s) => write!(f, "{:?}", s),
            Constant::Handle(h) => write!(f, "handle#{}", h.0),
        }
    }
}

/// The immutable compilation artifact: code bytes plus the frame and pool
/// metadata the interpreter needs to execute them.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct BytecodeArray {
    code: Box<[u8]>,
    /// Number of local and temporary registers (accumulator and
    /// parameters excluded).
    frame_size: u16,
    /// Number of parameters, receiver included.
    parameter_count: u8,
    constant_pool: Box<[Constant]>,
}

impl BytecodeArray {
    pub(crate) fn new(
        code: Box<[u8]>,
        frame_size: u16,
        parameter_count: u8,
        constant_pool: Box<[Constant]>,
    ) -> Self {
        BytecodeArray {
            code,
            frame_size,
            parameter_count,
            constant_pool,
        }
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn frame_size(&self) -> u16 {
        self.frame_size
    }

    pub fn parameter_count(&self) -> u8 {
        self.parameter_count
    }

    pub fn constant_pool(&self) -> &[Constant] {
        &self.constant_pool
    }

    pub fn constant(&self, index: u8) -> Option<&Constant> {
        self.constant_pool.get(index as usize)
    }

    /// Walk the instruction stream front to back.
    pub fn iter(&self) -> BytecodeArrayIterator<'_> {
        BytecodeArrayIterator {
            code: &self.code,
            offset: 0,
        }
    }

    /// Absolute byte offset a jump lands on, resolving pool-indirected
    /// displacements. `None` for non-jumps and for constant jumps whose
    /// pool entry is not a Smi.
    pub fn jump_target(&self, instr: &DecodedInstruction) -> Option<usize> {
        let displacement = if instr.opcode.is_jump_constant() {
            match self.constant(instr.index_operand(0) as u8) {
                Some(Constant::Smi(d)) => *d,
                _ => return None,
            }
        } else if instr.opcode.is_jump() {
            instr.immediate_operand(0) as i32
        } else {
            return None;
        };
        let end = (instr.offset + instr.size()) as isize;
        Some((end + displacement as isize) as usize)
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decoding failure. Only reachable on corrupted or truncated byte
/// streams; the builder never produces either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    InvalidOpcode(InvalidOpcode),
    TruncatedInstruction { offset: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidOpcode(e) => write!(f, "{}", e),
            DecodeError::TruncatedInstruction { offset } => {
                write!(f, "Truncated instruction at offset {}", offset)
            }
        }
    }
}

impl From<InvalidOpcode> for DecodeError {
    fn from(e: InvalidOpcode) -> Self {
        DecodeError::InvalidOpcode(e)
    }
}

/// One decoded instruction: opcode, byte offset, operand values.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub offset: usize,
    pub opcode: Opcode,
    operands: SmallVec<[i32; 3]>,
}

impl DecodedInstruction {
    pub fn size(&self) -> usize {
        self.opcode.size()
    }

    /// Raw decoded value of operand `i` (sign-extended for signed kinds).
    pub fn operand(&self, i: usize) -> i32 {
        self.operands[i]
    }

    pub fn register_operand(&self, i: usize) -> Register {
        debug_assert_eq!(self.opcode.operand_types()[i], OperandType::Reg8);
        Register::from_operand(self.operands[i] as u8)
    }

    pub fn immediate_operand(&self, i: usize) -> i8 {
        debug_assert_eq!(self.opcode.operand_types()[i], OperandType::Imm8);
        self.operands[i] as i8
    }

    pub fn index_operand(&self, i: usize) -> u32 {
        debug_assert!(matches!(
            self.opcode.operand_types()[i],
            OperandType::Idx8 | OperandType::Idx16
        ));
        self.operands[i] as u32
    }

    pub fn count_operand(&self, i: usize) -> u8 {
        debug_assert_eq!(self.opcode.operand_types()[i], OperandType::Count8);
        self.operands[i] as u8
    }
}

impl fmt::Debug for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.opcode)?;
        for (i, kind) in self.opcode.operand_types().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            match kind {
                OperandType::Imm8 => write!(f, "{}{:+}", sep, self.operands[i])?,
                OperandType::Reg8 => {
                    write!(f, "{}{:?}", sep, Register::from_operand(self.operands[i] as u8))?
                }
                OperandType::Idx8 | OperandType::Idx16 => {
                    write!(f, "{}[{}]", sep, self.operands[i])?
                }
                OperandType::Count8 => write!(f, "{}#{}", sep, self.operands[i])?,
            }
        }
        Ok(())
    }
}

pub struct BytecodeArrayIterator<'a> {
    code: &'a [u8],
    offset: usize,
}

impl Iterator for BytecodeArrayIterator<'_> {
    type Item = Result<DecodedInstruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.code.len() {
            return None;
        }
        let start = self.offset;
        let opcode = match Opcode::from_byte(self.code[start]) {
            Ok(opcode) => opcode,
            Err(e) => {
                // Decoding cannot resynchronize after a bad byte.
                self.offset = self.code.len();
                return Some(Err(e.into()));
            }
        };
        if start + opcode.size() > self.code.len() {
            self.offset = self.code.len();
            return Some(Err(DecodeError::TruncatedInstruction { offset: start }));
        }
        let mut operands = SmallVec::new();
        let mut cursor = start + 1;
        for kind in opcode.operand_types() {
            let value = match kind {
                OperandType::Imm8 | OperandType::Reg8 => self.code[cursor] as i8 as i32,
                OperandType::Idx8 | OperandType::Count8 => self.code[cursor] as i32,
                OperandType::Idx16 => {
                    u16::from_ne_bytes([self.code[cursor], self.code[cursor + 1]]) as i32
                }
            };
            operands.push(value);
            cursor += kind.width();
        }
        self.offset = cursor;
        Some(Ok(DecodedInstruction {
            offset: start,
            opcode,
            operands,
        }))
    }
}

// ============================================================================
// Disassembly
// ============================================================================

impl fmt::Debug for BytecodeArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BytecodeArray {{")?;
        writeln!(f, "  frame_size: {}", self.frame_size)?;
        writeln!(f, "  parameter_count: {}", self.parameter_count)?;

        if !self.constant_pool.is_empty() {
            writeln!(f, "  constants: [")?;
            for (i, constant) in self.constant_pool.iter().enumerate() {
                writeln!(f, "    [{}] = {:?}", i, constant)?;
            }
            writeln!(f, "  ]")?;
        } else {
            writeln!(f, "  constants: []")?;
        }

        // First pass: collect jump targets so their offsets get labels
        let mut jump_targets: HashSet<usize> = HashSet::new();
        for instr in self.iter() {
            let Ok(instr) = instr else { break };
            if let Some(target) = self.jump_target(&instr) {
                jump_targets.insert(target);
            }
        }
        let mut sorted_targets: Vec<_> = jump_targets.into_iter().collect();
        sorted_targets.sort_unstable();
        let label_map: HashMap<usize, usize> = sorted_targets
            .into_iter()
            .enumerate()
            .map(|(i, offset)| (offset, i))
            .collect();

        // Second pass: print instructions with labels and jump annotations
        writeln!(f, "  instructions:")?;
        for instr in self.iter() {
            let instr = match instr {
                Ok(instr) => instr,
                Err(e) => {
                    writeln!(f, "    <{}>", e)?;
                    break;
                }
            };
            let label_prefix = if let Some(&label) = label_map.get(&instr.offset) {
                alloc::format!("L{}:", label)
            } else {
                String::new()
            };
            if let Some(target) = self.jump_target(&instr) {
                let target_label = label_map
                    .get(&target)
                    .map(|l| alloc::format!("L{}", l))
                    .unwrap_or_else(|| alloc::format!("@{}", target));
                writeln!(
                    f,
                    "    {:4} {:>4}  {:?} (to {})",
                    instr.offset, label_prefix, instr, target_label
                )?;
            } else {
                writeln!(f, "    {:4} {:>4}  {:?}", instr.offset, label_prefix, instr)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Box, vec};

    fn sample_array() -> BytecodeArray {
        // LdaZero; JumpIfFalse +2; LdaSmi8 5; Return
        let code = vec![
            Opcode::LdaZero as u8,
            Opcode::JumpIfFalse as u8,
            2,
            Opcode::LdaSmi8 as u8,
            5,
            Opcode::Return as u8,
        ];
        BytecodeArray::new(code.into_boxed_slice(), 0, 1, Box::new([]))
    }

    #[test]
    fn test_iterator_decodes_offsets_and_operands() {
        let array = sample_array();
        let instrs: Vec<_> = array.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(instrs.len(), 4);

        assert_eq!(instrs[0].offset, 0);
        assert_eq!(instrs[0].opcode, Opcode::LdaZero);

        assert_eq!(instrs[1].offset, 1);
        assert_eq!(instrs[1].opcode, Opcode::JumpIfFalse);
        assert_eq!(instrs[1].immediate_operand(0), 2);

        assert_eq!(instrs[2].offset, 3);
        assert_eq!(instrs[2].immediate_operand(0), 5);

        assert_eq!(instrs[3].offset, 5);
        assert_eq!(instrs[3].opcode, Opcode::Return);
    }

    #[test]
    fn test_negative_operands_sign_extend() {
        let code = vec![
            Opcode::Ldar as u8,
            Register::parameter(0, 1).to_operand(),
            Opcode::Jump as u8,
            (-4i8) as u8,
        ];
        let array = BytecodeArray::new(code.into_boxed_slice(), 0, 1, Box::new([]));
        let instrs: Vec<_> = array.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(instrs[0].register_operand(0), Register::parameter(0, 1));
        assert_eq!(instrs[1].immediate_operand(0), -4);
    }

    #[test]
    fn test_jump_target_inline_and_constant() {
        let array = sample_array();
        let instrs: Vec<_> = array.iter().collect::<Result<_, _>>().unwrap();
        // JumpIfFalse at 1, size 2, displacement 2 -> lands on Return at 5
        assert_eq!(array.jump_target(&instrs[1]), Some(5));
        assert_eq!(array.jump_target(&instrs[0]), None);

        // Same target through a pool-indirected displacement
        let code = vec![Opcode::JumpConstant as u8, 0, Opcode::Return as u8];
        let array = BytecodeArray::new(
            code.into_boxed_slice(),
            0,
            1,
            Box::new([Constant::Smi(0)]),
        );
        let instrs: Vec<_> = array.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(array.jump_target(&instrs[0]), Some(2));
    }

    #[test]
    fn test_decode_errors() {
        let array = BytecodeArray::new(Box::new([0xEE]), 0, 1, Box::new([]));
        let items: Vec<_> = array.iter().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0],
            Err(DecodeError::InvalidOpcode(InvalidOpcode(0xEE)))
        );

        // LdaSmi8 with its operand byte missing
        let array = BytecodeArray::new(Box::new([Opcode::LdaSmi8 as u8]), 0, 1, Box::new([]));
        let items: Vec<_> = array.iter().collect();
        assert_eq!(
            items,
            vec![Err(DecodeError::TruncatedInstruction { offset: 0 })]
        );
    }

    #[test]
    fn test_instruction_formatting() {
        let array = sample_array();
        let instrs: Vec<_> = array.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(format!("{:?}", instrs[0]), "LdaZero");
        assert_eq!(format!("{:?}", instrs[1]), "JumpIfFalse +2");
        assert_eq!(format!("{:?}", instrs[2]), "LdaSmi8 +5");

        let code = vec![
            Opcode::Call as u8,
            Register::local(0).to_operand(),
            Register::local(1).to_operand(),
            2,
        ];
        let array = BytecodeArray::new(code.into_boxed_slice(), 2, 1, Box::new([]));
        let instrs: Vec<_> = array.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(format!("{:?}", instrs[0]), "Call r0, r1, #2");
    }

    #[test]
    fn test_constant_formatting() {
        assert_eq!(format!("{:?}", Constant::Smi(-200)), "-200");
        assert_eq!(format!("{:?}", Constant::Double(1.2)), "1.2");
        assert_eq!(format!("{:?}", Constant::Double(3.0)), "3.0");
        assert_eq!(format!("{:?}", Constant::Str("name".into())), "\"name\"");
        assert_eq!(format!("{:?}", Constant::Handle(HeapHandle(7))), "handle#7");
    }

    #[test]
    fn test_disassembly_labels_jump_targets() {
        let listing = format!("{:?}", sample_array());
        assert!(listing.starts_with("BytecodeArray {"));
        assert!(listing.contains("frame_size: 0"));
        assert!(listing.contains("constants: []"));
        assert!(listing.contains("JumpIfFalse +2 (to L0)"));
        assert!(listing.contains("L0:"));
        assert!(listing.ends_with("}"));
    }
}

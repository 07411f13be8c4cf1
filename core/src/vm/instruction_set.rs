//! Bytecode instruction set for the accumulator machine.
//!
//! # Instruction format
//!
//! Instructions are variable-length: one opcode byte followed by that
//! opcode's fixed operand list.
//! ```text
//! ┌────────────┬─────────────────────────┐
//! │   Opcode   │   Operands (0-4 bytes)  │
//! │  (8 bits)  │   per-opcode signature  │
//! └────────────┴─────────────────────────┘
//! ```
//!
//! Every opcode's operand count and per-operand kind are fixed at compile
//! time and published through [`Opcode::operand_types`]. The emitter and
//! the decoder both drive off that one table, so they cannot disagree.
//!
//! # Design principles
//!
//! - **Accumulator-based**: most instructions read and/or write the
//!   implicit accumulator; explicit registers appear only as operands.
//! - **Fixed per-opcode width**: operand width is chosen by opcode, not by
//!   value. Small integer loads get their own opcodes (`LdaZero`,
//!   `LdaSmi8`) so common literals never touch the constant pool.
//! - **Signed register bytes**: a register operand is the register index
//!   encoded as a two's-complement byte. Locals and temporaries are
//!   `0..`, parameters and frame slots are negative (see [`Register`]).
//! - **Paired jump forms**: every jump opcode has a `*Constant` twin of
//!   the same total length whose displacement lives in the constant pool,
//!   so an overflowing displacement can be rewritten in place.
//!
//! # Effect notation
//!
//! `Acc` is the accumulator, `R[x]` the frame register with index `x`,
//! `pool[i]` the constant pool entry `i`.

use core::fmt;

// ============================================================================
// Operand kinds
// ============================================================================

/// Kind (and therefore width) of a single instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    /// Signed 8-bit immediate value.
    Imm8,
    /// Signed 8-bit register index (two's complement byte).
    Reg8,
    /// Unsigned 8-bit constant pool or feedback slot index.
    Idx8,
    /// Unsigned 16-bit index, native byte order.
    Idx16,
    /// Unsigned 8-bit count (e.g. argument count).
    Count8,
}

impl OperandType {
    /// Encoded width of this operand in bytes.
    pub const fn width(self) -> usize {
        match self {
            OperandType::Imm8
            | OperandType::Reg8
            | OperandType::Idx8
            | OperandType::Count8 => 1,
            OperandType::Idx16 => 2,
        }
    }
}

// ============================================================================
// Opcodes
// ============================================================================

/// One opcode of the instruction set (exactly one byte).
///
/// Discriminants are grouped by function; gaps inside a group are
/// reserved. The operand signature of each opcode is fixed and available
/// through [`Opcode::operand_types`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // ========================================================================
    // Accumulator loads (0x00 - 0x0F)
    // ========================================================================
    /// Load the integer zero.
    /// Acc = 0
    LdaZero = 0x00,

    /// Load a small signed integer (-128 to 127).
    /// Operand: i8 value | Acc = value
    LdaSmi8 = 0x01,

    /// Load a constant pool entry.
    /// Operand: u8 pool index | Acc = pool[index]
    LdaConstant = 0x02,

    /// Acc = undefined
    LdaUndefined = 0x03,

    /// Acc = null
    LdaNull = 0x04,

    /// Load the hole sentinel (uninitialized binding marker).
    /// Acc = the_hole
    LdaTheHole = 0x05,

    /// Acc = true
    LdaTrue = 0x06,

    /// Acc = false
    LdaFalse = 0x07,

    // 0x08-0x0F reserved

    // ========================================================================
    // Globals & context (0x10 - 0x1F)
    // ========================================================================
    /// Load a declared script global by name.
    /// Operands: u8 name pool index, u8 feedback slot | Acc = global[name]
    LdaGlobal = 0x10,

    /// Store the accumulator into a declared script global.
    /// Operands: u8 name pool index, u8 feedback slot | global[name] = Acc
    StaGlobal = 0x11,

    /// Load a slot of a context register.
    /// Operands: i8 context register, u8 slot | Acc = R[ctx].slot
    LdaContextSlot = 0x12,

    // 0x13-0x1F reserved

    // ========================================================================
    // Register transfers (0x20 - 0x2F)
    // ========================================================================
    /// Load a register into the accumulator.
    /// Operand: i8 register | Acc = R[reg]
    Ldar = 0x20,

    /// Store the accumulator into a register.
    /// Operand: i8 register | R[reg] = Acc
    Star = 0x21,

    // 0x22-0x2F reserved

    // ========================================================================
    // Property loads & stores (0x30 - 0x3F)
    // ========================================================================
    /// Named property load, sloppy mode. The property key is in the
    /// accumulator.
    /// Operands: i8 object register, u8 feedback slot | Acc = R[obj][Acc]
    LoadIcSloppy = 0x30,

    /// Named property load, strict mode.
    /// Operands: i8 object register, u8 feedback slot | Acc = R[obj][Acc]
    LoadIcStrict = 0x31,

    /// Keyed property load, sloppy mode. The key is in the accumulator.
    /// Operands: i8 object register, u8 feedback slot | Acc = R[obj][Acc]
    KeyedLoadIcSloppy = 0x32,

    /// Keyed property load, strict mode.
    /// Operands: i8 object register, u8 feedback slot | Acc = R[obj][Acc]
    KeyedLoadIcStrict = 0x33,

    /// Named property store, sloppy mode. The value is in the accumulator,
    /// the key in a register.
    /// Operands: i8 object, i8 key, u8 feedback slot | R[obj][R[key]] = Acc
    StoreIcSloppy = 0x34,

    /// Named property store, strict mode.
    /// Operands: i8 object, i8 key, u8 feedback slot | R[obj][R[key]] = Acc
    StoreIcStrict = 0x35,

    /// Keyed property store, sloppy mode.
    /// Operands: i8 object, i8 key, u8 feedback slot | R[obj][R[key]] = Acc
    KeyedStoreIcSloppy = 0x36,

    /// Keyed property store, strict mode.
    /// Operands: i8 object, i8 key, u8 feedback slot | R[obj][R[key]] = Acc
    KeyedStoreIcStrict = 0x37,

    // ========================================================================
    // Binary operations (0x40 - 0x4F)
    // ========================================================================
    // The left operand is in a register, the right operand and the result
    // in the accumulator: Acc = R[reg] <op> Acc.
    /// Operand: i8 register | Acc = R[reg] + Acc
    Add = 0x40,

    /// Operand: i8 register | Acc = R[reg] - Acc
    Sub = 0x41,

    /// Operand: i8 register | Acc = R[reg] * Acc
    Mul = 0x42,

    /// Operand: i8 register | Acc = R[reg] / Acc
    Div = 0x43,

    /// Operand: i8 register | Acc = R[reg] % Acc
    Mod = 0x44,

    /// Operand: i8 register | Acc = R[reg] | Acc
    BitwiseOr = 0x45,

    /// Operand: i8 register | Acc = R[reg] ^ Acc
    BitwiseXor = 0x46,

    /// Operand: i8 register | Acc = R[reg] & Acc
    BitwiseAnd = 0x47,

    /// Operand: i8 register | Acc = R[reg] << Acc
    ShiftLeft = 0x48,

    /// Arithmetic right shift.
    /// Operand: i8 register | Acc = R[reg] >> Acc
    ShiftRight = 0x49,

    /// Logical (zero-filling) right shift.
    /// Operand: i8 register | Acc = R[reg] >>> Acc
    ShiftRightLogical = 0x4A,

    // 0x4B-0x4F reserved

    // ========================================================================
    // Unary operations & casts (0x50 - 0x5F)
    // ========================================================================
    /// Acc = !ToBoolean(Acc)
    LogicalNot = 0x50,

    /// Acc = typeof(Acc)
    TypeOf = 0x51,

    /// Acc = ToBoolean(Acc)
    ToBoolean = 0x52,

    // 0x53-0x5F reserved

    // ========================================================================
    // Calls (0x60 - 0x6F)
    // ========================================================================
    /// Call a value. The callee register, the receiver register and the
    /// argument registers form one contiguous run.
    /// Operands: i8 callee, i8 receiver, u8 argc | Acc = result
    Call = 0x60,

    /// Call a runtime function by id with a contiguous argument run.
    /// Operands: u16 function id, i8 first arg, u8 argc | Acc = result
    CallRuntime = 0x61,

    // 0x62-0x6F reserved

    // ========================================================================
    // Test operations (0x70 - 0x7F)
    // ========================================================================
    // Comparisons mirror the binary operation shape and leave a boolean
    // in the accumulator: Acc = R[reg] <cmp> Acc.
    /// Operand: i8 register | Acc = R[reg] == Acc
    TestEqual = 0x70,

    /// Operand: i8 register | Acc = R[reg] != Acc
    TestNotEqual = 0x71,

    /// Operand: i8 register | Acc = R[reg] === Acc
    TestEqualStrict = 0x72,

    /// Operand: i8 register | Acc = R[reg] !== Acc
    TestNotEqualStrict = 0x73,

    /// Operand: i8 register | Acc = R[reg] < Acc
    TestLessThan = 0x74,

    /// Operand: i8 register | Acc = R[reg] > Acc
    TestGreaterThan = 0x75,

    /// Operand: i8 register | Acc = R[reg] <= Acc
    TestLessThanOrEqual = 0x76,

    /// Operand: i8 register | Acc = R[reg] >= Acc
    TestGreaterThanOrEqual = 0x77,

    /// Property membership test.
    /// Operand: i8 register | Acc = R[reg] in Acc
    TestIn = 0x78,

    /// Operand: i8 register | Acc = R[reg] instanceof Acc
    TestInstanceOf = 0x79,

    // 0x7A-0x7F reserved

    // ========================================================================
    // Jumps (0x80 - 0x8F)
    // ========================================================================
    // Displacements are signed and measured from the END of the jump
    // instruction: a taken jump sets pc = site + size + displacement.
    // Each inline form has a pool-indirected twin of the same length for
    // displacements outside the i8 range.
    /// Unconditional jump.
    /// Operand: i8 displacement
    Jump = 0x80,

    /// Unconditional jump, displacement in the constant pool.
    /// Operand: u8 pool index of a Smi displacement
    JumpConstant = 0x81,

    /// Jump if the accumulator holds true.
    /// Operand: i8 displacement
    JumpIfTrue = 0x82,

    /// Jump if true, displacement in the constant pool.
    /// Operand: u8 pool index of a Smi displacement
    JumpIfTrueConstant = 0x83,

    /// Jump if the accumulator holds false.
    /// Operand: i8 displacement
    JumpIfFalse = 0x84,

    /// Jump if false, displacement in the constant pool.
    /// Operand: u8 pool index of a Smi displacement
    JumpIfFalseConstant = 0x85,

    // 0x86-0x8F reserved

    // ========================================================================
    // Returns (0x90 - 0x9F)
    // ========================================================================
    /// Return the accumulator to the caller.
    Return = 0x90,
    // 0x91-0xFF reserved for future expansion
}
static_assertions::assert_eq_size!(Opcode, u8);

impl Opcode {
    /// Operand signature of this opcode, in encoding order.
    pub const fn operand_types(self) -> &'static [OperandType] {
        use OperandType::*;
        match self {
            Opcode::LdaZero
            | Opcode::LdaUndefined
            | Opcode::LdaNull
            | Opcode::LdaTheHole
            | Opcode::LdaTrue
            | Opcode::LdaFalse
            | Opcode::LogicalNot
            | Opcode::TypeOf
            | Opcode::ToBoolean
            | Opcode::Return => &[],

            Opcode::LdaSmi8 => &[Imm8],
            Opcode::LdaConstant => &[Idx8],
            Opcode::LdaGlobal | Opcode::StaGlobal => &[Idx8, Idx8],
            Opcode::LdaContextSlot => &[Reg8, Idx8],

            Opcode::Ldar | Opcode::Star => &[Reg8],

            Opcode::LoadIcSloppy
            | Opcode::LoadIcStrict
            | Opcode::KeyedLoadIcSloppy
            | Opcode::KeyedLoadIcStrict => &[Reg8, Idx8],

            Opcode::StoreIcSloppy
            | Opcode::StoreIcStrict
            | Opcode::KeyedStoreIcSloppy
            | Opcode::KeyedStoreIcStrict => &[Reg8, Reg8, Idx8],

            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::BitwiseOr
            | Opcode::BitwiseXor
            | Opcode::BitwiseAnd
            | Opcode::ShiftLeft
            | Opcode::ShiftRight
            | Opcode::ShiftRightLogical => &[Reg8],

            Opcode::Call => &[Reg8, Reg8, Count8],
            Opcode::CallRuntime => &[Idx16, Reg8, Count8],

            Opcode::TestEqual
            | Opcode::TestNotEqual
            | Opcode::TestEqualStrict
            | Opcode::TestNotEqualStrict
            | Opcode::TestLessThan
            | Opcode::TestGreaterThan
            | Opcode::TestLessThanOrEqual
            | Opcode::TestGreaterThanOrEqual
            | Opcode::TestIn
            | Opcode::TestInstanceOf => &[Reg8],

            Opcode::Jump | Opcode::JumpIfTrue | Opcode::JumpIfFalse => &[Imm8],
            Opcode::JumpConstant
            | Opcode::JumpIfTrueConstant
            | Opcode::JumpIfFalseConstant => &[Idx8],
        }
    }

    /// Number of operands this opcode takes.
    pub const fn operand_count(self) -> usize {
        self.operand_types().len()
    }

    /// Total encoded size in bytes, opcode byte included.
    pub const fn size(self) -> usize {
        let operands = self.operand_types();
        let mut size = 1;
        let mut i = 0;
        while i < operands.len() {
            size += operands[i].width();
            i += 1;
        }
        size
    }

    /// Check if this is a jump (inline or pool-indirected form).
    pub const fn is_jump(self) -> bool {
        matches!(
            self,
            Opcode::Jump
                | Opcode::JumpConstant
                | Opcode::JumpIfTrue
                | Opcode::JumpIfTrueConstant
                | Opcode::JumpIfFalse
                | Opcode::JumpIfFalseConstant
        )
    }

    /// Check if this jump takes its displacement from the constant pool.
    pub const fn is_jump_constant(self) -> bool {
        matches!(
            self,
            Opcode::JumpConstant
                | Opcode::JumpIfTrueConstant
                | Opcode::JumpIfFalseConstant
        )
    }

    /// The pool-indirected twin of an inline jump, if there is one.
    pub const fn constant_jump_variant(self) -> Option<Opcode> {
        match self {
            Opcode::Jump => Some(Opcode::JumpConstant),
            Opcode::JumpIfTrue => Some(Opcode::JumpIfTrueConstant),
            Opcode::JumpIfFalse => Some(Opcode::JumpIfFalseConstant),
            _ => None,
        }
    }

    /// Check if this is one of the accumulator-and-register binary
    /// operators.
    pub const fn is_binary_operation(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::Div
                | Opcode::Mod
                | Opcode::BitwiseOr
                | Opcode::BitwiseXor
                | Opcode::BitwiseAnd
                | Opcode::ShiftLeft
                | Opcode::ShiftRight
                | Opcode::ShiftRightLogical
        )
    }

    /// Check if this is one of the `Test*` comparison operators.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Opcode::TestEqual
                | Opcode::TestNotEqual
                | Opcode::TestEqualStrict
                | Opcode::TestNotEqualStrict
                | Opcode::TestLessThan
                | Opcode::TestGreaterThan
                | Opcode::TestLessThanOrEqual
                | Opcode::TestGreaterThanOrEqual
                | Opcode::TestIn
                | Opcode::TestInstanceOf
        )
    }

    /// Check if executing this opcode always leaves a boolean in the
    /// accumulator. Used to elide redundant `ToBoolean` casts.
    pub const fn produces_boolean(self) -> bool {
        matches!(
            self,
            Opcode::LdaTrue
                | Opcode::LdaFalse
                | Opcode::LogicalNot
                | Opcode::ToBoolean
                | Opcode::TestEqual
                | Opcode::TestNotEqual
                | Opcode::TestEqualStrict
                | Opcode::TestNotEqualStrict
                | Opcode::TestLessThan
                | Opcode::TestGreaterThan
                | Opcode::TestLessThanOrEqual
                | Opcode::TestGreaterThanOrEqual
                | Opcode::TestIn
                | Opcode::TestInstanceOf
        )
    }

    /// Decode an opcode byte.
    pub const fn from_byte(byte: u8) -> Result<Opcode, InvalidOpcode> {
        let opcode = match byte {
            0x00 => Opcode::LdaZero,
            0x01 => Opcode::LdaSmi8,
            0x02 => Opcode::LdaConstant,
            0x03 => Opcode::LdaUndefined,
            0x04 => Opcode::LdaNull,
            0x05 => Opcode::LdaTheHole,
            0x06 => Opcode::LdaTrue,
            0x07 => Opcode::LdaFalse,
            0x10 => Opcode::LdaGlobal,
            0x11 => Opcode::StaGlobal,
            0x12 => Opcode::LdaContextSlot,
            0x20 => Opcode::Ldar,
            0x21 => Opcode::Star,
            0x30 => Opcode::LoadIcSloppy,
            0x31 => Opcode::LoadIcStrict,
            0x32 => Opcode::KeyedLoadIcSloppy,
            0x33 => Opcode::KeyedLoadIcStrict,
            0x34 => Opcode::StoreIcSloppy,
            0x35 => Opcode::StoreIcStrict,
            0x36 => Opcode::KeyedStoreIcSloppy,
            0x37 => Opcode::KeyedStoreIcStrict,
            0x40 => Opcode::Add,
            0x41 => Opcode::Sub,
            0x42 => Opcode::Mul,
            0x43 => Opcode::Div,
            0x44 => Opcode::Mod,
            0x45 => Opcode::BitwiseOr,
            0x46 => Opcode::BitwiseXor,
            0x47 => Opcode::BitwiseAnd,
            0x48 => Opcode::ShiftLeft,
            0x49 => Opcode::ShiftRight,
            0x4A => Opcode::ShiftRightLogical,
            0x50 => Opcode::LogicalNot,
            0x51 => Opcode::TypeOf,
            0x52 => Opcode::ToBoolean,
            0x60 => Opcode::Call,
            0x61 => Opcode::CallRuntime,
            0x70 => Opcode::TestEqual,
            0x71 => Opcode::TestNotEqual,
            0x72 => Opcode::TestEqualStrict,
            0x73 => Opcode::TestNotEqualStrict,
            0x74 => Opcode::TestLessThan,
            0x75 => Opcode::TestGreaterThan,
            0x76 => Opcode::TestLessThanOrEqual,
            0x77 => Opcode::TestGreaterThanOrEqual,
            0x78 => Opcode::TestIn,
            0x79 => Opcode::TestInstanceOf,
            0x80 => Opcode::Jump,
            0x81 => Opcode::JumpConstant,
            0x82 => Opcode::JumpIfTrue,
            0x83 => Opcode::JumpIfTrueConstant,
            0x84 => Opcode::JumpIfFalse,
            0x85 => Opcode::JumpIfFalseConstant,
            0x90 => Opcode::Return,
            _ => return Err(InvalidOpcode(byte)),
        };
        Ok(opcode)
    }
}

// ============================================================================
// Registers
// ============================================================================

/// An index into the call frame, encoded in operands as the index's
/// two's-complement byte.
///
/// Frame layout, by index:
/// ```text
///   0 ..            locals, then temporaries (counted by frame_size)
///  -1               current context
///  -2               function closure
///  -3               caller frame link
///  -4 ..            parameters, last parameter first; the receiver
///                   (parameter 0) is deepest at -(3 + parameter_count)
/// ```
/// The accumulator is not addressable and has no index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Register(i8);
static_assertions::assert_eq_size!(Register, u8);

/// Number of fixed frame slots between the locals and the parameters.
const FIXED_FRAME_SLOTS: i16 = 3;

impl Register {
    /// Highest addressable local/temporary index.
    pub const MAX_LOCAL_INDEX: u8 = i8::MAX as u8;

    /// A local or temporary register.
    pub const fn local(index: u8) -> Register {
        Register(index as i8)
    }

    /// The parameter with the given ordinal. Ordinal 0 is the receiver;
    /// `parameter_count` includes it.
    pub const fn parameter(ordinal: u8, parameter_count: u8) -> Register {
        Register((ordinal as i16 - FIXED_FRAME_SLOTS - parameter_count as i16) as i8)
    }

    /// The current context slot.
    pub const fn current_context() -> Register {
        Register(-1)
    }

    /// The function closure slot.
    pub const fn function_closure() -> Register {
        Register(-2)
    }

    /// The caller frame link slot.
    pub const fn caller_frame_link() -> Register {
        Register(-3)
    }

    /// Signed frame index of this register.
    pub const fn index(self) -> i8 {
        self.0
    }

    /// Check if this register is a parameter (or the receiver).
    pub const fn is_parameter(self) -> bool {
        self.0 < -(FIXED_FRAME_SLOTS as i8)
    }

    /// Operand byte for this register.
    pub const fn to_operand(self) -> u8 {
        self.0 as u8
    }

    /// Decode a register from its operand byte.
    pub const fn from_operand(byte: u8) -> Register {
        Register(byte as i8)
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// An opcode byte outside the instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOpcode(pub u8);

impl fmt::Display for InvalidOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid opcode byte: 0x{:02X}", self.0)
    }
}

//! Deduplicating constant pool builder.

use ecow::EcoString;
use hashbrown::HashMap;

use crate::{
    Box, Vec,
    compiler::CompileError,
    vm::{Constant, HeapHandle},
};

/// Identity of a constant for dedup purposes.
///
/// Doubles are keyed by bit pattern, so `0.0` and `-0.0` stay distinct
/// and NaN coincides with itself. A Smi never coincides with a Double,
/// even when numerically equal.
#[derive(Clone, PartialEq, Eq, Hash)]
enum ConstantKey {
    Smi(i32),
    Double(u64),
    Str(EcoString),
    Handle(HeapHandle),
}

impl ConstantKey {
    fn of(constant: &Constant) -> ConstantKey {
        match constant {
            Constant::Smi(v) => ConstantKey::Smi(*v),
            Constant::Double(v) => ConstantKey::Double(v.to_bits()),
            Constant::Str(s) => ConstantKey::Str(s.clone()),
            Constant::Handle(h) => ConstantKey::Handle(*h),
        }
    }
}

/// Interns constants into an append-only table with first-seen index
/// order. Indices are stable once assigned and fit the 8-bit operand
/// encoding; a function that needs more than 256 distinct constants
/// fails with [`CompileError::ConstantPoolOverflow`].
#[derive(Default)]
pub struct ConstantPoolBuilder {
    entries: Vec<Constant>,
    index_map: HashMap<ConstantKey, u8>,
}

/// Largest number of entries addressable by an `Idx8` operand.
const MAX_ENTRIES: usize = 256;

impl ConstantPoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `constant`, interning it on first sight.
    pub fn intern(&mut self, constant: Constant) -> Result<u8, CompileError> {
        let key = ConstantKey::of(&constant);
        if let Some(&index) = self.index_map.get(&key) {
            return Ok(index);
        }
        if self.entries.len() >= MAX_ENTRIES {
            return Err(CompileError::ConstantPoolOverflow);
        }
        let index = self.entries.len() as u8;
        self.entries.push(constant);
        self.index_map.insert(key, index);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot the pool for the finished artifact.
    pub fn finish(self) -> Box<[Constant]> {
        self.entries.into_boxed_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_seen_order() {
        let mut pool = ConstantPoolBuilder::new();
        assert_eq!(pool.intern(Constant::Smi(1234)), Ok(0));
        assert_eq!(pool.intern(Constant::Str("a".into())), Ok(1));
        assert_eq!(pool.intern(Constant::Double(1.2)), Ok(2));
        assert_eq!(pool.len(), 3);

        let entries = pool.finish();
        assert_eq!(entries[0], Constant::Smi(1234));
        assert_eq!(entries[1], Constant::Str("a".into()));
        assert_eq!(entries[2], Constant::Double(1.2));
    }

    #[test]
    fn test_dedup_by_value() {
        let mut pool = ConstantPoolBuilder::new();
        assert_eq!(pool.intern(Constant::Smi(1234)), Ok(0));
        assert_eq!(pool.intern(Constant::Smi(5678)), Ok(1));
        assert_eq!(pool.intern(Constant::Smi(1234)), Ok(0));
        assert_eq!(pool.intern(Constant::Str("name".into())), Ok(2));
        assert_eq!(pool.intern(Constant::Str("name".into())), Ok(2));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_doubles_dedup_by_bits() {
        let mut pool = ConstantPoolBuilder::new();
        assert_eq!(pool.intern(Constant::Double(3.14)), Ok(0));
        assert_eq!(pool.intern(Constant::Double(3.14)), Ok(0));

        // Zero signs carry different bits
        assert_eq!(pool.intern(Constant::Double(0.0)), Ok(1));
        assert_eq!(pool.intern(Constant::Double(-0.0)), Ok(2));

        // One NaN bit pattern is one entry
        assert_eq!(pool.intern(Constant::Double(f64::NAN)), Ok(3));
        assert_eq!(pool.intern(Constant::Double(f64::NAN)), Ok(3));
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_smi_and_double_never_unify() {
        let mut pool = ConstantPoolBuilder::new();
        assert_eq!(pool.intern(Constant::Smi(3)), Ok(0));
        assert_eq!(pool.intern(Constant::Double(3.0)), Ok(1));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_handles_dedup_by_identity() {
        let mut pool = ConstantPoolBuilder::new();
        assert_eq!(pool.intern(Constant::Handle(HeapHandle(9))), Ok(0));
        assert_eq!(pool.intern(Constant::Handle(HeapHandle(9))), Ok(0));
        assert_eq!(pool.intern(Constant::Handle(HeapHandle(10))), Ok(1));
    }

    #[test]
    fn test_overflow_after_256_entries() {
        let mut pool = ConstantPoolBuilder::new();
        for i in 0..256 {
            assert_eq!(pool.intern(Constant::Smi(i)), Ok(i as u8));
        }
        assert_eq!(
            pool.intern(Constant::Smi(256)),
            Err(CompileError::ConstantPoolOverflow)
        );
        // A full pool still answers for values it already holds
        assert_eq!(pool.intern(Constant::Smi(0)), Ok(0));
        assert_eq!(pool.intern(Constant::Smi(255)), Ok(255));
    }
}

//! Feedback vector slot allocation.
//!
//! Inline caches need a numbered slot in the function's run-time feedback
//! vector. The compiler only reserves and numbers slots; recording and
//! reading feedback is interpreter business.

use serde::{Deserialize, Serialize};

use crate::{Vec, compiler::CompileError};

/// Index of one slot in a function's feedback vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackSlot(u32);

impl FeedbackSlot {
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// What kind of inline cache a slot backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackSlotKind {
    Load,
    Store,
    KeyedLoad,
    KeyedStore,
    Call,
}

/// Layout of one function's feedback vector, built during generation.
///
/// Numbering is a single increasing sequence across all kinds, and
/// syntactically identical sites never share a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackVectorSpec {
    kinds: Vec<FeedbackSlotKind>,
}

/// Largest number of slots addressable by an `Idx8` operand.
const MAX_SLOTS: usize = 256;

impl FeedbackVectorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next slot for a cache site of `kind`.
    pub fn reserve(&mut self, kind: FeedbackSlotKind) -> Result<FeedbackSlot, CompileError> {
        if self.kinds.len() >= MAX_SLOTS {
            return Err(CompileError::TooManyFeedbackSlots);
        }
        let slot = FeedbackSlot(self.kinds.len() as u32);
        self.kinds.push(kind);
        Ok(slot)
    }

    /// Number of slots the run-time vector needs.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kinds in slot order.
    pub fn kinds(&self) -> &[FeedbackSlotKind] {
        &self.kinds
    }
}

//! Jump labels and patch-site bookkeeping.
//!
//! A label is an index into an arena of records, never a pointer into
//! the code buffer. A record holds the bound offset and at most one
//! pending patch site; control-flow constructs that need several jumps
//! to one place (every `break` in a loop, say) create one label per
//! jump site and bind them all at the same offset.

use crate::{Vec, compiler::CompileError, vm::Opcode};

/// Handle to one jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label(usize);

/// A jump instruction waiting for its label: where it sits and which
/// opcode was written there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchSite {
    pub offset: usize,
    pub opcode: Opcode,
}

#[derive(Default)]
struct LabelRecord {
    /// Byte offset the label is bound to.
    offset: Option<usize>,
    /// The one jump instruction waiting for this label.
    patch_site: Option<PatchSite>,
}

/// Arena of label records for one function.
#[derive(Default)]
pub struct LabelArena {
    records: Vec<LabelRecord>,
}

impl LabelArena {
    pub fn new_label(&mut self) -> Label {
        self.records.push(LabelRecord::default());
        Label(self.records.len() - 1)
    }

    pub fn is_bound(&self, label: Label) -> bool {
        self.records[label.0].offset.is_some()
    }

    /// Offset the label was bound to, if it has been.
    pub fn offset(&self, label: Label) -> Option<usize> {
        self.records[label.0].offset
    }

    /// Bind `label` to `offset`. Returns the patch site that was waiting
    /// for it, which the caller must now rewrite.
    pub fn bind(&mut self, label: Label, offset: usize) -> Result<Option<PatchSite>, CompileError> {
        let record = &mut self.records[label.0];
        if record.offset.is_some() {
            return Err(CompileError::LabelRebound { label: label.0 });
        }
        record.offset = Some(offset);
        Ok(record.patch_site.take())
    }

    /// Park a forward jump until the label is bound.
    pub fn record_patch_site(&mut self, label: Label, site: PatchSite) -> Result<(), CompileError> {
        let record = &mut self.records[label.0];
        debug_assert!(record.offset.is_none(), "patching a bound label");
        if record.patch_site.is_some() {
            return Err(CompileError::LabelReused { label: label.0 });
        }
        record.patch_site = Some(site);
        Ok(())
    }

    /// No label may still hold a pending jump when the array is
    /// finalized.
    pub fn check_all_patched(&self) -> Result<(), CompileError> {
        for (index, record) in self.records.iter().enumerate() {
            if record.patch_site.is_some() {
                return Err(CompileError::UnboundLabel { label: index });
            }
        }
        Ok(())
    }
}

//! Frame register allocation.
//!
//! Locals occupy the low indices of the frame; temporaries grow above
//! them and are handed out strictly LIFO. The allocator never forgets
//! its high-water mark, because `frame_size` in the finished artifact
//! must cover every register the code ever names.

use crate::{
    compiler::CompileError,
    vm::Register,
};

/// Per-function register file: fixed locals plus a LIFO temporary zone.
pub struct RegisterAllocator {
    parameter_count: u8,
    local_count: u16,
    live_temporaries: u16,
    max_temporaries: u16,
}

/// Receiver index is -(3 + parameter_count) and must fit a signed byte.
const MAX_PARAMETERS: u8 = 125;
/// Local/temporary indices run 0..=127.
const MAX_REGISTERS: u16 = Register::MAX_LOCAL_INDEX as u16 + 1;

impl RegisterAllocator {
    /// A fresh frame. `parameter_count` includes the receiver;
    /// `local_count` is the number of declared locals.
    pub fn new(parameter_count: u8, local_count: u16) -> Result<Self, CompileError> {
        if parameter_count > MAX_PARAMETERS || local_count > MAX_REGISTERS {
            return Err(CompileError::FrameOverflow);
        }
        Ok(RegisterAllocator {
            parameter_count,
            local_count,
            live_temporaries: 0,
            max_temporaries: 0,
        })
    }

    /// The register of a declared local.
    pub fn local(&self, index: u16) -> Register {
        debug_assert!(index < self.local_count);
        Register::local(index as u8)
    }

    /// The register of a parameter. Ordinal 0 is the receiver.
    pub fn parameter(&self, ordinal: u8) -> Register {
        debug_assert!(ordinal < self.parameter_count);
        Register::parameter(ordinal, self.parameter_count)
    }

    /// Grab the next temporary above the live ones.
    pub fn allocate_temporary(&mut self) -> Result<Register, CompileError> {
        let index = self.local_count + self.live_temporaries;
        if index >= MAX_REGISTERS {
            return Err(CompileError::FrameOverflow);
        }
        self.live_temporaries += 1;
        if self.live_temporaries > self.max_temporaries {
            self.max_temporaries = self.live_temporaries;
        }
        Ok(Register::local(index as u8))
    }

    /// Release the innermost live temporary. Releases must mirror
    /// allocations in reverse order.
    pub fn release_temporary(&mut self, register: Register) -> Result<(), CompileError> {
        let top = match self.live_temporaries.checked_sub(1) {
            Some(live) => self.local_count + live,
            None => return Err(CompileError::InvalidRegisterRelease { register }),
        };
        if register.index() as i32 != top as i32 {
            return Err(CompileError::InvalidRegisterRelease { register });
        }
        self.live_temporaries -= 1;
        Ok(())
    }

    /// Locals plus the deepest run of temporaries ever live at once.
    pub fn frame_size(&self) -> u16 {
        self.local_count + self.max_temporaries
    }

    pub fn parameter_count(&self) -> u8 {
        self.parameter_count
    }
}

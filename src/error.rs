//! Runtime simulator error implementation.

use sparc_asm::{TrapReason, Word};

use std::io;
use thiserror::Error;

/// Simulator runtime error variants.
///
/// Window overflow and underflow are recovered inside the core and never
/// surface here; everything in this type ends the simulation.
#[derive(Debug, Error)]
pub enum VmError {
    /// A fatal architectural event: unimplemented opcode, explicit trap
    /// instruction or a zero divisor.
    #[error("{reason} at pc {pc:#010x}")]
    Trap {
        /// What the instruction did wrong.
        reason: TrapReason,
        /// Address of the faulting instruction.
        pc: Word,
    },
    /// The memory port rejected an access.
    #[error("memory fault: {0}")]
    Memory(#[from] MemoryError),
    /// The argv marshalling regions cannot hold the provided arguments.
    #[error("program argument area exhausted")]
    ArgvOverflow,
    /// I/O and OS related errors propagated from the host.
    #[error("unrecoverable error: {0}")]
    Io(#[from] io::Error),
}

impl VmError {
    pub(crate) fn from_runtime(error: RuntimeError, pc: Word) -> Self {
        match error {
            RuntimeError::Trap(reason) => Self::Trap { reason, pc },
            RuntimeError::Memory(e) => Self::Memory(e),
        }
    }

    /// The host process exit code for this failure; always non-zero.
    pub const fn exit_code(&self) -> u32 {
        1
    }
}

/// Failure raised by the memory port. Both kinds are fatal to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The access falls outside the guest RAM.
    #[error("address {addr:#010x}+{len} is outside guest memory")]
    OutOfBounds {
        /// Faulting byte address.
        addr: Word,
        /// Width of the access in bytes.
        len: Word,
    },
    /// A half-word or word access without natural alignment.
    #[error("misaligned {len}-byte access at {addr:#010x}")]
    Misaligned {
        /// Faulting byte address.
        addr: Word,
        /// Width of the access in bytes.
        len: Word,
    },
}

/// Error local to a semantic routine, before the faulting program counter
/// is attached. Converted with [`VmError::from_runtime`] by the driver.
#[derive(Debug, Error)]
pub(crate) enum RuntimeError {
    #[error(transparent)]
    Trap(#[from] TrapReason),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

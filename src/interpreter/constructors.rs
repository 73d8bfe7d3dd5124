//! Exposed constructors API for the [`Interpreter`].

use super::Interpreter;
use crate::consts::*;
use crate::memory::{LinearMemory, SharedMemory};
use crate::state::InterruptLine;

impl<M> Interpreter<M> {
    /// Create a core over a memory port.
    ///
    /// The core comes up with every register zeroed and `CWP` at the
    /// architectural reset window; call
    /// [`init_core`](Interpreter::init_core) before stepping.
    pub fn with_memory(memory: M) -> Self {
        Self {
            regs: [0; REG_COUNT],
            bank: [0; REG_BANK_SIZE],
            cwp: CWP_RESET,
            wim: 0,
            y: 0,
            icc: Default::default(),
            pc: 0,
            npc: 4,
            memory,
            intr: None,
            exit: None,
        }
    }

    /// Attach a sleep/wake line checked before every instruction.
    pub fn with_interrupt_line(mut self, line: InterruptLine) -> Self {
        self.intr = Some(line);
        self
    }
}

impl<M: Default> Default for Interpreter<M> {
    fn default() -> Self {
        Self::with_memory(Default::default())
    }
}

impl Interpreter<LinearMemory> {
    /// Create a single-core machine with its own private RAM.
    pub fn with_linear_memory(ram_size: usize) -> Self {
        Self::with_memory(LinearMemory::new(ram_size))
    }
}

impl Interpreter<SharedMemory> {
    /// Create a core over RAM shared with other cores.
    pub fn with_shared_memory(memory: SharedMemory) -> Self {
        Self::with_memory(memory)
    }
}

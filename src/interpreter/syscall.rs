//! The hook surface consumed by the host-side syscall trampoline.
//!
//! Syscall arguments live in the out registers; buffer arguments are
//! guest addresses held there. The trampoline runs synchronously between
//! instructions, so these methods see a quiescent core.

use super::Interpreter;
use crate::consts::{REG_O0, REG_O7};
use crate::error::VmError;
use crate::memory::MemoryPort;

use sparc_asm::Word;

impl<M: MemoryPort> Interpreter<M> {
    /// The `n`-th syscall argument, from `%o0 + n`.
    pub fn syscall_arg(&self, n: usize) -> Word {
        self.reg_read(REG_O0 + n)
    }

    /// Overwrite the `n`-th syscall argument; syscall results return
    /// through argument 0.
    pub fn set_syscall_arg(&mut self, n: usize, value: Word) {
        self.reg_write(REG_O0 + n, value);
    }

    /// Copy guest memory at the address in argument `n` into `buf`.
    pub fn read_guest_buffer(&self, n: usize, buf: &mut [u8]) -> Result<(), VmError> {
        let addr = self.syscall_arg(n);

        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.memory.read_byte(addr.wrapping_add(i as Word))?;
        }

        Ok(())
    }

    /// Copy `buf` into guest memory at the address in argument `n`.
    pub fn write_guest_buffer(&mut self, n: usize, buf: &[u8]) -> Result<(), VmError> {
        let addr = self.syscall_arg(n);

        for (i, byte) in buf.iter().enumerate() {
            self.memory.write_byte(addr.wrapping_add(i as Word), *byte)?;
        }

        Ok(())
    }

    /// Store whole words at the address in argument `n`, for pointer
    /// arrays and other word-granular host data.
    pub fn write_guest_words(&mut self, n: usize, words: &[Word]) -> Result<(), VmError> {
        let addr = self.syscall_arg(n);

        for (i, word) in words.iter().enumerate() {
            self.memory.write_word(addr.wrapping_add(4 * i as Word), *word)?;
        }

        Ok(())
    }

    /// Return to the guest like `retl`: resume two instructions past the
    /// call site recorded in `%o7`, skipping the delay slot.
    pub fn return_from_syscall(&mut self) {
        self.npc = self.reg_read(REG_O7).wrapping_add(8);
        self.pc = self.npc;
        self.npc = self.npc.wrapping_add(4);
    }

    /// Record the guest's exit code; the next [`step`](Interpreter::step)
    /// reports [`ExecuteState::Exit`](crate::state::ExecuteState::Exit).
    pub fn exit_with(&mut self, code: Word) {
        self.exit = Some(code);
    }
}

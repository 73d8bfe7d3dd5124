//! The register-window machine: `SAVE`, `RESTORE` and the window
//! overflow/underflow spill and fill.
//!
//! The bank is a 256-slot circular buffer; the visible window is the view
//! at base `CWP`, and all bank indices reduce modulo 256. Globals are not
//! windowed.

use super::Interpreter;
use crate::consts::*;
use crate::error::RuntimeError;
use crate::memory::MemoryPort;

use sparc_asm::Instruction;

use tracing::trace;

impl<M: MemoryPort> Interpreter<M> {
    /// `SAVE`: rotate down one window.
    ///
    /// The source operands are read in the caller's window, the result is
    /// written in the new one.
    pub(crate) fn op_save(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let result = self.reg_read(instr.rs1()).wrapping_add(self.operand2(instr));

        // Spill visible locals and ins into the bank.
        for i in 16..32 {
            self.bank[(self.cwp as usize + i) % REG_BANK_SIZE] = self.regs[i];
        }

        // The caller's outs become the callee's ins.
        for i in 0..8 {
            self.regs[i + 24] = self.regs[i + 8];
        }

        self.cwp = self.cwp.wrapping_sub(WINDOW_STEP);
        trace!("save: cwp={}", self.cwp >> 4);

        if self.cwp == self.wim {
            self.window_overflow()?;
        }

        // Reload the new window's locals and outs from the bank.
        for i in 8..24 {
            self.regs[i] = self.bank[(self.cwp as usize + i) % REG_BANK_SIZE];
        }

        self.reg_write(instr.rd(), result);
        self.inc_pc();
        Ok(())
    }

    /// `RESTORE`: rotate up one window, symmetric to `SAVE`.
    pub(crate) fn op_restore(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let result = self.reg_read(instr.rs1()).wrapping_add(self.operand2(instr));

        // Spill visible locals and outs into the bank.
        for i in 8..24 {
            self.bank[(self.cwp as usize + i) % REG_BANK_SIZE] = self.regs[i];
        }

        // The callee's ins become the caller's outs.
        for i in 0..8 {
            self.regs[i + 8] = self.regs[i + 24];
        }

        self.cwp = self.cwp.wrapping_add(WINDOW_STEP);
        trace!("restore: cwp={}", self.cwp >> 4);

        if self.cwp == self.wim {
            self.window_underflow()?;
        }

        // Reload the new window's locals and ins from the bank.
        for i in 16..32 {
            self.regs[i] = self.bank[(self.cwp as usize + i) % REG_BANK_SIZE];
        }

        self.reg_write(instr.rd(), result);
        self.inc_pc();
        Ok(())
    }

    /// Spill the window that just became invalid to its stack frame.
    ///
    /// The 16 locals and ins at the advanced `WIM` base go to memory,
    /// using the stack pointer held in that window as the frame base.
    fn window_overflow(&mut self) -> Result<(), RuntimeError> {
        self.wim = self.wim.wrapping_sub(WINDOW_STEP);

        let sp = self.bank[(self.wim as usize + REG_SP) % REG_BANK_SIZE];
        trace!("window overflow: wim={} sp={sp:#010x}", self.wim >> 4);

        for i in 0..WINDOW_SPILL_REGS {
            let value = self.bank[(self.wim as usize + 16 + i) % REG_BANK_SIZE];
            self.memory.write_word(sp.wrapping_add((i as u32) << 2), value)?;
        }

        Ok(())
    }

    /// Refill the boundary window from its stack frame and retreat `WIM`.
    fn window_underflow(&mut self) -> Result<(), RuntimeError> {
        let sp = self.bank[(self.wim as usize + REG_SP) % REG_BANK_SIZE];
        trace!("window underflow: wim={} sp={sp:#010x}", self.wim >> 4);

        for i in 0..WINDOW_SPILL_REGS {
            let value = self.memory.read_word(sp.wrapping_add((i as u32) << 2))?;
            self.bank[(self.wim as usize + 16 + i) % REG_BANK_SIZE] = value;
        }

        self.wim = self.wim.wrapping_add(WINDOW_STEP);
        Ok(())
    }
}

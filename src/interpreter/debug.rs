//! Register and memory marshalling for a remote debug protocol.
//!
//! The debugger sees a 72-entry register file: the 32 visible integer
//! registers, then `Y`, PSR, WIM, PC and nPC at their protocol indices.
//! Floating-point and the remaining privileged slots read as zero and
//! ignore writes.

use super::Interpreter;
use crate::consts::*;
use crate::error::VmError;
use crate::memory::MemoryPort;

use sparc_asm::Word;

impl<M> Interpreter<M> {
    /// Number of registers in the debug protocol's register file.
    pub const fn debug_reg_count() -> usize {
        DEBUG_REG_COUNT
    }

    /// Read a register by its debug protocol index.
    pub fn debug_reg_read(&self, reg: usize) -> Word {
        match reg {
            0..=31 => self.reg_read(reg),
            DEBUG_REG_Y => self.y,
            DEBUG_REG_PSR => self.psr(),
            DEBUG_REG_WIM => self.wim as Word,
            DEBUG_REG_PC => self.pc,
            DEBUG_REG_NPC => self.npc,
            _ => 0,
        }
    }

    /// Write a register by its debug protocol index.
    pub fn debug_reg_write(&mut self, reg: usize, value: Word) {
        match reg {
            0..=31 => self.reg_write(reg, value),
            DEBUG_REG_Y => self.y = value,
            DEBUG_REG_PSR => self.set_psr(value),
            DEBUG_REG_WIM => self.wim = value as u8,
            DEBUG_REG_PC => self.pc = value,
            DEBUG_REG_NPC => self.npc = value,
            _ => {}
        }
    }
}

impl<M: MemoryPort> Interpreter<M> {
    /// Read one byte of guest memory for the debugger.
    pub fn debug_mem_read(&self, addr: Word) -> Result<u8, VmError> {
        Ok(self.memory.read_byte(addr)?)
    }

    /// Write one byte of guest memory for the debugger.
    pub fn debug_mem_write(&mut self, addr: Word, value: u8) -> Result<(), VmError> {
        Ok(self.memory.write_byte(addr, value)?)
    }
}

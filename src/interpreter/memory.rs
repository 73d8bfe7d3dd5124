//! The load/store unit: widening loads, stores, 64-bit pairs and the
//! atomic `LDSTUB`/`SWAP` operations.

use super::Interpreter;
use crate::error::RuntimeError;
use crate::memory::MemoryPort;

use sparc_asm::{Instruction, Word};

impl<M: MemoryPort> Interpreter<M> {
    /// Effective address: `rs1` plus the second operand.
    fn effective_address(&self, instr: &Instruction) -> Word {
        self.reg_read(instr.rs1()).wrapping_add(self.operand2(instr))
    }

    pub(crate) fn op_ldsb(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let value = self.memory.read_byte(addr)? as i8;

        self.reg_write(instr.rd(), value as Word);
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_ldsh(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let value = self.memory.read_half(addr)? as i16;

        self.reg_write(instr.rd(), value as Word);
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_ldub(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let value = self.memory.read_byte(addr)?;

        self.reg_write(instr.rd(), value as Word);
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_lduh(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let value = self.memory.read_half(addr)?;

        self.reg_write(instr.rd(), value as Word);
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_ld(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let value = self.memory.read_word(addr)?;

        self.reg_write(instr.rd(), value);
        self.inc_pc();
        Ok(())
    }

    /// `LDD`: high word to `rd`, low word to `rd + 1`.
    pub(crate) fn op_ldd(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let high = self.memory.read_word(addr)?;
        let low = self.memory.read_word(addr.wrapping_add(4))?;

        self.reg_write(instr.rd(), high);
        self.reg_write((instr.rd() + 1) & 0x1f, low);
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_stb(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        self.memory.write_byte(addr, self.reg_read(instr.rd()) as u8)?;
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_sth(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        self.memory.write_half(addr, self.reg_read(instr.rd()) as u16)?;
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_st(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        self.memory.write_word(addr, self.reg_read(instr.rd()))?;
        self.inc_pc();
        Ok(())
    }

    pub(crate) fn op_std(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let high = self.reg_read(instr.rd());
        let low = self.reg_read((instr.rd() + 1) & 0x1f);

        self.memory.write_word(addr, high)?;
        self.memory.write_word(addr.wrapping_add(4), low)?;
        self.inc_pc();
        Ok(())
    }

    /// Atomic load-byte-and-set: the memory port guarantees the pair is
    /// indivisible relative to other cores.
    pub(crate) fn op_ldstub(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let old = self.memory.ldstub(addr)?;

        self.reg_write(instr.rd(), old as Word);
        self.inc_pc();
        Ok(())
    }

    /// Atomic word exchange between `rd` and memory.
    pub(crate) fn op_swap(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let addr = self.effective_address(instr);
        let old = self.memory.swap(addr, self.reg_read(instr.rd()))?;

        self.reg_write(instr.rd(), old);
        self.inc_pc();
        Ok(())
    }
}

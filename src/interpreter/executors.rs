//! The fetch–decode–dispatch driver.

use super::Interpreter;
use crate::error::{RuntimeError, VmError};
use crate::memory::MemoryPort;
use crate::state::ExecuteState;

use sparc_asm::{Instruction, OpcodeRepr, TrapReason, Word};

use tracing::trace;

impl<M: MemoryPort> Interpreter<M> {
    /// Fetch, decode and execute the instruction at `PC`.
    pub fn step(&mut self) -> Result<ExecuteState, VmError> {
        if let Some(code) = self.exit {
            return Ok(ExecuteState::Exit(code));
        }

        // Generic pre-instruction hook: optional sleep/wake, then trace.
        if let Some(line) = &self.intr {
            line.wait_raised();
        }
        trace!("pc={:#010x} npc={:#010x}", self.pc, self.npc);

        let word = self.memory.read_word(self.pc)?;
        let instr = Instruction::parse_word(word);

        self.instruction(&instr)?;

        Ok(match self.exit {
            Some(code) => ExecuteState::Exit(code),
            None => ExecuteState::Proceed,
        })
    }

    /// Run until the guest exits or a fatal error surfaces; returns the
    /// guest exit code. The host process exit code is this value on
    /// normal completion and [`VmError::exit_code`] otherwise.
    pub fn run(&mut self) -> Result<Word, VmError> {
        loop {
            if let ExecuteState::Exit(code) = self.step()? {
                return Ok(code);
            }
        }
    }

    /// Dispatch one decoded instruction. The semantic routine is
    /// authoritative for all state updates including `PC`/`nPC`.
    pub fn instruction(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let pc = self.pc;

        self._instruction(instr)
            .map_err(|e| VmError::from_runtime(e, pc))
    }

    fn _instruction(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        use OpcodeRepr::*;

        match instr.repr() {
            CALL => self.op_call(instr),
            BICC => self.op_bicc(instr),
            SETHI => self.op_sethi(instr),
            NOP => self.inc_pc(),

            ADD => self.op_add(instr, false, false),
            ADDCC => self.op_add(instr, true, false),
            ADDX => self.op_add(instr, false, true),
            ADDXCC => self.op_add(instr, true, true),
            SUB => self.op_sub(instr, false, false),
            SUBCC => self.op_sub(instr, true, false),
            SUBX => self.op_sub(instr, false, true),
            SUBXCC => self.op_sub(instr, true, true),

            AND => self.op_logic(instr, false, |a, b| a & b),
            ANDCC => self.op_logic(instr, true, |a, b| a & b),
            ANDN => self.op_logic(instr, false, |a, b| a & !b),
            ANDNCC => self.op_logic(instr, true, |a, b| a & !b),
            OR => self.op_logic(instr, false, |a, b| a | b),
            ORCC => self.op_logic(instr, true, |a, b| a | b),
            ORN => self.op_logic(instr, false, |a, b| a | !b),
            ORNCC => self.op_logic(instr, true, |a, b| a | !b),
            XOR => self.op_logic(instr, false, |a, b| a ^ b),
            XORCC => self.op_logic(instr, true, |a, b| a ^ b),
            XNOR => self.op_logic(instr, false, |a, b| !(a ^ b)),
            XNORCC => self.op_logic(instr, true, |a, b| !(a ^ b)),

            SLL => self.op_sll(instr),
            SRL => self.op_srl(instr),
            SRA => self.op_sra(instr),

            UMUL => self.op_umul(instr, false),
            UMULCC => self.op_umul(instr, true),
            SMUL => self.op_smul(instr, false),
            SMULCC => self.op_smul(instr, true),
            UDIV => self.op_udiv(instr, false)?,
            UDIVCC => self.op_udiv(instr, true)?,
            SDIV => self.op_sdiv(instr, false)?,
            SDIVCC => self.op_sdiv(instr, true)?,
            MULSCC => self.op_mulscc(instr),

            RDY => self.op_rdy(instr),
            WRY => self.op_wry(instr),

            JMPL => self.op_jmpl(instr),
            SAVE => self.op_save(instr)?,
            RESTORE => self.op_restore(instr)?,

            LDSB => self.op_ldsb(instr)?,
            LDSH => self.op_ldsh(instr)?,
            LDUB => self.op_ldub(instr)?,
            LDUH => self.op_lduh(instr)?,
            LD => self.op_ld(instr)?,
            LDD => self.op_ldd(instr)?,
            STB => self.op_stb(instr)?,
            STH => self.op_sth(instr)?,
            ST => self.op_st(instr)?,
            STD => self.op_std(instr)?,
            LDSTUB => self.op_ldstub(instr)?,
            SWAP => self.op_swap(instr)?,

            TICC => return Err(TrapReason::TrapInstruction.into()),
            UNIMP => return Err(TrapReason::UnimplementedInstruction.into()),
        }

        Ok(())
    }
}

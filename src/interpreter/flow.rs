//! Program counter sequencing: the delayed-branch discipline, `Bicc`,
//! `CALL` and `JMPL`.

use super::Interpreter;
use crate::consts::REG_O7;

use sparc_asm::{Instruction, Word};

use tracing::trace;

impl<M> Interpreter<M> {
    /// Advance the `(PC, nPC)` pair.
    ///
    /// Every semantic routine names its intent through the tuple: a
    /// non-branch passes all-false, an unconditional transfer passes
    /// `taken` and `always`, a conditional branch passes its evaluated
    /// predicate. The annul bit squashes the delay slot exactly when
    /// `branch && (!taken || always) && annul`.
    pub(crate) fn update_pc(&mut self, branch: bool, taken: bool, always: bool, annul: bool, target: Word) {
        if branch && (!taken || always) && annul {
            // Delay instruction annulled: step straight over it.
            if taken {
                self.npc = target;
            } else {
                self.npc = self.npc.wrapping_add(4);
            }
            self.pc = self.npc;
            self.npc = self.npc.wrapping_add(4);
        } else {
            self.pc = self.npc;
            if taken {
                self.npc = target;
            } else {
                self.npc = self.npc.wrapping_add(4);
            }
        }
    }

    /// Plain program counter advance for non-branch instructions.
    pub(crate) fn inc_pc(&mut self) {
        self.update_pc(false, false, false, false, 0);
    }

    pub(crate) fn op_bicc(&mut self, instr: &Instruction) {
        let cond = instr.cond();
        let taken = cond.is_satisfied(self.icc);
        let target = self.pc.wrapping_add((instr.disp22() as Word) << 2);

        if taken {
            trace!("branch taken to {target:#010x}");
        }

        self.update_pc(true, taken, cond.is_always(), instr.is_annul(), target);
    }

    pub(crate) fn op_call(&mut self, instr: &Instruction) {
        let target = self.pc.wrapping_add((instr.disp30() as Word) << 2);

        self.reg_write(REG_O7, self.pc);
        self.update_pc(true, true, true, false, target);
    }

    pub(crate) fn op_jmpl(&mut self, instr: &Instruction) {
        let target = self.reg_read(instr.rs1()).wrapping_add(self.operand2(instr));

        self.reg_write(instr.rd(), self.pc);
        self.update_pc(true, true, true, false, target);
    }
}

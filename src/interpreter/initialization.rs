//! Guest-entry plumbing: boot register state and argv/argc marshalling.

use super::Interpreter;
use crate::consts::*;
use crate::error::VmError;
use crate::memory::MemoryPort;

use sparc_asm::Word;

use tracing::debug;

impl<M: MemoryPort> Interpreter<M> {
    /// Put the core in its boot state.
    ///
    /// `CWP` starts at the architectural top window, `nPC` trails `PC` by
    /// one word, and the stack pointer lands below the end of RAM with a
    /// disjoint region per `core_index` so simulated cores never share a
    /// stack.
    pub fn init_core(&mut self, entry: Word, core_index: u32) {
        self.regs[REG_G0] = 0;
        self.pc = entry;
        self.npc = entry.wrapping_add(4);
        self.cwp = CWP_RESET;
        self.wim = 0;
        self.exit = None;

        let sp = self
            .ram_end()
            .wrapping_sub(STACK_GUARD)
            .wrapping_sub(core_index.wrapping_mul(CORE_STACK_SIZE));
        self.reg_write(REG_SP, sp);

        debug!("core {core_index} initialized: entry={entry:#010x} sp={sp:#010x}");
    }

    /// Marshal program arguments into guest memory.
    ///
    /// The string bytes go to a 512-byte region at the end of RAM, the
    /// pointer array to the 120-byte region below it; `%o0` receives
    /// `argc`, and `%o1` and `%sp` the pointer array base.
    pub fn set_prog_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), VmError> {
        let ram_end = self.ram_end();
        let str_base = ram_end - ARG_STR_SIZE;
        let ptr_base = ram_end - ARG_PTR_OFFSET;

        if args.len() as Word * 4 > ARG_PTR_SIZE {
            return Err(VmError::ArgvOverflow);
        }

        let mut offset = 0;
        for (i, arg) in args.iter().enumerate() {
            let bytes = arg.as_ref().as_bytes();
            if offset + bytes.len() as Word + 1 > ARG_STR_SIZE {
                return Err(VmError::ArgvOverflow);
            }

            self.memory
                .write_word(ptr_base + 4 * i as Word, str_base + offset)?;

            for byte in bytes {
                self.memory.write_byte(str_base + offset, *byte)?;
                offset += 1;
            }
            self.memory.write_byte(str_base + offset, 0)?;
            offset += 1;
        }

        self.reg_write(REG_O0, args.len() as Word);
        self.reg_write(REG_O1, ptr_base);
        self.reg_write(REG_SP, ptr_base);

        debug!("program arguments set: argc={} argv={ptr_base:#010x}", args.len());
        Ok(())
    }
}

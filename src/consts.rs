//! Machine parameters: register naming, window geometry and the guest
//! memory layout.

use sparc_asm::{RegisterId, Word};

/* REGISTER FILE */

/// Number of architecturally visible integer registers.
pub const REG_COUNT: usize = 32;

/// Size of the physical register bank behind the window file.
pub const REG_BANK_SIZE: usize = 256;

/// `%g0`, hard-wired to zero.
pub const REG_G0: RegisterId = 0;

/// `%o0`, first outgoing argument and syscall argument base.
pub const REG_O0: RegisterId = 8;

/// `%o1`, second outgoing argument.
pub const REG_O1: RegisterId = 9;

/// `%o2`, third outgoing argument.
pub const REG_O2: RegisterId = 10;

/// `%o3`, fourth outgoing argument.
pub const REG_O3: RegisterId = 11;

/// `%sp` (`%o6`), the stack pointer.
pub const REG_SP: RegisterId = 14;

/// `%o7`, the call link register.
pub const REG_O7: RegisterId = 15;

/// `%l0`, first local of the current window.
pub const REG_L0: RegisterId = 16;

/// `%i0`, first incoming argument.
pub const REG_I0: RegisterId = 24;

/// `%fp` (`%i6`), the frame pointer.
pub const REG_FP: RegisterId = 30;

/* REGISTER WINDOWS */

/// CWP/WIM distance between two adjacent windows in the bank.
pub const WINDOW_STEP: u8 = 0x10;

/// Architectural top window before the first `SAVE`.
pub const CWP_RESET: u8 = 0xf0;

/// Registers spilled or filled by a window trap.
pub const WINDOW_SPILL_REGS: usize = 16;

/* GUEST MEMORY LAYOUT */

/// Default guest RAM size in bytes.
pub const DEFAULT_RAM_SIZE: usize = 32 * 1024 * 1024;

/// Stack carved out per simulated core so cores get disjoint stacks.
pub const CORE_STACK_SIZE: Word = 256 * 1024;

/// Gap between the end of RAM and the boot stack pointer.
pub const STACK_GUARD: Word = 1024;

/// Size of the argv string region below the end of RAM.
pub const ARG_STR_SIZE: Word = 512;

/// Size of the argv pointer array below the string region.
pub const ARG_PTR_SIZE: Word = 120;

/// Offset of the argv pointer array from the end of RAM.
pub const ARG_PTR_OFFSET: Word = ARG_STR_SIZE + ARG_PTR_SIZE;

/* DEBUGGER REGISTER FILE */

/// Register count exposed to a remote debugger.
pub const DEBUG_REG_COUNT: usize = 72;

/// Debugger index of the `Y` register.
pub const DEBUG_REG_Y: usize = 64;

/// Debugger index of the PSR.
pub const DEBUG_REG_PSR: usize = 65;

/// Debugger index of the WIM.
pub const DEBUG_REG_WIM: usize = 66;

/// Debugger index of the program counter.
pub const DEBUG_REG_PC: usize = 68;

/// Debugger index of the next program counter.
pub const DEBUG_REG_NPC: usize = 69;

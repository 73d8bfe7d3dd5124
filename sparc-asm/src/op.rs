//! Instruction word builders.
//!
//! One constructor per instruction form, producing the raw big-endian word
//! the decoder consumes. Register arguments follow the assembly operand
//! order: `rs1, rs2, rd` for arithmetic, `[rs1 + off], rd` for loads and
//! `rd, [rs1 + off]` for stores.

use crate::opcode::{fmt, op2, op3, op3_mem};
use crate::{Cond, Immediate13, Immediate22, RegisterId};

const fn f3_reg(op: u32, op3: u32, rd: RegisterId, rs1: RegisterId, rs2: RegisterId) -> u32 {
    op << 30 | (rd as u32) << 25 | op3 << 19 | (rs1 as u32) << 14 | rs2 as u32
}

const fn f3_imm(op: u32, op3: u32, rd: RegisterId, rs1: RegisterId, simm13: Immediate13) -> u32 {
    op << 30 | (rd as u32) << 25 | op3 << 19 | (rs1 as u32) << 14 | 1 << 13 | (simm13 as u32 & 0x1fff)
}

macro_rules! alu_constructors {
    ($($doc:literal $reg:ident $imm:ident $op3:expr;)*) => {
        $(
            #[doc = concat!("Register form of `", $doc, "`.")]
            pub const fn $reg(rs1: RegisterId, rs2: RegisterId, rd: RegisterId) -> u32 {
                f3_reg(fmt::ARITH, $op3, rd, rs1, rs2)
            }

            #[doc = concat!("Immediate form of `", $doc, "`.")]
            pub const fn $imm(rs1: RegisterId, simm13: Immediate13, rd: RegisterId) -> u32 {
                f3_imm(fmt::ARITH, $op3, rd, rs1, simm13)
            }
        )*
    };
}

alu_constructors! {
    "add" add add_imm op3::ADD;
    "addcc" addcc addcc_imm op3::ADDCC;
    "addx" addx addx_imm op3::ADDX;
    "addxcc" addxcc addxcc_imm op3::ADDXCC;
    "sub" sub sub_imm op3::SUB;
    "subcc" subcc subcc_imm op3::SUBCC;
    "subx" subx subx_imm op3::SUBX;
    "subxcc" subxcc subxcc_imm op3::SUBXCC;
    "and" and and_imm op3::AND;
    "andcc" andcc andcc_imm op3::ANDCC;
    "andn" andn andn_imm op3::ANDN;
    "andncc" andncc andncc_imm op3::ANDNCC;
    "or" or or_imm op3::OR;
    "orcc" orcc orcc_imm op3::ORCC;
    "orn" orn orn_imm op3::ORN;
    "orncc" orncc orncc_imm op3::ORNCC;
    "xor" xor xor_imm op3::XOR;
    "xorcc" xorcc xorcc_imm op3::XORCC;
    "xnor" xnor xnor_imm op3::XNOR;
    "xnorcc" xnorcc xnorcc_imm op3::XNORCC;
    "umul" umul umul_imm op3::UMUL;
    "umulcc" umulcc umulcc_imm op3::UMULCC;
    "smul" smul smul_imm op3::SMUL;
    "smulcc" smulcc smulcc_imm op3::SMULCC;
    "udiv" udiv udiv_imm op3::UDIV;
    "udivcc" udivcc udivcc_imm op3::UDIVCC;
    "sdiv" sdiv sdiv_imm op3::SDIV;
    "sdivcc" sdivcc sdivcc_imm op3::SDIVCC;
    "mulscc" mulscc mulscc_imm op3::MULSCC;
    "sll" sll sll_imm op3::SLL;
    "srl" srl srl_imm op3::SRL;
    "sra" sra sra_imm op3::SRA;
    "jmpl" jmpl jmpl_imm op3::JMPL;
    "save" save save_imm op3::SAVE;
    "restore" restore restore_imm op3::RESTORE;
    "wry" wry wry_imm op3::WRY;
}

macro_rules! load_constructors {
    ($($doc:literal $reg:ident $imm:ident $op3:expr;)*) => {
        $(
            #[doc = concat!("Register form of `", $doc, "`.")]
            pub const fn $reg(rs1: RegisterId, rs2: RegisterId, rd: RegisterId) -> u32 {
                f3_reg(fmt::MEM, $op3, rd, rs1, rs2)
            }

            #[doc = concat!("Immediate form of `", $doc, "`.")]
            pub const fn $imm(rs1: RegisterId, simm13: Immediate13, rd: RegisterId) -> u32 {
                f3_imm(fmt::MEM, $op3, rd, rs1, simm13)
            }
        )*
    };
}

load_constructors! {
    "ldsb" ldsb ldsb_imm op3_mem::LDSB;
    "ldsh" ldsh ldsh_imm op3_mem::LDSH;
    "ldub" ldub ldub_imm op3_mem::LDUB;
    "lduh" lduh lduh_imm op3_mem::LDUH;
    "ld" ld ld_imm op3_mem::LD;
    "ldd" ldd ldd_imm op3_mem::LDD;
    "ldstub" ldstub ldstub_imm op3_mem::LDSTUB;
    "swap" swap swap_imm op3_mem::SWAP;
}

macro_rules! store_constructors {
    ($($doc:literal $reg:ident $imm:ident $op3:expr;)*) => {
        $(
            #[doc = concat!("Register form of `", $doc, "`.")]
            pub const fn $reg(rd: RegisterId, rs1: RegisterId, rs2: RegisterId) -> u32 {
                f3_reg(fmt::MEM, $op3, rd, rs1, rs2)
            }

            #[doc = concat!("Immediate form of `", $doc, "`.")]
            pub const fn $imm(rd: RegisterId, rs1: RegisterId, simm13: Immediate13) -> u32 {
                f3_imm(fmt::MEM, $op3, rd, rs1, simm13)
            }
        )*
    };
}

store_constructors! {
    "stb" stb stb_imm op3_mem::STB;
    "sth" sth sth_imm op3_mem::STH;
    "st" st st_imm op3_mem::ST;
    "std" std std_imm op3_mem::STD;
}

/// `call` with a word displacement relative to the call itself.
pub const fn call(disp30: i32) -> u32 {
    fmt::CALL << 30 | disp30 as u32 & 0x3fff_ffff
}

/// `sethi imm22, rd`.
pub const fn sethi(imm22: Immediate22, rd: RegisterId) -> u32 {
    fmt::BRANCH_SETHI << 30 | (rd as u32) << 25 | op2::SETHI << 22 | imm22 & 0x3f_ffff
}

/// `nop` (`sethi 0, %g0`).
pub const fn nop() -> u32 {
    sethi(0, 0)
}

/// `unimp imm22`.
pub const fn unimp(imm22: Immediate22) -> u32 {
    fmt::BRANCH_SETHI << 30 | op2::UNIMP << 22 | imm22 & 0x3f_ffff
}

/// Branch on integer condition codes with a word displacement.
pub const fn bicc(cond: Cond, annul: bool, disp22: i32) -> u32 {
    fmt::BRANCH_SETHI << 30
        | (annul as u32) << 29
        | (cond as u32) << 25
        | op2::BICC << 22
        | disp22 as u32 & 0x3f_ffff
}

/// `ba` / `ba,a`.
pub const fn ba(annul: bool, disp22: i32) -> u32 {
    bicc(Cond::Always, annul, disp22)
}

/// `ticc` on the given predicate (immediate form).
pub const fn ticc(cond: Cond, simm13: Immediate13) -> u32 {
    fmt::ARITH << 30 | (cond as u32) << 25 | op3::TICC << 19 | 1 << 13 | (simm13 as u32 & 0x1fff)
}

/// `rd %y, rd`.
pub const fn rdy(rd: RegisterId) -> u32 {
    f3_reg(fmt::ARITH, op3::RDY, rd, 0, 0)
}

/// `ret` (`jmpl %i7+8, %g0`).
pub const fn ret() -> u32 {
    jmpl_imm(31, 8, 0)
}

/// `retl` (`jmpl %o7+8, %g0`).
pub const fn retl() -> u32 {
    jmpl_imm(15, 8, 0)
}

use crate::opcode::{fmt, op2};
use crate::{Cond, Immediate13, Immediate22, OpcodeRepr, RegisterId, Word};

/// A decoded SPARC-V8 instruction word.
///
/// Every field of the four instruction formats is extracted eagerly; a
/// semantic routine reads the ones its format defines. Displacements and
/// the 13-bit immediate are sign-extended at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    repr: OpcodeRepr,
    rd: RegisterId,
    rs1: RegisterId,
    rs2: RegisterId,
    uses_imm: bool,
    simm13: Immediate13,
    imm22: Immediate22,
    disp22: i32,
    disp30: i32,
    cond: Cond,
    annul: bool,
}

impl Instruction {
    /// Size of an instruction in bytes.
    pub const LEN: Word = 4;

    /// Decode a big-endian instruction word fetched from guest memory.
    pub fn parse_word(word: u32) -> Self {
        let rd = (word >> 25 & 0x1f) as RegisterId;
        let rs1 = (word >> 14 & 0x1f) as RegisterId;
        let rs2 = (word & 0x1f) as RegisterId;
        let uses_imm = word & 1 << 13 != 0;
        let simm13 = ((word & 0x1fff) as i32) << 19 >> 19;
        let imm22 = word & 0x3f_ffff;
        let disp22 = ((word & 0x3f_ffff) as i32) << 10 >> 10;
        let disp30 = ((word & 0x3fff_ffff) as i32) << 2 >> 2;
        let cond = Cond::from(word >> 25);
        let annul = word & 1 << 29 != 0;

        let repr = match word >> 30 {
            fmt::CALL => OpcodeRepr::CALL,
            fmt::BRANCH_SETHI => match word >> 22 & 0x7 {
                op2::BICC => OpcodeRepr::BICC,
                op2::SETHI if rd == 0 && imm22 == 0 => OpcodeRepr::NOP,
                op2::SETHI => OpcodeRepr::SETHI,
                _ => OpcodeRepr::UNIMP,
            },
            fmt::ARITH => OpcodeRepr::from_alu_op3(word >> 19 & 0x3f),
            _ => OpcodeRepr::from_mem_op3(word >> 19 & 0x3f),
        };

        Self {
            repr,
            rd,
            rs1,
            rs2,
            uses_imm,
            simm13,
            imm22,
            disp22,
            disp30,
            cond,
            annul,
        }
    }

    /// Decoded operation.
    pub const fn repr(&self) -> OpcodeRepr {
        self.repr
    }

    /// Destination register field.
    pub const fn rd(&self) -> RegisterId {
        self.rd
    }

    /// First source register field.
    pub const fn rs1(&self) -> RegisterId {
        self.rs1
    }

    /// Second source register field.
    pub const fn rs2(&self) -> RegisterId {
        self.rs2
    }

    /// The `i` bit: the second operand is `simm13` instead of `rs2`.
    pub const fn uses_imm(&self) -> bool {
        self.uses_imm
    }

    /// Sign-extended 13-bit immediate.
    pub const fn simm13(&self) -> Immediate13 {
        self.simm13
    }

    /// 22-bit immediate of `SETHI`/`UNIMP`.
    pub const fn imm22(&self) -> Immediate22 {
        self.imm22
    }

    /// Sign-extended branch displacement, in words.
    pub const fn disp22(&self) -> i32 {
        self.disp22
    }

    /// Sign-extended call displacement, in words.
    pub const fn disp30(&self) -> i32 {
        self.disp30
    }

    /// Branch predicate of a `BICC`/`TICC` word.
    pub const fn cond(&self) -> Cond {
        self.cond
    }

    /// Annul bit of a branch.
    pub const fn is_annul(&self) -> bool {
        self.annul
    }
}

impl From<u32> for Instruction {
    fn from(word: u32) -> Self {
        Self::parse_word(word)
    }
}

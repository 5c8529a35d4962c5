use super::{Opcode, ScalarType};

/// One backend instruction, reduced to the metadata the FP mode pass
/// consumes: opcode, operand/result types, an immediate payload, and the
/// half-selection flag of the mixed-precision FMA encoding.
///
/// Registers are deliberately absent; register assignment happens in a
/// later pass and is irrelevant to mode scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<ScalarType>,
    pub result: Option<ScalarType>,
    /// Immediate payload. Mode writes carry their packed encoding here.
    pub imm: u32,
    /// Mixed-precision FMA reads the high halves of its packed sources.
    pub opsel_hi: bool,
}

impl Instruction {
    #[must_use]
    pub fn new(opcode: Opcode, operands: Vec<ScalarType>, result: Option<ScalarType>) -> Self {
        Self {
            opcode,
            operands,
            result,
            imm: 0,
            opsel_hi: false,
        }
    }

    /// An instruction with no operand/result metadata (branches, calls).
    #[must_use]
    pub fn op(opcode: Opcode) -> Self {
        Self::new(opcode, Vec::new(), None)
    }

    /// An instruction whose only payload is a 16-bit immediate
    /// (`s_round_mode`, `s_denorm_mode`).
    #[must_use]
    pub fn sopp(opcode: Opcode, imm: u16) -> Self {
        Self {
            imm: u32::from(imm),
            ..Self::op(opcode)
        }
    }

    /// A raw MODE register write: `spec` is the hardware register field
    /// descriptor (`(size - 1) << 11 | offset << 6 | register`), `value`
    /// the literal written into the selected bits.
    #[must_use]
    pub fn setreg(spec: u16, value: u16) -> Self {
        Self {
            imm: u32::from(spec) << 16 | u32::from(value),
            ..Self::op(Opcode::SSetRegImm)
        }
    }

    /// Register field descriptor of an `SSetRegImm` instruction.
    #[must_use]
    pub const fn setreg_spec(&self) -> u16 {
        (self.imm >> 16) as u16
    }

    /// Literal value of an `SSetRegImm` instruction.
    #[must_use]
    pub const fn setreg_value(&self) -> u16 {
        self.imm as u16
    }
}

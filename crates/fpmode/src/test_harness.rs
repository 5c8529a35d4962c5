//! Helpers for building small test programs and inspecting pass output.

use crate::ir::{Block, FloatMode, GfxLevel, Instruction, Opcode, Program, ScalarType};

/// A plain f32 add: requires `Round32`/`Denorm32` at ambient values.
#[must_use]
pub fn f32_arith() -> Instruction {
    Instruction::new(
        Opcode::VAddF32,
        vec![ScalarType::F32, ScalarType::F32],
        Some(ScalarType::F32),
    )
}

/// A plain f16 add: requires the 16/64 fields and the overflow bit.
#[must_use]
pub fn f16_arith() -> Instruction {
    Instruction::new(
        Opcode::VAddF16,
        vec![ScalarType::F16, ScalarType::F16],
        Some(ScalarType::F16),
    )
}

/// A plain f64 multiply.
#[must_use]
pub fn f64_arith() -> Instruction {
    Instruction::new(
        Opcode::VMulF64,
        vec![ScalarType::F64, ScalarType::F64],
        Some(ScalarType::F64),
    )
}

/// An integer add: no FP mode requirement at all.
#[must_use]
pub fn int_arith() -> Instruction {
    Instruction::new(
        Opcode::VAddU32,
        vec![ScalarType::U32, ScalarType::U32],
        Some(ScalarType::U32),
    )
}

/// The f32-to-f16 narrowing pseudo with the given forced-rounding opcode.
#[must_use]
pub fn narrowing_cvt(opcode: Opcode) -> Instruction {
    Instruction::new(opcode, vec![ScalarType::F32], Some(ScalarType::F16))
}

/// The overflow-clamping fp8 pack pseudo.
#[must_use]
pub fn fp8_pack_ovfl() -> Instruction {
    Instruction::new(
        Opcode::PVCvtPkFp8F32Ovfl,
        vec![ScalarType::F32, ScalarType::F32],
        Some(ScalarType::FP8),
    )
}

/// A block with the given index and instructions, default ambient mode.
#[must_use]
pub fn block(index: u32, instructions: Vec<Instruction>) -> Block {
    Block {
        index,
        instructions,
        ..Block::new(index)
    }
}

/// Add a CFG edge between two blocks of the program.
pub fn connect(program: &mut Program, from: u32, to: u32) {
    program.blocks[from as usize].successors.push(to);
    program.blocks[to as usize].predecessors.push(from);
}

/// A program whose blocks fall through linearly: `b0 -> b1 -> ...`.
#[must_use]
pub fn linear_program(gfx_level: GfxLevel, blocks: Vec<Vec<Instruction>>) -> Program {
    let mut program = Program::new(gfx_level);
    for (index, instructions) in blocks.into_iter().enumerate() {
        program.blocks.push(block(index as u32, instructions));
    }
    for from in 0..program.blocks.len().saturating_sub(1) {
        connect(&mut program, from as u32, from as u32 + 1);
    }
    program
}

/// A single-block program with the given ambient mode.
#[must_use]
pub fn single_block_program(
    gfx_level: GfxLevel,
    fp_mode: FloatMode,
    instructions: Vec<Instruction>,
) -> Program {
    let mut program = linear_program(gfx_level, vec![instructions]);
    program.blocks[0].fp_mode = fp_mode;
    program
}

/// All mode writes of one block, in order.
#[must_use]
pub fn mode_writes(block: &Block) -> Vec<&Instruction> {
    block
        .instructions
        .iter()
        .filter(|i| i.opcode.is_mode_write())
        .collect()
}

/// Total number of inserted mode writes in the program.
#[must_use]
pub fn count_mode_writes(program: &Program) -> usize {
    program
        .blocks
        .iter()
        .map(|b| mode_writes(b).len())
        .sum()
}

/// Whether any pseudo-opcode survived the pass.
#[must_use]
pub fn has_pseudo(program: &Program) -> bool {
    program
        .blocks
        .iter()
        .flat_map(|b| &b.instructions)
        .any(|i| i.opcode.is_pseudo())
}

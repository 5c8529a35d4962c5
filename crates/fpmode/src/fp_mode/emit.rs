use crate::ir::{Block, Instruction, Opcode};

use super::state::{ModeField, ModeMask, ModeState};
use super::PassCtx;

/// MODE register field descriptors for `s_setreg_imm32_b32`:
/// `(size - 1) << 11 | offset << 6 | register` (MODE is register 1).
const HWREG_MODE_ROUND_DENORM: u16 = (7 << 11) | 1;
/// The fp16 overflow bit sits alone at offset 23.
const HWREG_MODE_FP16_OVFL: u16 = (23 << 6) | 1;

/// Insert the mode writes that establish `state`'s values for the groups
/// in `mask`, in front of `block.instructions[at]`.
///
/// Writes always cover whole groups. The covered fields become
/// authoritative rather than assumed, so they are released from
/// `state.required`, and `last_set` records the block for the loop-header
/// analysis.
pub(super) fn set_mode(
    ctx: &mut PassCtx,
    block: &mut Block,
    state: &mut ModeState,
    mut at: usize,
    mask: ModeMask,
) {
    let mut covered = ModeMask::EMPTY;

    let set_round = mask.intersects(ModeMask::ROUND);
    let set_denorm = mask.intersects(ModeMask::DENORM);
    let set_overflow = mask.intersects(ModeMask::OVERFLOW);

    if ctx.gfx_level.has_split_mode_registers() {
        if set_round {
            block
                .instructions
                .insert(at, Instruction::sopp(Opcode::SRoundMode, state.round()));
            at += 1;
            covered |= ModeMask::ROUND;
        }
        if set_denorm {
            block
                .instructions
                .insert(at, Instruction::sopp(Opcode::SDenormMode, state.denorm()));
            at += 1;
            covered |= ModeMask::DENORM;
        }
    } else if set_round || set_denorm {
        block.instructions.insert(
            at,
            Instruction::setreg(HWREG_MODE_ROUND_DENORM, u16::from(state.round_denorm())),
        );
        at += 1;
        covered |= ModeMask::ROUND | ModeMask::DENORM;
    }

    if set_overflow {
        block.instructions.insert(
            at,
            Instruction::setreg(
                HWREG_MODE_FP16_OVFL,
                u16::from(state.field(ModeField::Fp16Overflow)),
            ),
        );
        covered |= ModeMask::OVERFLOW;
    }

    tracing::trace!(
        block = block.index,
        at,
        ?mask,
        ?covered,
        "inserted mode write"
    );

    state.release(covered);

    for field in covered.iter() {
        let slot = &mut ctx.last_set[field as usize];
        *slot = (*slot).min(block.index);
    }
}

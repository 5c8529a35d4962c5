//! FP mode scheduling: a backward dataflow pass that inserts the minimum
//! number of MODE register writes so every instruction executes under the
//! rounding/denormal/overflow configuration it requires.
//!
//! Blocks are processed in decreasing index order, so every non-back-edge
//! successor is finalized before its predecessors. Within a block,
//! instructions are scanned last to first, joining each instruction's
//! requirement into the running state and inserting a corrective write
//! after the instruction whenever the join conflicts. Loop headers are
//! patched afterwards from the `last_set` bookkeeping, since a loop body
//! that rewrites a mode field invalidates the header's straight-line join.

mod classify;
mod emit;
mod state;

pub use state::{MODE_FIELD_COUNT, ModeField, ModeMask, ModeState};

use crate::error::{Error, Result};
use crate::ir::{GfxLevel, Program};

use classify::classify;
use emit::set_mode;

/// Mutable context of one pass invocation.
pub(crate) struct PassCtx {
    /// Exported state per block, keyed by block index; valid only for
    /// blocks already processed (indices above the cursor).
    block_states: Vec<ModeState>,
    /// Lowest block index whose instructions write each field.
    last_set: [u32; MODE_FIELD_COUNT],
    gfx_level: GfxLevel,
}

/// Run the FP mode insertion pass over a whole program.
///
/// On success the instruction stream contains every required mode write
/// and no pseudo-opcodes. An error means a requirement classification
/// and the emitter's group coverage disagree, which is a compiler defect,
/// not a property of the input.
pub fn insert_fp_mode(program: &mut Program) -> Result<()> {
    let mut ctx = PassCtx {
        block_states: vec![ModeState::default(); program.blocks.len()],
        last_set: [u32::MAX; MODE_FIELD_COUNT],
        gfx_level: program.gfx_level,
    };

    for index in (0..program.blocks.len()).rev() {
        process_block(&mut ctx, program, index)?;
    }

    tracing::debug!(
        blocks = program.blocks.len(),
        declared_mode = program.declared_mode,
        "fp mode insertion finished"
    );

    Ok(())
}

fn process_block(ctx: &mut PassCtx, program: &mut Program, index: usize) -> Result<()> {
    let default_state = ModeState::from_ambient(&program.blocks[index].fp_mode);
    let mut state = default_state;

    if program.blocks[index].restore_defaults_on_exit {
        // Hardware-visible epilogue: nothing may float past this block.
        debug_assert!(program.blocks[index].successors.is_empty());
        state.pin_all();
    } else {
        let successors = program.blocks[index].successors.clone();
        for succ in successors {
            // Back-edges are resolved by the loop-header fixup instead.
            if succ as usize <= index {
                continue;
            }

            let mut exported = ctx.block_states[succ as usize];
            let conflicts = state.join(&exported);
            if !conflicts.is_empty() {
                // Irreconcilable paths: establish the successor's needs
                // explicitly at its start, then the retry merges cleanly
                // because the successor no longer pins those groups.
                let succ_block = &mut program.blocks[succ as usize];
                set_mode(ctx, succ_block, &mut exported, 0, conflicts);
                ctx.block_states[succ as usize] = exported;

                if !state.join(&exported).is_empty() {
                    return Err(Error::BlockModeConflict { block: succ as usize });
                }
            }
        }
    }

    let entry_state_preset = program.entry_state_preset;
    let entry_mode_unknown = program.entry_mode_unknown;
    let mut declared_mode = None;

    let block = &mut program.blocks[index];

    let mut idx = block.instructions.len();
    while idx > 0 {
        idx -= 1;

        let instr_req = classify(&mut block.instructions[idx], &default_state, ctx.gfx_level);

        let conflicts = state.join(&instr_req);
        if !conflicts.is_empty() {
            // The mode required here is incompatible with what the code
            // after this instruction needs: re-establish that mode right
            // after the instruction and adopt this one's requirement.
            set_mode(ctx, block, &mut state, idx + 1, conflicts);

            if !state.join(&instr_req).is_empty() {
                return Err(Error::ModeConflict {
                    block: index,
                    instruction: idx,
                    opcode: block.instructions[idx].opcode,
                });
            }
        }
    }

    if block.predecessors.is_empty() {
        // The command stream always launches with the overflow bit clear.
        if state.field(ModeField::Fp16Overflow) == 0 {
            state.release(ModeField::Fp16Overflow.bit());
        }

        if entry_state_preset || index != 0 {
            // The ambient state is already in effect; only fields pinned
            // to a different value need a write.
            for field in state.required().iter() {
                if state.field(field) == default_state.field(field) {
                    state.release(field.bit());
                }
            }
        } else if !entry_mode_unknown {
            // Fold the round/denorm requirement into the static declared
            // mode; only the overflow bit can't be expressed there.
            declared_mode = Some(state.round_denorm());
            state.restrict(ModeMask::OVERFLOW);
        }

        if !state.required().is_empty() {
            let mask = state.required();
            set_mode(ctx, block, &mut state, 0, mask);
        }
    } else if block.loop_header {
        let max_pred = block.predecessors.iter().copied().max().unwrap_or(0);
        if max_pred >= block.index {
            // A mode write anywhere in the loop body means later
            // iterations re-enter this header with a different mode than
            // the straight-line join computed.
            let mut to_set = ModeMask::EMPTY;
            for field in state.required().iter() {
                if ctx.last_set[field as usize] <= max_pred {
                    to_set |= field.bit();
                }
            }
            if !to_set.is_empty() {
                set_mode(ctx, block, &mut state, 0, to_set);
            }
        }
    }

    ctx.block_states[index] = state;

    if let Some(mode) = declared_mode {
        program.declared_mode = mode;
    }

    Ok(())
}

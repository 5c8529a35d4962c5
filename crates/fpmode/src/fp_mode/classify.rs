use crate::ir::{GfxLevel, Instruction, Opcode, RoundMode};

use super::state::{ModeField, ModeMask, ModeState};

/// Derive the mode requirement of one instruction.
///
/// Pseudo-opcodes are lowered to their concrete opcode as a side effect;
/// everything else is classified through fixed tables and the generic
/// operand/result width rule, pinning the touched fields to the block's
/// ambient values.
pub(super) fn classify(
    instr: &mut Instruction,
    ambient: &ModeState,
    gfx_level: GfxLevel,
) -> ModeState {
    let mut req = ModeState::default();

    match instr.opcode {
        Opcode::PVCvtF16F32Rtne | Opcode::PSCvtF16F32Rtne => {
            req.require(ModeField::Round16_64, RoundMode::NearestEven as u8);
            req.require(ModeField::Fp16Overflow, ambient.field(ModeField::Fp16Overflow));
            req.require(ModeField::Denorm16_64, ambient.field(ModeField::Denorm16_64));

            instr.opcode = if instr.opcode == Opcode::PVCvtF16F32Rtne {
                Opcode::VCvtF16F32
            } else {
                Opcode::SCvtF16F32
            };
        }
        Opcode::PVCvtF16F32Rtpi | Opcode::PVCvtF16F32Rtni => {
            let round = if instr.opcode == Opcode::PVCvtF16F32Rtpi {
                RoundMode::PositiveInf
            } else {
                RoundMode::NegativeInf
            };
            req.require(ModeField::Round16_64, round as u8);
            req.require(ModeField::Fp16Overflow, ambient.field(ModeField::Fp16Overflow));
            req.require(ModeField::Denorm16_64, ambient.field(ModeField::Denorm16_64));
            req.require(ModeField::Denorm32, ambient.field(ModeField::Denorm32));

            instr.opcode = Opcode::VCvtF16F32;
        }
        Opcode::PVCvtPkFp8F32Ovfl => {
            req.require(ModeField::Fp16Overflow, 1);

            instr.opcode = Opcode::VCvtPkFp8F32;
        }
        Opcode::PVFmaMixloF16Rtz | Opcode::PVFmaMixhiF16Rtz => {
            req.require(ModeField::Round16_64, RoundMode::TowardZero as u8);
            req.require(ModeField::Round32, ambient.field(ModeField::Round32));
            req.require(ModeField::Denorm16_64, ambient.field(ModeField::Denorm16_64));
            req.require(ModeField::Denorm32, ambient.field(ModeField::Denorm32));

            instr.opcode = if instr.opcode == Opcode::PVFmaMixloF16Rtz {
                Opcode::VFmaMixloF16
            } else {
                Opcode::VFmaMixhiF16
            };
        }
        _ => {
            for field in default_needs(instr, gfx_level).iter() {
                req.require(field, ambient.field(field));
            }
        }
    }

    req
}

/// Mode fields an instruction depends on, with values taken from the
/// ambient default. Rules are checked in priority order.
fn default_needs(instr: &Instruction, gfx_level: GfxLevel) -> ModeMask {
    if gfx_level.vmem_atomics_use_mode() {
        let needs = vmem_atomic_needs(instr.opcode);
        if !needs.is_empty() {
            return needs;
        }
    }

    // The callee may clobber any mode bit before control returns here.
    if instr.opcode.is_control_transfer() {
        return ModeMask::ALL;
    }

    let needs = shared_atomic_needs(instr.opcode);
    if !needs.is_empty() {
        return needs;
    }

    // Fixed-function: the u8 pack rounds through the f32 path.
    if instr.opcode == Opcode::VCvtPkU8F32 {
        return ModeField::Round32.bit();
    }

    if !instr.opcode.is_alu() {
        return ModeMask::EMPTY;
    }
    let Some(result) = instr.result else {
        return ModeMask::EMPTY;
    };

    let mut needs = ModeMask::EMPTY;

    for ty in &instr.operands {
        if !ty.is_float_like() {
            continue;
        }
        if ty.bits == 32 {
            needs |= ModeField::Denorm32.bit();
        } else if ty.bits >= 16 {
            needs |= ModeField::Denorm16_64.bit();
        }
    }

    if result.is_float_like() {
        if result.bits == 32 {
            needs |= ModeField::Denorm32.bit() | ModeField::Round32.bit();
        } else if result.bits >= 16 {
            needs |= ModeField::Denorm16_64.bit() | ModeField::Round16_64.bit();
        }

        if result.bits <= 16 {
            needs |= ModeField::Fp16Overflow.bit();
        }
    }

    // Mixed-precision FMA reads or writes 32-bit values regardless of the
    // declared 16-bit result/operand types.
    if matches!(instr.opcode, Opcode::VFmaMixloF16 | Opcode::VFmaMixhiF16) {
        needs |= ModeField::Round32.bit();
    } else if instr.opcode == Opcode::VFmaMixF32 && instr.opsel_hi {
        needs |= ModeField::Denorm16_64.bit();
    }

    if ignores_round_mode(instr.opcode) {
        needs = needs & !(ModeMask::ROUND | ModeMask::OVERFLOW);
    }

    needs
}

/// Shared-memory float atomics: the ALU path they use honors the denorm
/// bit of their fixed operand width.
fn shared_atomic_needs(opcode: Opcode) -> ModeMask {
    match opcode {
        Opcode::DsAddF32
        | Opcode::DsAddRtnF32
        | Opcode::DsMinF32
        | Opcode::DsMaxF32
        | Opcode::DsCmpstF32 => ModeField::Denorm32.bit(),
        Opcode::DsMinF64
        | Opcode::DsMaxF64
        | Opcode::DsCmpstF64
        | Opcode::DsPkAddF16
        | Opcode::DsPkAddBf16 => ModeField::Denorm16_64.bit(),
        _ => ModeMask::EMPTY,
    }
}

/// Vector-memory and flat-addressed float atomics. Only consulted on
/// generations where these still read the MODE register denorm bits.
fn vmem_atomic_needs(opcode: Opcode) -> ModeMask {
    match opcode {
        Opcode::BufferAtomicAddF32
        | Opcode::BufferAtomicMinF32
        | Opcode::BufferAtomicMaxF32
        | Opcode::BufferAtomicCmpswapF32
        | Opcode::FlatAtomicAddF32
        | Opcode::FlatAtomicMinF32
        | Opcode::GlobalAtomicAddF32
        | Opcode::GlobalAtomicMaxF32
        | Opcode::ImageAtomicAddF32 => ModeField::Denorm32.bit(),
        Opcode::BufferAtomicMinF64
        | Opcode::BufferAtomicMaxF64
        | Opcode::BufferAtomicPkAddF16
        | Opcode::BufferAtomicPkAddBf16
        | Opcode::FlatAtomicMinF64
        | Opcode::GlobalAtomicMaxF64
        | Opcode::GlobalAtomicPkAddF16 => ModeField::Denorm16_64.bit(),
        _ => ModeMask::EMPTY,
    }
}

/// Instructions that are provably insensitive to rounding mode and fp16
/// overflow behavior, even when the generic width rule would imply a
/// requirement: min/max families, comparisons, lossless widening
/// conversions, explicit-rounding packs, and the floor/ceil/trunc/rndne
/// family.
fn ignores_round_mode(opcode: Opcode) -> bool {
    matches!(
        opcode,
        Opcode::VMinF16
            | Opcode::VMinF32
            | Opcode::VMinF64
            | Opcode::VMaxF16
            | Opcode::VMaxF32
            | Opcode::VMaxF64
            | Opcode::VMed3F32
            | Opcode::VMinimumF32
            | Opcode::VMaximumF32
            | Opcode::VCmpLtF16
            | Opcode::VCmpLtF32
            | Opcode::VCmpEqF32
            | Opcode::VCvtF32F16
            | Opcode::VCvtF64F32
            | Opcode::VCvtPkrtzF16F32
            | Opcode::VPackB32F16
            | Opcode::VFloorF16
            | Opcode::VFloorF32
            | Opcode::VFloorF64
            | Opcode::VCeilF16
            | Opcode::VCeilF32
            | Opcode::VCeilF64
            | Opcode::VTruncF32
            | Opcode::VRndneF32
            | Opcode::VFractF32
            | Opcode::SMinF32
            | Opcode::SMaxF32
            | Opcode::SCvtF32F16
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FloatMode, ScalarType};

    fn ambient() -> ModeState {
        ModeState::from_ambient(&FloatMode::default())
    }

    fn classify_fresh(mut instr: Instruction, gfx_level: GfxLevel) -> (ModeState, Instruction) {
        let req = classify(&mut instr, &ambient(), gfx_level);
        (req, instr)
    }

    #[test]
    fn f32_arith_needs_round32_and_denorm32() {
        let instr = Instruction::new(
            Opcode::VAddF32,
            vec![ScalarType::F32, ScalarType::F32],
            Some(ScalarType::F32),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(
            req.required(),
            ModeField::Round32.bit() | ModeField::Denorm32.bit()
        );
    }

    #[test]
    fn f16_arith_needs_overflow_bit() {
        let instr = Instruction::new(
            Opcode::VAddF16,
            vec![ScalarType::F16, ScalarType::F16],
            Some(ScalarType::F16),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(
            req.required(),
            ModeField::Round16_64.bit() | ModeField::Denorm16_64.bit() | ModeField::Fp16Overflow.bit()
        );
    }

    #[test]
    fn f64_arith_uses_the_16_64_fields() {
        let instr = Instruction::new(
            Opcode::VMulF64,
            vec![ScalarType::F64, ScalarType::F64],
            Some(ScalarType::F64),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(
            req.required(),
            ModeField::Round16_64.bit() | ModeField::Denorm16_64.bit()
        );
    }

    #[test]
    fn narrowing_cvt_mixes_operand_and_result_widths() {
        let instr = Instruction::new(
            Opcode::VCvtF16F32,
            vec![ScalarType::F32],
            Some(ScalarType::F16),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(
            req.required(),
            ModeField::Denorm32.bit()
                | ModeField::Denorm16_64.bit()
                | ModeField::Round16_64.bit()
                | ModeField::Fp16Overflow.bit()
        );
    }

    #[test]
    fn min_max_ignores_rounding_but_not_denorms() {
        let instr = Instruction::new(
            Opcode::VMinF32,
            vec![ScalarType::F32, ScalarType::F32],
            Some(ScalarType::F32),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(req.required(), ModeField::Denorm32.bit());
    }

    #[test]
    fn comparison_has_no_round_requirement() {
        let instr = Instruction::new(
            Opcode::VCmpLtF16,
            vec![ScalarType::F16, ScalarType::F16],
            Some(ScalarType::B1),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(req.required(), ModeField::Denorm16_64.bit());
    }

    #[test]
    fn non_fp_alu_requires_nothing() {
        let instr = Instruction::new(
            Opcode::VAddU32,
            vec![ScalarType::U32, ScalarType::U32],
            Some(ScalarType::U32),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert!(req.required().is_empty());
    }

    #[test]
    fn call_requires_every_field() {
        let (req, _) = classify_fresh(Instruction::op(Opcode::SCallB64), GfxLevel::Gfx11);
        assert_eq!(req.required(), ModeMask::ALL);
    }

    #[test]
    fn shared_atomic_uses_fixed_width_table() {
        let (req, _) = classify_fresh(Instruction::op(Opcode::DsPkAddBf16), GfxLevel::Gfx11);
        assert_eq!(req.required(), ModeField::Denorm16_64.bit());
    }

    #[test]
    fn vmem_atomic_gated_by_generation() {
        let (req, _) = classify_fresh(Instruction::op(Opcode::BufferAtomicAddF32), GfxLevel::Gfx11);
        assert_eq!(req.required(), ModeField::Denorm32.bit());

        let (req, _) = classify_fresh(Instruction::op(Opcode::BufferAtomicAddF32), GfxLevel::Gfx12);
        assert!(req.required().is_empty());
    }

    #[test]
    fn mix_fma_halves_need_round32() {
        let instr = Instruction::new(
            Opcode::VFmaMixloF16,
            vec![ScalarType::F32, ScalarType::F16, ScalarType::F32],
            Some(ScalarType::F16),
        );
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert!(req.required().contains(ModeField::Round32));
    }

    #[test]
    fn mix_fma_hi_sources_need_denorm16() {
        let mut instr = Instruction::new(
            Opcode::VFmaMixF32,
            vec![ScalarType::F32, ScalarType::F32, ScalarType::F32],
            Some(ScalarType::F32),
        );
        let (req, _) = classify_fresh(instr.clone(), GfxLevel::Gfx11);
        assert!(!req.required().contains(ModeField::Denorm16_64));

        instr.opsel_hi = true;
        let (req, _) = classify_fresh(instr, GfxLevel::Gfx11);
        assert!(req.required().contains(ModeField::Denorm16_64));
    }

    #[test]
    fn pseudo_cvt_rtne_lowers_and_pins_round() {
        let instr = Instruction::new(
            Opcode::PVCvtF16F32Rtne,
            vec![ScalarType::F32],
            Some(ScalarType::F16),
        );
        let (req, lowered) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(lowered.opcode, Opcode::VCvtF16F32);
        assert_eq!(req.field(ModeField::Round16_64), RoundMode::NearestEven as u8);
        assert!(req.required().contains(ModeField::Round16_64));
        assert!(req.required().contains(ModeField::Denorm16_64));
        assert!(req.required().contains(ModeField::Fp16Overflow));
    }

    #[test]
    fn pseudo_fp8_pack_forces_overflow_clamp() {
        let instr = Instruction::new(
            Opcode::PVCvtPkFp8F32Ovfl,
            vec![ScalarType::F32, ScalarType::F32],
            Some(ScalarType::FP8),
        );
        let (req, lowered) = classify_fresh(instr, GfxLevel::Gfx11);
        assert_eq!(lowered.opcode, Opcode::VCvtPkFp8F32);
        assert_eq!(req.required(), ModeField::Fp16Overflow.bit());
        assert_eq!(req.field(ModeField::Fp16Overflow), 1);
    }
}

use std::fmt;

use super::{BaseType, Block, Instruction, Opcode, Program, ScalarType};

impl Opcode {
    /// Assembly-style mnemonic, for listings and diagnostics.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::SMovB32 => "s_mov_b32",
            Opcode::SAddU32 => "s_add_u32",
            Opcode::SMinF32 => "s_min_f32",
            Opcode::SMaxF32 => "s_max_f32",
            Opcode::SCvtF32F16 => "s_cvt_f32_f16",
            Opcode::SCvtF16F32 => "s_cvt_f16_f32",
            Opcode::VMovB32 => "v_mov_b32",
            Opcode::VAddU32 => "v_add_u32",
            Opcode::VAddF16 => "v_add_f16",
            Opcode::VAddF32 => "v_add_f32",
            Opcode::VAddF64 => "v_add_f64",
            Opcode::VSubF32 => "v_sub_f32",
            Opcode::VMulF16 => "v_mul_f16",
            Opcode::VMulF32 => "v_mul_f32",
            Opcode::VMulF64 => "v_mul_f64",
            Opcode::VFmaF16 => "v_fma_f16",
            Opcode::VFmaF32 => "v_fma_f32",
            Opcode::VFmaF64 => "v_fma_f64",
            Opcode::VMinF16 => "v_min_f16",
            Opcode::VMinF32 => "v_min_f32",
            Opcode::VMinF64 => "v_min_f64",
            Opcode::VMaxF16 => "v_max_f16",
            Opcode::VMaxF32 => "v_max_f32",
            Opcode::VMaxF64 => "v_max_f64",
            Opcode::VMed3F32 => "v_med3_f32",
            Opcode::VMinimumF32 => "v_minimum_f32",
            Opcode::VMaximumF32 => "v_maximum_f32",
            Opcode::VFloorF16 => "v_floor_f16",
            Opcode::VFloorF32 => "v_floor_f32",
            Opcode::VFloorF64 => "v_floor_f64",
            Opcode::VCeilF16 => "v_ceil_f16",
            Opcode::VCeilF32 => "v_ceil_f32",
            Opcode::VCeilF64 => "v_ceil_f64",
            Opcode::VTruncF32 => "v_trunc_f32",
            Opcode::VRndneF32 => "v_rndne_f32",
            Opcode::VFractF32 => "v_fract_f32",
            Opcode::VCmpLtF16 => "v_cmp_lt_f16",
            Opcode::VCmpLtF32 => "v_cmp_lt_f32",
            Opcode::VCmpEqF32 => "v_cmp_eq_f32",
            Opcode::VCvtF32F16 => "v_cvt_f32_f16",
            Opcode::VCvtF16F32 => "v_cvt_f16_f32",
            Opcode::VCvtF64F32 => "v_cvt_f64_f32",
            Opcode::VCvtF32F64 => "v_cvt_f32_f64",
            Opcode::VCvtF32I32 => "v_cvt_f32_i32",
            Opcode::VCvtI32F32 => "v_cvt_i32_f32",
            Opcode::VCvtPkrtzF16F32 => "v_cvt_pkrtz_f16_f32",
            Opcode::VPackB32F16 => "v_pack_b32_f16",
            Opcode::VCvtPkU8F32 => "v_cvt_pk_u8_f32",
            Opcode::VCvtPkFp8F32 => "v_cvt_pk_fp8_f32",
            Opcode::VFmaMixF32 => "v_fma_mix_f32",
            Opcode::VFmaMixloF16 => "v_fma_mixlo_f16",
            Opcode::VFmaMixhiF16 => "v_fma_mixhi_f16",
            Opcode::PVCvtF16F32Rtne => "p_v_cvt_f16_f32_rtne",
            Opcode::PSCvtF16F32Rtne => "p_s_cvt_f16_f32_rtne",
            Opcode::PVCvtF16F32Rtpi => "p_v_cvt_f16_f32_rtpi",
            Opcode::PVCvtF16F32Rtni => "p_v_cvt_f16_f32_rtni",
            Opcode::PVCvtPkFp8F32Ovfl => "p_v_cvt_pk_fp8_f32_ovfl",
            Opcode::PVFmaMixloF16Rtz => "p_v_fma_mixlo_f16_rtz",
            Opcode::PVFmaMixhiF16Rtz => "p_v_fma_mixhi_f16_rtz",
            Opcode::DsAddF32 => "ds_add_f32",
            Opcode::DsAddRtnF32 => "ds_add_rtn_f32",
            Opcode::DsMinF32 => "ds_min_f32",
            Opcode::DsMaxF32 => "ds_max_f32",
            Opcode::DsCmpstF32 => "ds_cmpst_f32",
            Opcode::DsMinF64 => "ds_min_f64",
            Opcode::DsMaxF64 => "ds_max_f64",
            Opcode::DsCmpstF64 => "ds_cmpst_f64",
            Opcode::DsPkAddF16 => "ds_pk_add_f16",
            Opcode::DsPkAddBf16 => "ds_pk_add_bf16",
            Opcode::BufferAtomicAddF32 => "buffer_atomic_add_f32",
            Opcode::BufferAtomicMinF32 => "buffer_atomic_min_f32",
            Opcode::BufferAtomicMaxF32 => "buffer_atomic_max_f32",
            Opcode::BufferAtomicCmpswapF32 => "buffer_atomic_cmpswap_f32",
            Opcode::BufferAtomicMinF64 => "buffer_atomic_min_f64",
            Opcode::BufferAtomicMaxF64 => "buffer_atomic_max_f64",
            Opcode::BufferAtomicPkAddF16 => "buffer_atomic_pk_add_f16",
            Opcode::BufferAtomicPkAddBf16 => "buffer_atomic_pk_add_bf16",
            Opcode::FlatAtomicAddF32 => "flat_atomic_add_f32",
            Opcode::FlatAtomicMinF32 => "flat_atomic_min_f32",
            Opcode::FlatAtomicMinF64 => "flat_atomic_min_f64",
            Opcode::GlobalAtomicAddF32 => "global_atomic_add_f32",
            Opcode::GlobalAtomicMaxF32 => "global_atomic_max_f32",
            Opcode::GlobalAtomicMaxF64 => "global_atomic_max_f64",
            Opcode::GlobalAtomicPkAddF16 => "global_atomic_pk_add_f16",
            Opcode::ImageAtomicAddF32 => "image_atomic_add_f32",
            Opcode::BufferLoadDword => "buffer_load_dword",
            Opcode::BufferStoreDword => "buffer_store_dword",
            Opcode::DsReadB32 => "ds_read_b32",
            Opcode::DsWriteB32 => "ds_write_b32",
            Opcode::SCallB64 => "s_call_b64",
            Opcode::SSetpcB64 => "s_setpc_b64",
            Opcode::SSwappcB64 => "s_swappc_b64",
            Opcode::SBranch => "s_branch",
            Opcode::SCbranchScc => "s_cbranch_scc",
            Opcode::SEndpgm => "s_endpgm",
            Opcode::SNop => "s_nop",
            Opcode::SRoundMode => "s_round_mode",
            Opcode::SDenormMode => "s_denorm_mode",
            Opcode::SSetRegImm => "s_setreg_imm32_b32",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.base {
            BaseType::Float => "f",
            BaseType::Bfloat => "bf",
            BaseType::Int => "i",
            BaseType::Uint => "u",
            BaseType::Bool => "b",
        };
        write!(f, "{prefix}{}", self.bits)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode.mnemonic())?;
        if let Some(result) = self.result {
            write!(f, " -> {result}")?;
        }
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{operand}")?;
        }
        if self.opcode == Opcode::SSetRegImm {
            write!(
                f,
                " hwreg(0x{:x}), 0x{:x}",
                self.setreg_spec(),
                self.setreg_value()
            )?;
        } else if self.opcode.is_mode_write() {
            write!(f, " 0x{:x}", self.imm)?;
        }
        if self.opsel_hi {
            write!(f, " opsel_hi")?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BB{}:", self.index)?;
        if self.loop_header {
            write!(f, " /* loop header */")?;
        }
        if self.restore_defaults_on_exit {
            write!(f, " /* restore defaults on exit */")?;
        }
        if !self.successors.is_empty() {
            write!(f, " /* succs:")?;
            for succ in &self.successors {
                write!(f, " BB{succ}")?;
            }
            write!(f, " */")?;
        }
        writeln!(f)?;
        for instr in &self.instructions {
            writeln!(f, "    {instr}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "; {:?}, declared mode 0x{:02x}",
            self.gfx_level, self.declared_mode
        )?;
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

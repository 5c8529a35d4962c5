/// Opcodes of the backend ISA, restricted to what the FP mode pass and its
/// tests need to see: FP ALU arithmetic, the rounding-insensitive families,
/// float atomics, control transfer, the mode-write instructions the pass
/// emits, and the pseudo-opcodes it lowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Scalar ALU
    SMovB32,
    SAddU32,
    SMinF32,
    SMaxF32,
    SCvtF32F16,
    SCvtF16F32,

    // Vector ALU: moves / integer
    VMovB32,
    VAddU32,

    // Vector ALU: FP arithmetic
    VAddF16,
    VAddF32,
    VAddF64,
    VSubF32,
    VMulF16,
    VMulF32,
    VMulF64,
    VFmaF16,
    VFmaF32,
    VFmaF64,

    // Min/max family (rounding-insensitive)
    VMinF16,
    VMinF32,
    VMinF64,
    VMaxF16,
    VMaxF32,
    VMaxF64,
    VMed3F32,
    VMinimumF32,
    VMaximumF32,

    // Floor/ceil/trunc/round-to-nearest-even family (rounding-insensitive)
    VFloorF16,
    VFloorF32,
    VFloorF64,
    VCeilF16,
    VCeilF32,
    VCeilF64,
    VTruncF32,
    VRndneF32,
    VFractF32,

    // Comparisons
    VCmpLtF16,
    VCmpLtF32,
    VCmpEqF32,

    // Conversions (dst_src order)
    VCvtF32F16,
    VCvtF16F32,
    VCvtF64F32,
    VCvtF32F64,
    VCvtF32I32,
    VCvtI32F32,
    VCvtPkrtzF16F32,
    VPackB32F16,
    VCvtPkU8F32,
    VCvtPkFp8F32,

    // Mixed-precision FMA
    VFmaMixF32,
    VFmaMixloF16,
    VFmaMixhiF16,

    // Pseudo-opcodes, lowered by the FP mode pass
    PVCvtF16F32Rtne,
    PSCvtF16F32Rtne,
    PVCvtF16F32Rtpi,
    PVCvtF16F32Rtni,
    PVCvtPkFp8F32Ovfl,
    PVFmaMixloF16Rtz,
    PVFmaMixhiF16Rtz,

    // Shared-memory (LDS) float atomics
    DsAddF32,
    DsAddRtnF32,
    DsMinF32,
    DsMaxF32,
    DsCmpstF32,
    DsMinF64,
    DsMaxF64,
    DsCmpstF64,
    DsPkAddF16,
    DsPkAddBf16,

    // Vector-memory / flat-addressed float atomics
    BufferAtomicAddF32,
    BufferAtomicMinF32,
    BufferAtomicMaxF32,
    BufferAtomicCmpswapF32,
    BufferAtomicMinF64,
    BufferAtomicMaxF64,
    BufferAtomicPkAddF16,
    BufferAtomicPkAddBf16,
    FlatAtomicAddF32,
    FlatAtomicMinF32,
    FlatAtomicMinF64,
    GlobalAtomicAddF32,
    GlobalAtomicMaxF32,
    GlobalAtomicMaxF64,
    GlobalAtomicPkAddF16,
    ImageAtomicAddF32,

    // Non-FP memory
    BufferLoadDword,
    BufferStoreDword,
    DsReadB32,
    DsWriteB32,

    // Control transfer that can leave and re-enter this code
    SCallB64,
    SSetpcB64,
    SSwappcB64,

    // Intra-shader branches / misc
    SBranch,
    SCbranchScc,
    SEndpgm,
    SNop,

    // Mode writes (inserted by this pass)
    SRoundMode,
    SDenormMode,
    SSetRegImm,
}

impl Opcode {
    /// Scalar/vector ALU instructions whose FP mode requirements follow
    /// the generic operand/result width rule.
    #[must_use]
    pub const fn is_alu(self) -> bool {
        matches!(
            self,
            Self::SMovB32
                | Self::SAddU32
                | Self::SMinF32
                | Self::SMaxF32
                | Self::SCvtF32F16
                | Self::SCvtF16F32
                | Self::VMovB32
                | Self::VAddU32
                | Self::VAddF16
                | Self::VAddF32
                | Self::VAddF64
                | Self::VSubF32
                | Self::VMulF16
                | Self::VMulF32
                | Self::VMulF64
                | Self::VFmaF16
                | Self::VFmaF32
                | Self::VFmaF64
                | Self::VMinF16
                | Self::VMinF32
                | Self::VMinF64
                | Self::VMaxF16
                | Self::VMaxF32
                | Self::VMaxF64
                | Self::VMed3F32
                | Self::VMinimumF32
                | Self::VMaximumF32
                | Self::VFloorF16
                | Self::VFloorF32
                | Self::VFloorF64
                | Self::VCeilF16
                | Self::VCeilF32
                | Self::VCeilF64
                | Self::VTruncF32
                | Self::VRndneF32
                | Self::VFractF32
                | Self::VCmpLtF16
                | Self::VCmpLtF32
                | Self::VCmpEqF32
                | Self::VCvtF32F16
                | Self::VCvtF16F32
                | Self::VCvtF64F32
                | Self::VCvtF32F64
                | Self::VCvtF32I32
                | Self::VCvtI32F32
                | Self::VCvtPkrtzF16F32
                | Self::VPackB32F16
                | Self::VCvtPkU8F32
                | Self::VCvtPkFp8F32
                | Self::VFmaMixF32
                | Self::VFmaMixloF16
                | Self::VFmaMixhiF16
        )
    }

    /// Pseudo-opcodes that the FP mode pass rewrites to concrete opcodes.
    #[must_use]
    pub const fn is_pseudo(self) -> bool {
        matches!(
            self,
            Self::PVCvtF16F32Rtne
                | Self::PSCvtF16F32Rtne
                | Self::PVCvtF16F32Rtpi
                | Self::PVCvtF16F32Rtni
                | Self::PVCvtPkFp8F32Ovfl
                | Self::PVFmaMixloF16Rtz
                | Self::PVFmaMixhiF16Rtz
        )
    }

    /// Instructions that may leave this shader and return to it.
    /// The hardware mode cannot be assumed preserved across them.
    #[must_use]
    pub const fn is_control_transfer(self) -> bool {
        matches!(self, Self::SCallB64 | Self::SSetpcB64 | Self::SSwappcB64)
    }

    /// Instructions that write the hardware MODE register.
    #[must_use]
    pub const fn is_mode_write(self) -> bool {
        matches!(self, Self::SRoundMode | Self::SDenormMode | Self::SSetRegImm)
    }
}

/// Base scalar categories carried by instruction operand/result metadata.
///
/// Only `Float` and `Bfloat` participate in FP mode requirements; the
/// integer and boolean categories exist so non-FP instructions can carry
/// honest type information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Float,
    Bfloat,
    Int,
    Uint,
    Bool,
}

/// A scalar operand or result type: base category plus bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarType {
    pub base: BaseType,
    pub bits: u8,
}

impl ScalarType {
    pub const F16: Self = Self::new(BaseType::Float, 16);
    pub const F32: Self = Self::new(BaseType::Float, 32);
    pub const F64: Self = Self::new(BaseType::Float, 64);
    pub const BF16: Self = Self::new(BaseType::Bfloat, 16);
    pub const FP8: Self = Self::new(BaseType::Float, 8);
    pub const U8: Self = Self::new(BaseType::Uint, 8);
    pub const I32: Self = Self::new(BaseType::Int, 32);
    pub const U32: Self = Self::new(BaseType::Uint, 32);
    pub const B1: Self = Self::new(BaseType::Bool, 1);

    #[must_use]
    pub const fn new(base: BaseType, bits: u8) -> Self {
        Self { base, bits }
    }

    /// Whether this type is subject to FP mode bits at all.
    #[must_use]
    pub const fn is_float_like(self) -> bool {
        matches!(self.base, BaseType::Float | BaseType::Bfloat)
    }
}

/// IEEE rounding mode in the hardware's 2-bit MODE register encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RoundMode {
    #[default]
    NearestEven = 0,
    PositiveInf = 1,
    NegativeInf = 2,
    TowardZero = 3,
}

/// Denormal handling in the hardware's 2-bit MODE register encoding.
///
/// Bit 0 preserves input denormals, bit 1 preserves output denormals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DenormMode {
    #[default]
    Flush = 0,
    KeepIn = 1,
    KeepOut = 2,
    Keep = 3,
}

/// Ambient FP mode of a block: the values every mode field is assumed to
/// hold when nothing in the analyzed range pins it explicitly.
///
/// Established externally, e.g. by command-stream state or the shader
/// stage's launch convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatMode {
    pub round32: RoundMode,
    pub round16_64: RoundMode,
    pub denorm32: DenormMode,
    pub denorm16_64: DenormMode,
    pub fp16_overflow: bool,
}

impl FloatMode {
    /// Raw per-field values in `ModeField` order.
    #[must_use]
    pub const fn field_values(&self) -> [u8; 5] {
        [
            self.round32 as u8,
            self.round16_64 as u8,
            self.denorm32 as u8,
            self.denorm16_64 as u8,
            self.fp16_overflow as u8,
        ]
    }

    /// Packed round/denorm value as programmed through the command stream.
    #[must_use]
    pub const fn round_denorm(&self) -> u8 {
        let round = self.round32 as u8 | (self.round16_64 as u8) << 2;
        let denorm = self.denorm32 as u8 | (self.denorm16_64 as u8) << 2;
        round | denorm << 4
    }
}

use super::Block;

/// Hardware generation. Ordered: comparisons express "this generation or
/// newer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GfxLevel {
    Gfx9,
    Gfx10,
    Gfx11,
    Gfx12,
}

impl GfxLevel {
    /// Newer generations expose separate round and denorm mode registers;
    /// older ones only have the packed MODE register.
    #[must_use]
    pub const fn has_split_mode_registers(self) -> bool {
        !matches!(self, Self::Gfx9)
    }

    /// Vector-memory float atomics stopped depending on the MODE register
    /// denorm bits on the newest generation.
    #[must_use]
    pub const fn vmem_atomics_use_mode(self) -> bool {
        !matches!(self, Self::Gfx12)
    }
}

/// A compiled function: blocks in topological order plus the launch-state
/// facts the FP mode pass needs.
#[derive(Debug, Clone)]
pub struct Program {
    pub blocks: Vec<Block>,
    pub gfx_level: GfxLevel,
    /// Packed round/denorm value programmed through the command stream
    /// before the wave launches. Updated by the pass when the whole
    /// program's entry requirement reduces to a static setting.
    pub declared_mode: u8,
    /// The ambient mode is already established when the entry block runs
    /// (e.g. stages launched into a shared, pre-programmed state), so the
    /// declared mode must not be rewritten.
    pub entry_state_preset: bool,
    /// Nothing can be assumed about the mode at entry: this stage is part
    /// of a merged shader compiled separately, and the preceding stage may
    /// have left any mode behind.
    pub entry_mode_unknown: bool,
}

impl Program {
    #[must_use]
    pub fn new(gfx_level: GfxLevel) -> Self {
        Self {
            blocks: Vec::new(),
            gfx_level,
            declared_mode: 0,
            entry_state_preset: false,
            entry_mode_unknown: false,
        }
    }
}

use super::{FloatMode, Instruction};

/// A basic block with resolved linear control-flow edges.
///
/// Indices are stable and topologically ordered: an edge to a block with
/// an index less than or equal to the source's is a loop back-edge.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub index: u32,
    pub instructions: Vec<Instruction>,
    pub successors: Vec<u32>,
    pub predecessors: Vec<u32>,
    /// Target of at least one back-edge.
    pub loop_header: bool,
    /// Terminal block that hands register state to a hardware-visible
    /// epilogue; the default mode must hold on exit.
    pub restore_defaults_on_exit: bool,
    /// Ambient FP mode assumed wherever no instruction pins a field.
    pub fp_mode: FloatMode,
}

impl Block {
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

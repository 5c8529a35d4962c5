mod block;
mod display;
mod instruction;
mod opcode;
mod program;
mod types;

pub use block::Block;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::{GfxLevel, Program};
pub use types::{BaseType, DenormMode, FloatMode, RoundMode, ScalarType};

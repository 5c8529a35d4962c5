use crate::ir::Opcode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "mode conflict persists after corrective write in block {block} \
         at instruction {instruction} ({})", .opcode.mnemonic()
    )]
    ModeConflict {
        block: usize,
        instruction: usize,
        opcode: Opcode,
    },

    #[error("mode conflict persists after corrective write at the start of block {block}")]
    BlockModeConflict { block: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

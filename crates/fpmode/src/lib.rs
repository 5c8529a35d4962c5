#![allow(
    clippy::cast_possible_truncation, // intentional: packed MODE register encodings are u8/u16 slices of wider math
    clippy::missing_errors_doc // the single error condition is documented on `insert_fp_mode`
)]

pub mod error;
pub mod fp_mode;
pub mod ir;

/// Program-building helpers for unit and integration tests.
///
/// This module is only available when running tests or when the
/// `test-harness` feature is enabled.
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use error::{Error, Result};
pub use fp_mode::{ModeField, ModeMask, ModeState, insert_fp_mode};
pub use ir::{
    BaseType, Block, DenormMode, FloatMode, GfxLevel, Instruction, Opcode, Program, RoundMode,
    ScalarType,
};

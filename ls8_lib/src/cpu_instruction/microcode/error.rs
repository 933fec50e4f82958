use thiserror::Error;

use crate::alu::AluOperation;
use crate::memory::MemoryError;
use crate::registers::RegisterError;

#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum MicrocodeError {
    // ↓ out of range stack or memory access while running the microcode
    #[error("memory access error during microcode operation: {0}")]
    Memory(#[from] MemoryError),
    #[error("register access error during microcode operation: {0}")]
    Register(#[from] RegisterError),
    #[error("operand #{index} is missing, instruction only has {count} operand(s)")]
    MissingOperand { index: usize, count: usize },
    #[error("unsupported ALU operation {0}")]
    UnsupportedAluOperation(AluOperation),
}

pub type Result<T> = std::result::Result<T, MicrocodeError>;

//! LS-8: an 8-bit byte-code computer.
//!
//! A program is a sequence of bytes loaded in a 256 cells memory. The
//! [`Machine`] fetches the opcode under the command pointer, decodes from its
//! bits how many operand bytes follow and whether the instruction moves the
//! command pointer itself, runs the matching microcode and loops until `HLT`.

mod alu;
mod cpu_instruction;
mod machine;
pub mod memory;
mod processing_unit;
mod registers;

pub use alu::{alu, AluOperation};
pub use cpu_instruction::microcode::MicrocodeError;
pub use cpu_instruction::*;
pub use machine::Machine;
pub use memory::AddressableIO;
pub use memory::RAM as Memory;
pub use processing_unit::*;
pub use registers::{
    RegisterError, Registers, FLAG_EQUAL, FLAG_GREATER, FLAG_LESS, REGISTER_COUNT,
    STACK_INIT_ADDR, STACK_POINTER_REGISTER,
};

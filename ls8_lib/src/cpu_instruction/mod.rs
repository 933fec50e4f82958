mod cpu_instruction;
pub mod microcode;

pub use self::cpu_instruction::{
    operand_count, owns_command_pointer, BoxedMicrocode, CPUInstruction, InstructionDescriptor,
    LogLine, Microcode,
};

/*
 * Opcodes
 * bits 7-6: operand count
 * bit 5:    ALU operation
 * bit 4:    the instruction sets the command pointer itself
 * bits 3-0: instruction identifier
 */
pub const HLT: u8 = 0b00000001;
pub const LDI: u8 = 0b10000010;
pub const PRN: u8 = 0b01000111;
pub const ADD: u8 = 0b10100000;
pub const MUL: u8 = 0b10100010;
pub const CMP: u8 = 0b10100111;
pub const PUSH: u8 = 0b01000101;
pub const POP: u8 = 0b01000110;
pub const CALL: u8 = 0b01010000;
pub const RET: u8 = 0b00010001;
pub const JMP: u8 = 0b01010100;
pub const JEQ: u8 = 0b01010101;
pub const JNE: u8 = 0b01010110;

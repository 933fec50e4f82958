use std::fmt;

use crate::cpu_instruction::microcode::{MicrocodeError, Result};
use crate::registers::Registers;

/*
 * ALU operations family.
 * Every opcode with bit 5 set belongs to the ALU, the low nibble (plus the
 * operand count bits) tells which operation it is. Only ADD, MUL and CMP are
 * wired, the others are recognized so they can be reported as unsupported.
 */
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum AluOperation {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    Compare,
    And,
    Not,
    Or,
    Xor,
    Shl,
    Shr,
}

impl AluOperation {
    pub fn from_opcode(opcode: u8) -> Option<AluOperation> {
        let operation = match opcode {
            0xa0 => AluOperation::Add,
            0xa1 => AluOperation::Sub,
            0xa2 => AluOperation::Mul,
            0xa3 => AluOperation::Div,
            0xa4 => AluOperation::Mod,
            0x65 => AluOperation::Inc,
            0x66 => AluOperation::Dec,
            0xa7 => AluOperation::Compare,
            0xa8 => AluOperation::And,
            0x69 => AluOperation::Not,
            0xaa => AluOperation::Or,
            0xab => AluOperation::Xor,
            0xac => AluOperation::Shl,
            0xad => AluOperation::Shr,
            _ => return None,
        };

        Some(operation)
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            AluOperation::Add => "ADD",
            AluOperation::Sub => "SUB",
            AluOperation::Mul => "MUL",
            AluOperation::Div => "DIV",
            AluOperation::Mod => "MOD",
            AluOperation::Inc => "INC",
            AluOperation::Dec => "DEC",
            AluOperation::Compare => "CMP",
            AluOperation::And => "AND",
            AluOperation::Not => "NOT",
            AluOperation::Or => "OR",
            AluOperation::Xor => "XOR",
            AluOperation::Shl => "SHL",
            AluOperation::Shr => "SHR",
        }
    }
}

impl fmt::Display for AluOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Register to register operation, `reg_a` receives the result except for
/// comparisons which only update the flags.
pub fn alu(
    operation: AluOperation,
    registers: &mut Registers,
    reg_a: usize,
    reg_b: usize,
) -> Result<()> {
    match operation {
        AluOperation::Add => {
            let value = registers.get(reg_a)?.wrapping_add(registers.get(reg_b)?);
            registers.set(reg_a, value)?;
        }
        AluOperation::Mul => {
            let value = registers.get(reg_a)?.wrapping_mul(registers.get(reg_b)?);
            registers.set(reg_a, value)?;
        }
        AluOperation::Compare => {
            let (left, right) = (registers.get(reg_a)?, registers.get(reg_b)?);
            registers.set_comparison(left, right);
        }
        unsupported => return Err(MicrocodeError::UnsupportedAluOperation(unsupported)),
    }

    Ok(())
}

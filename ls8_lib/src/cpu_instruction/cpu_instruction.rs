use super::microcode::{MicrocodeError, Result as MicrocodeResult};
use crate::memory::RAM as Memory;
use crate::registers::Registers;
use std::fmt;

/// Microcode function as stored in the instruction table.
pub type Microcode = fn(&mut Memory, &mut Registers, &CPUInstruction) -> MicrocodeResult<LogLine>;

pub type BoxedMicrocode =
    Box<dyn Fn(&mut Memory, &mut Registers, &CPUInstruction) -> MicrocodeResult<LogLine>>;

/// Bits 7-6 of an opcode: number of operand bytes following it.
pub fn operand_count(opcode: u8) -> usize {
    (opcode >> 6) as usize
}

/// Bit 4 of an opcode: the microcode sets the command pointer itself.
pub fn owns_command_pointer(opcode: u8) -> bool {
    (opcode >> 4) & 0b1 == 0b1
}

/*
 * InstructionDescriptor
 * One entry of the instruction table. The operand count and the command
 * pointer ownership are read from the opcode bits once, when the entry is
 * built, the fetch loop only looks at these attributes.
 */
#[derive(Clone, Copy)]
pub struct InstructionDescriptor {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub operand_count: usize,
    pub owns_pc: bool,
    pub microcode: Microcode,
}

impl InstructionDescriptor {
    pub fn new(opcode: u8, mnemonic: &'static str, microcode: Microcode) -> Self {
        InstructionDescriptor {
            opcode,
            mnemonic,
            operand_count: operand_count(opcode),
            owns_pc: owns_command_pointer(opcode),
            microcode,
        }
    }
}

impl fmt::Debug for InstructionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{: <4} 0x{:02x} operands={} owns_pc={}",
            self.mnemonic, self.opcode, self.operand_count, self.owns_pc
        )
    }
}

pub struct CPUInstruction {
    pub address: usize,
    pub opcode: u8,
    pub mnemonic: String,
    pub operands: Vec<u8>,
    pub owns_pc: bool,
    pub microcode: BoxedMicrocode,
}

impl CPUInstruction {
    pub fn new(
        address: usize,
        opcode: u8,
        mnemonic: &str,
        operands: Vec<u8>,
        microcode: impl Fn(&mut Memory, &mut Registers, &CPUInstruction) -> MicrocodeResult<LogLine>
            + 'static,
    ) -> CPUInstruction {
        CPUInstruction {
            address,
            opcode,
            mnemonic: mnemonic.to_owned(),
            operands,
            owns_pc: owns_command_pointer(opcode),
            microcode: Box::new(microcode),
        }
    }

    pub fn from_descriptor(
        address: usize,
        descriptor: &InstructionDescriptor,
        operands: Vec<u8>,
    ) -> CPUInstruction {
        CPUInstruction {
            address,
            opcode: descriptor.opcode,
            mnemonic: descriptor.mnemonic.to_owned(),
            operands,
            owns_pc: descriptor.owns_pc,
            microcode: Box::new(descriptor.microcode),
        }
    }

    pub fn execute(
        &self,
        memory: &mut Memory,
        registers: &mut Registers,
    ) -> MicrocodeResult<LogLine> {
        (self.microcode)(memory, registers, self)
    }

    /// Opcode plus operand bytes.
    pub fn width(&self) -> usize {
        1 + self.operands.len()
    }

    pub fn operand(&self, index: usize) -> MicrocodeResult<u8> {
        self.operands
            .get(index)
            .copied()
            .ok_or(MicrocodeError::MissingOperand {
                index,
                count: self.operands.len(),
            })
    }

    /// Operand used as a register index.
    pub fn register_operand(&self, index: usize) -> MicrocodeResult<usize> {
        self.operand(index).map(usize::from)
    }
}

fn format_bytes(opcode: u8, operands: &[u8]) -> String {
    let mut bytes = vec![opcode];
    bytes.extend_from_slice(operands);

    format!(
        "({})",
        bytes
            .iter()
            .fold(String::new(), |acc, s| format!("{} {:02x}", acc, s))
            .trim()
    )
}

impl fmt::Display for CPUInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#0x{:02X}: {: <11}{: <4}",
            self.address,
            format_bytes(self.opcode, &self.operands),
            self.mnemonic
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub address: usize,
    pub opcode: u8,
    pub mnemonic: String,
    pub operands: Vec<u8>,
    pub outcome: String,
    pub output: Option<u8>,
}

impl LogLine {
    pub fn new(cpu_instruction: &CPUInstruction, outcome: String) -> LogLine {
        LogLine {
            address: cpu_instruction.address,
            opcode: cpu_instruction.opcode,
            mnemonic: cpu_instruction.mnemonic.clone(),
            operands: cpu_instruction.operands.clone(),
            outcome,
            output: None,
        }
    }

    /// Value the machine has to print once the instruction is done.
    pub fn with_output(mut self, value: u8) -> LogLine {
        self.output = Some(value);
        self
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#0x{:02X}: {: <11}{: <4} {}",
            self.address,
            format_bytes(self.opcode, &self.operands),
            self.mnemonic,
            self.outcome
        )
    }
}

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::alu::AluOperation;
use super::cpu_instruction::microcode::{self, MicrocodeError};
use super::cpu_instruction::*;
use super::memory::RAM as Memory;
use super::memory::{AddressableIO, MemoryError};
use super::registers::Registers;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("could not fetch instruction at #0x{address:02X}: {source}")]
    Fetch {
        address: usize,
        #[source]
        source: MemoryError,
    },
    #[error("unknown opcode 0x{opcode:02x} at #0x{address:02X}")]
    Decode { address: usize, opcode: u8 },
    #[error("{mnemonic} (0x{opcode:02x}) at #0x{address:02X} failed: {source}")]
    Microcode {
        address: usize,
        opcode: u8,
        mnemonic: String,
        #[source]
        source: MicrocodeError,
    },
    #[error("no HLT reached after {steps} instructions")]
    StepLimit { steps: usize },
    #[error("could not write program output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ErrorKind {
    AddressOutOfRange,
    DecodeError,
    UnsupportedAluOperation,
    StepLimit,
    Output,
}

impl ExecutionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecutionError::Fetch { .. } => ErrorKind::AddressOutOfRange,
            ExecutionError::Decode { .. } => ErrorKind::DecodeError,
            ExecutionError::Microcode { source, .. } => match source {
                MicrocodeError::Memory(_) | MicrocodeError::Register(_) => {
                    ErrorKind::AddressOutOfRange
                }
                MicrocodeError::MissingOperand { .. } => ErrorKind::DecodeError,
                MicrocodeError::UnsupportedAluOperation(_) => ErrorKind::UnsupportedAluOperation,
            },
            ExecutionError::StepLimit { .. } => ErrorKind::StepLimit,
            ExecutionError::Output(_) => ErrorKind::Output,
        }
    }

    /// Address of the faulty instruction when there is one.
    pub fn address(&self) -> Option<usize> {
        match self {
            ExecutionError::Fetch { address, .. }
            | ExecutionError::Decode { address, .. }
            | ExecutionError::Microcode { address, .. } => Some(*address),
            _ => None,
        }
    }
}

/*
 * InstructionSet
 * opcode → descriptor table, built once and never mutated once handed to a
 * Machine. Registering an instruction only requires an opcode whose bits
 * match its operand count and command pointer ownership.
 */
#[derive(Clone)]
pub struct InstructionSet {
    descriptors: BTreeMap<u8, InstructionDescriptor>,
}

impl Default for InstructionSet {
    fn default() -> Self {
        InstructionSet::empty()
            .with(HLT, "HLT", microcode::hlt)
            .with(LDI, "LDI", microcode::ldi)
            .with(PRN, "PRN", microcode::prn)
            .with(MUL, "MUL", microcode::mul)
            .with(ADD, "ADD", microcode::add)
            .with(CMP, "CMP", microcode::cmp)
            .with(PUSH, "PUSH", microcode::push)
            .with(POP, "POP", microcode::pop)
            .with(CALL, "CALL", microcode::call)
            .with(RET, "RET", microcode::ret)
            .with(JMP, "JMP", microcode::jmp)
            .with(JEQ, "JEQ", microcode::jeq)
            .with(JNE, "JNE", microcode::jne)
    }
}

impl InstructionSet {
    pub fn empty() -> Self {
        InstructionSet {
            descriptors: BTreeMap::new(),
        }
    }

    pub fn with(mut self, opcode: u8, mnemonic: &'static str, microcode: Microcode) -> Self {
        self.descriptors
            .insert(opcode, InstructionDescriptor::new(opcode, mnemonic, microcode));
        self
    }

    pub fn get(&self, opcode: u8) -> Option<&InstructionDescriptor> {
        self.descriptors.get(&opcode)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &InstructionDescriptor> {
        self.descriptors.values()
    }
}

impl fmt::Debug for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.descriptors.values()).finish()
    }
}

fn read_operands(
    address: usize,
    count: usize,
    memory: &Memory,
) -> Result<Vec<u8>, ExecutionError> {
    memory
        .read(address + 1, count)
        .map_err(|source| ExecutionError::Fetch { address, source })
}

pub fn resolve_opcode(
    instruction_set: &InstructionSet,
    address: usize,
    memory: &Memory,
) -> Result<CPUInstruction, ExecutionError> {
    let opcode = memory
        .read_byte(address)
        .map_err(|source| ExecutionError::Fetch { address, source })?;

    if let Some(descriptor) = instruction_set.get(opcode) {
        let operands = read_operands(address, descriptor.operand_count, memory)?;

        return Ok(CPUInstruction::from_descriptor(address, descriptor, operands));
    }

    match AluOperation::from_opcode(opcode) {
        Some(operation) => {
            let operands = read_operands(address, operand_count(opcode), memory)?;

            Ok(CPUInstruction::new(
                address,
                opcode,
                operation.mnemonic(),
                operands,
                microcode::alu_generic(operation),
            ))
        }
        None => Err(ExecutionError::Decode { address, opcode }),
    }
}

pub fn execute_step(
    instruction_set: &InstructionSet,
    registers: &mut Registers,
    memory: &mut Memory,
) -> Result<LogLine, ExecutionError> {
    let cpu_instruction = resolve_opcode(instruction_set, registers.command_pointer, memory)?;
    let logline = cpu_instruction
        .execute(memory, registers)
        .map_err(|source| ExecutionError::Microcode {
            address: cpu_instruction.address,
            opcode: cpu_instruction.opcode,
            mnemonic: cpu_instruction.mnemonic.clone(),
            source,
        })?;

    if !cpu_instruction.owns_pc {
        registers.command_pointer += cpu_instruction.width();
    }

    Ok(logline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::RegisterError;

    fn get_stuff(program: Vec<u8>) -> (Memory, Registers) {
        let mut memory = Memory::default();
        memory.write(0x00, &program).unwrap();

        (memory, Registers::new())
    }

    #[test]
    fn test_default_instruction_set() {
        let instruction_set = InstructionSet::default();
        assert_eq!(13, instruction_set.len());

        let ldi = instruction_set.get(LDI).unwrap();
        assert_eq!("LDI", ldi.mnemonic);
        assert_eq!(2, ldi.operand_count);
        assert!(!ldi.owns_pc);

        let call = instruction_set.get(CALL).unwrap();
        assert_eq!(1, call.operand_count);
        assert!(call.owns_pc);

        let ret = instruction_set.get(RET).unwrap();
        assert_eq!(0, ret.operand_count);
        assert!(ret.owns_pc);

        for opcode in [HLT, PRN, MUL, ADD, CMP, PUSH, POP] {
            assert!(!instruction_set.get(opcode).unwrap().owns_pc);
        }
        for opcode in [JMP, JEQ, JNE] {
            assert!(instruction_set.get(opcode).unwrap().owns_pc);
        }
    }

    #[test]
    fn test_resolve_ldi() {
        let (memory, _registers) = get_stuff(vec![0x82, 0x00, 0x08]);
        let instr = resolve_opcode(&InstructionSet::default(), 0x00, &memory).unwrap();
        assert_eq!("LDI".to_owned(), instr.mnemonic);
        assert_eq!(vec![0x00, 0x08], instr.operands);
    }

    #[test]
    fn test_execute_step_ldi() {
        let (mut memory, mut registers) = get_stuff(vec![0x82, 0x00, 0x08]);
        let logline =
            execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap();
        assert_eq!(0x08, registers.get(0).unwrap());
        assert_eq!(0x03, registers.command_pointer);
        assert_eq!("#0x00: (82 00 08) LDI  [R0=0x08]", format!("{}", logline));
    }

    #[test]
    fn test_execute_step_jmp_owns_pc() {
        let (mut memory, mut registers) = get_stuff(vec![0x54, 0x01]);
        registers.set(1, 0x00).unwrap();
        execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap();
        assert_eq!(0x00, registers.command_pointer);
    }

    #[test]
    fn test_unknown_opcode() {
        let (mut memory, mut registers) = get_stuff(vec![0xff]);
        let error =
            execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap_err();
        assert!(matches!(
            error,
            ExecutionError::Decode {
                address: 0x00,
                opcode: 0xff
            }
        ));
        assert_eq!(ErrorKind::DecodeError, error.kind());
        assert_eq!(Some(0x00), error.address());
        assert_eq!(0x00, registers.command_pointer);
    }

    #[test]
    fn test_unsupported_alu_opcode() {
        // SUB R0, R1
        let (mut memory, mut registers) = get_stuff(vec![0xa1, 0x00, 0x01]);
        let error =
            execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap_err();
        assert_eq!(ErrorKind::UnsupportedAluOperation, error.kind());
        assert_eq!(
            "SUB (0xa1) at #0x00 failed: unsupported ALU operation SUB",
            error.to_string()
        );
        assert_eq!(0x00, registers.command_pointer);
    }

    #[test]
    fn test_bad_register_index() {
        let (mut memory, mut registers) = get_stuff(vec![0x47, 0x08]);
        let error =
            execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap_err();
        assert_eq!(ErrorKind::AddressOutOfRange, error.kind());
        assert!(matches!(
            error,
            ExecutionError::Microcode {
                source: MicrocodeError::Register(RegisterError::IndexOutOfRange { index: 8 }),
                ..
            }
        ));
    }

    #[test]
    fn test_operands_past_memory() {
        let mut memory = Memory::default();
        memory.write(0xfe, &[0x82, 0x00]).unwrap();
        let mut registers = Registers::new();
        registers.command_pointer = 0xfe;
        let error =
            execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap_err();
        assert!(matches!(error, ExecutionError::Fetch { address: 0xfe, .. }));
        assert_eq!(ErrorKind::AddressOutOfRange, error.kind());
    }

    #[test]
    fn test_fetch_past_memory() {
        let mut memory = Memory::default();
        let mut registers = Registers::new();
        registers.command_pointer = 0x100;
        let error =
            execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap_err();
        assert!(matches!(error, ExecutionError::Fetch { address: 0x100, .. }));
    }

    #[test]
    fn test_halt_in_last_cell() {
        let mut memory = Memory::default();
        memory.write(0xff, &[0x01]).unwrap();
        let mut registers = Registers::new();
        registers.command_pointer = 0xff;
        execute_step(&InstructionSet::default(), &mut registers, &mut memory).unwrap();
        assert!(registers.halted);
    }

    #[test]
    fn test_custom_instruction() {
        fn nop(
            _memory: &mut Memory,
            _registers: &mut Registers,
            cpu_instruction: &CPUInstruction,
        ) -> microcode::Result<LogLine> {
            Ok(LogLine::new(cpu_instruction, String::new()))
        }
        let instruction_set = InstructionSet::default().with(0b00000000, "NOP", nop);
        let (mut memory, mut registers) = get_stuff(vec![0x00, 0x01]);
        execute_step(&instruction_set, &mut registers, &mut memory).unwrap();
        assert_eq!(0x01, registers.command_pointer);
        execute_step(&instruction_set, &mut registers, &mut memory).unwrap();
        assert!(registers.halted);
    }
}

use std::io::{self, Stdout, Write};

use log::{debug, info};

use crate::cpu_instruction::LogLine;
use crate::memory::RAM as Memory;
use crate::memory::{AddressableIO, MemoryError};
use crate::processing_unit::{execute_step, ExecutionError, InstructionSet};
use crate::registers::{RegisterError, Registers, REGISTER_COUNT};

/// The whole computer: memory, registers, the instruction table and the
/// sink PRN writes to.
pub struct Machine<W: Write = Stdout> {
    memory: Memory,
    registers: Registers,
    instruction_set: InstructionSet,
    output: W,
    steps: usize,
}

impl Machine<Stdout> {
    pub fn new() -> Self {
        Machine::with_output(io::stdout())
    }
}

impl Default for Machine<Stdout> {
    fn default() -> Self {
        Machine::new()
    }
}

impl<W: Write> Machine<W> {
    pub fn with_output(output: W) -> Self {
        Machine::with_instruction_set(InstructionSet::default(), output)
    }

    pub fn with_instruction_set(instruction_set: InstructionSet, output: W) -> Self {
        Machine {
            memory: Memory::default(),
            registers: Registers::new(),
            instruction_set,
            output,
            steps: 0,
        }
    }

    pub fn load(&mut self, address: usize, byte: u8) -> Result<(), MemoryError> {
        self.memory.write_byte(address, byte)
    }

    /// Writes the program from address 0.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MemoryError> {
        self.memory.write(0x00, program)?;
        info!("{} bytes of program loaded", program.len());

        Ok(())
    }

    /// Executes one instruction, returns `None` once the machine is halted.
    pub fn step(&mut self) -> Result<Option<LogLine>, ExecutionError> {
        if self.registers.halted {
            return Ok(None);
        }

        let logline = execute_step(&self.instruction_set, &mut self.registers, &mut self.memory)?;

        if let Some(value) = logline.output {
            let written = writeln!(self.output, "{}", value).and_then(|_| self.output.flush());
            if let Err(e) = written {
                // PRN only moved the command pointer
                self.registers.command_pointer = logline.address;

                return Err(e.into());
            }
        }
        self.steps += 1;
        debug!("{}", logline);

        if self.registers.halted {
            info!("halted after {} instructions", self.steps);
        }

        Ok(Some(logline))
    }

    /// Runs until HLT.
    pub fn run(&mut self) -> Result<(), ExecutionError> {
        while self.step()?.is_some() {}

        Ok(())
    }

    /// Runs until HLT, fails when `max_steps` instructions did not reach it.
    pub fn run_with_limit(&mut self, max_steps: usize) -> Result<(), ExecutionError> {
        while !self.registers.halted {
            self.check_step_limit(max_steps)?;
            self.step()?;
        }

        Ok(())
    }

    /// Fails with `StepLimit` when `max_steps` instructions ran and the
    /// machine is still not halted.
    pub fn check_step_limit(&self, max_steps: usize) -> Result<(), ExecutionError> {
        if !self.registers.halted && self.steps >= max_steps {
            Err(ExecutionError::StepLimit { steps: max_steps })
        } else {
            Ok(())
        }
    }

    /// Puts the registers back in their power-on state, memory is kept.
    pub fn reset(&mut self) {
        self.registers.initialize();
        self.steps = 0;
    }

    pub fn is_halted(&self) -> bool {
        self.registers.halted
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn instruction_set(&self) -> &InstructionSet {
        &self.instruction_set
    }

    pub fn register(&self, index: usize) -> Result<u8, RegisterError> {
        self.registers.get(index)
    }

    pub fn read_memory(&self, address: usize) -> Result<u8, MemoryError> {
        self.memory.read_byte(address)
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// One line snapshot: command pointer, the next three bytes and the
    /// registers. Cells past the end of memory show as `--`.
    pub fn trace(&self) -> String {
        let pc = self.registers.command_pointer;
        let byte_at = |address: usize| match self.memory.read_byte(address) {
            Ok(byte) => format!("{:02X}", byte),
            Err(_) => "--".to_owned(),
        };
        let registers = (0..REGISTER_COUNT)
            .map(|index| format!(" {:02X}", self.registers.general[index]))
            .collect::<String>();

        format!(
            "TRACE: {:02X} | {} {} {} |{}",
            pc,
            byte_at(pc),
            byte_at(pc + 1),
            byte_at(pc + 2),
            registers
        )
    }
}

use std::io::Write;

use anyhow::{anyhow, Context};
use log::{info, warn};
use ls8_lib::memory::MEMORY_SIZE;
use ls8_lib::{AddressableIO, ExecutionError, Machine, Registers};

use crate::utils::format_hex_dump;
use crate::AppResult;

#[derive(Debug, Default, Clone)]
pub struct ExecutorConfiguration {
    /// Write the machine state and each executed instruction to the trace output.
    pub trace: bool,
    /// Keep a hex dump of the whole memory once the program halted.
    pub dump: bool,
    /// Give up when HLT is not reached after that many instructions.
    pub max_steps: Option<usize>,
}

#[derive(Debug)]
pub struct ExecutionReport {
    pub steps: usize,
    pub registers: Registers,
    pub dump: Option<String>,
}

#[derive(Debug, Default)]
pub struct Executor {
    configuration: ExecutorConfiguration,
}

impl Executor {
    pub fn new(configuration: ExecutorConfiguration) -> Self {
        Self { configuration }
    }

    /// Loads the program from address 0 and runs it until HLT. PRN values
    /// go to `output`, trace lines to `trace`.
    pub fn run<W: Write, T: Write>(
        &self,
        program: &[u8],
        output: W,
        mut trace: T,
    ) -> AppResult<ExecutionReport> {
        let mut machine = Machine::with_output(output);
        machine
            .load_program(program)
            .context("could not load the program in memory")?;

        while !machine.is_halted() {
            if let Some(max_steps) = self.configuration.max_steps {
                machine
                    .check_step_limit(max_steps)
                    .map_err(|e| stopped(&machine, e))?;
            }

            if self.configuration.trace {
                writeln!(trace, "{}", machine.trace())?;
            }

            match machine.step().map_err(|e| stopped(&machine, e))? {
                Some(logline) if self.configuration.trace => {
                    writeln!(trace, "⚡ {}", logline)?;
                }
                _ => (),
            }
        }
        info!("program halted after {} instructions", machine.steps());

        let dump = if self.configuration.dump {
            Some(format_hex_dump(
                0x00,
                &machine.memory().read(0x00, MEMORY_SIZE)?,
            ))
        } else {
            None
        };

        Ok(ExecutionReport {
            steps: machine.steps(),
            registers: machine.registers().clone(),
            dump,
        })
    }
}

fn stopped<W: Write>(machine: &Machine<W>, error: ExecutionError) -> anyhow::Error {
    warn!("execution stopped at {}", machine.trace());

    anyhow!(error).context(format!(
        "execution stopped after {} instructions",
        machine.steps()
    ))
}

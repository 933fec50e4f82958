use super::*;

pub fn ret(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    registers.command_pointer = registers.stack_pull(memory)? as usize;

    Ok(LogLine::new(
        cpu_instruction,
        format!(
            "[CP=0x{:02X}][SP=0x{:02x}]",
            registers.command_pointer, registers.stack_pointer
        ),
    ))
}

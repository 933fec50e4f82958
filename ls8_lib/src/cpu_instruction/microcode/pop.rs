use super::*;

pub fn pop(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let register = cpu_instruction.register_operand(0)?;
    // the target must be valid before the stack pointer moves
    registers.get(register)?;
    let value = registers.stack_pull(memory)?;
    registers.set(register, value)?;

    Ok(LogLine::new(
        cpu_instruction,
        format!(
            "[R{}=0x{:02x}][SP=0x{:02x}]",
            register, value, registers.stack_pointer
        ),
    ))
}

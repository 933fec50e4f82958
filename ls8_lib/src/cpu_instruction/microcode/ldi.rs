use super::*;

pub fn ldi(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let register = cpu_instruction.register_operand(0)?;
    let value = cpu_instruction.operand(1)?;
    registers.set(register, value)?;

    Ok(LogLine::new(
        cpu_instruction,
        format!("[R{}=0x{:02x}]", register, value),
    ))
}

use super::*;

pub fn prn(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let register = cpu_instruction.register_operand(0)?;
    let value = registers.get(register)?;

    Ok(LogLine::new(cpu_instruction, format!("[OUT={}]", value)).with_output(value))
}

use super::*;

pub fn cmp(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let reg_a = cpu_instruction.register_operand(0)?;
    let reg_b = cpu_instruction.register_operand(1)?;
    alu(AluOperation::Compare, registers, reg_a, reg_b)?;

    Ok(LogLine::new(
        cpu_instruction,
        format!("[FL={}]", registers.format_flags()),
    ))
}

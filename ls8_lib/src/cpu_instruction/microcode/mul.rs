use super::*;

pub fn mul(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let reg_a = cpu_instruction.register_operand(0)?;
    let reg_b = cpu_instruction.register_operand(1)?;
    alu(AluOperation::Mul, registers, reg_a, reg_b)?;

    Ok(LogLine::new(
        cpu_instruction,
        format!("[R{}=0x{:02x}]", reg_a, registers.get(reg_a)?),
    ))
}

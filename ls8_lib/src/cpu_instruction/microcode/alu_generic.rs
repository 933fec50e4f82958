use super::*;

/// Microcode for ALU opcodes without a dedicated handler, the ALU decides
/// whether the operation exists.
pub fn alu_generic(
    operation: AluOperation,
) -> impl Fn(&mut Memory, &mut Registers, &CPUInstruction) -> Result<LogLine> {
    move |_memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction| {
        let reg_a = cpu_instruction.register_operand(0)?;
        let reg_b = cpu_instruction.register_operand(1).unwrap_or(reg_a);
        alu(operation, registers, reg_a, reg_b)?;

        Ok(LogLine::new(
            cpu_instruction,
            format!("[R{}=0x{:02x}]", reg_a, registers.get(reg_a)?),
        ))
    }
}

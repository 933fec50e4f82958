use super::*;

pub fn jeq(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let register = cpu_instruction.register_operand(0)?;
    let target_address = registers.get(register)?;

    if registers.e_flag_is_set() {
        registers.command_pointer = target_address as usize;
    } else {
        registers.command_pointer += cpu_instruction.width();
    }

    Ok(LogLine::new(
        cpu_instruction,
        format!("[CP=0x{:02X}]", registers.command_pointer),
    ))
}

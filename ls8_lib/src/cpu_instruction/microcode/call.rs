use super::*;
use crate::memory::MemoryError;

pub fn call(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let register = cpu_instruction.register_operand(0)?;
    let target_address = registers.get(register)?;
    let return_address = cpu_instruction.address + cpu_instruction.width();
    // a CALL in the last cells would return past the end of memory
    let return_byte = u8::try_from(return_address).map_err(|_| MemoryError::ReadOverflow {
        len: 1,
        address: return_address,
        max: 0xff,
    })?;
    registers.stack_push(memory, return_byte)?;
    registers.command_pointer = target_address as usize;

    Ok(LogLine::new(
        cpu_instruction,
        format!(
            "[CP=0x{:02X}][SP=0x{:02x}]",
            registers.command_pointer, registers.stack_pointer
        ),
    ))
}

use super::*;

pub fn hlt(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    registers.halted = true;

    Ok(LogLine::new(cpu_instruction, "[HALTED]".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_hlt() {
        let cpu_instruction = CPUInstruction::new(0x00, 0x01, "HLT", vec![], hlt);
        let (mut memory, mut registers) = get_stuff(0x00, vec![0x01]);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!("HLT".to_owned(), log_line.mnemonic);
        assert!(registers.halted);
        assert_eq!(0x00, registers.command_pointer);
    }
}

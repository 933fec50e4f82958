use std::fmt;

use thiserror::Error;

use crate::memory::{AddressableIO, MemoryError};
use crate::memory::RAM as Memory;

/*
 * LS-8 registers
 * R0 to R7 are 8 bits general purpose registers.
 * R7 is seeded with the initial stack pointer value.
 * flags register (FL), only the comparison bits are used:
 * bit 3: Less-than flag
 * bit 2: Greater-than flag
 * bit 1: Equal flag
 *
 * command pointer: address of the next opcode to fetch.
 * stack pointer: separate cursor, starts at 0xf4 and grows downward.
 */
pub const REGISTER_COUNT: usize = 8;
pub const STACK_POINTER_REGISTER: usize = 7;
pub const STACK_INIT_ADDR: usize = 0xf4;

pub const FLAG_EQUAL: u8 = 0b00000001;
pub const FLAG_GREATER: u8 = 0b00000010;
pub const FLAG_LESS: u8 = 0b00000100;

#[derive(Debug, Error, Eq, PartialEq, Copy, Clone, Hash)]
pub enum RegisterError {
    #[error("register index {index} is out of range, there are only 8 registers")]
    IndexOutOfRange { index: usize },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Registers {
    pub general: [u8; REGISTER_COUNT],
    pub command_pointer: usize,
    pub stack_pointer: usize,
    pub flags: u8,
    pub halted: bool,
}

impl Default for Registers {
    fn default() -> Self {
        let mut registers = Registers {
            general: [0x00; REGISTER_COUNT],
            command_pointer: 0x00,
            stack_pointer: 0x00,
            flags: 0x00,
            halted: false,
        };
        registers.initialize();

        registers
    }
}

impl Registers {
    pub fn new() -> Registers {
        Registers::default()
    }

    pub fn initialize(&mut self) {
        self.general = [0x00; REGISTER_COUNT];
        self.general[STACK_POINTER_REGISTER] = STACK_INIT_ADDR as u8;
        self.command_pointer = 0x00;
        self.stack_pointer = STACK_INIT_ADDR;
        self.flags = 0x00;
        self.halted = false;
    }

    pub fn get(&self, index: usize) -> Result<u8, RegisterError> {
        self.general
            .get(index)
            .copied()
            .ok_or(RegisterError::IndexOutOfRange { index })
    }

    pub fn set(&mut self, index: usize, value: u8) -> Result<(), RegisterError> {
        let register = self
            .general
            .get_mut(index)
            .ok_or(RegisterError::IndexOutOfRange { index })?;
        *register = value;

        Ok(())
    }

    pub fn stack_push(&mut self, memory: &mut Memory, byte: u8) -> Result<(), MemoryError> {
        let sp = self
            .stack_pointer
            .checked_sub(1)
            .ok_or(MemoryError::StackOverflow)?;
        memory.write_byte(sp, byte)?;
        self.stack_pointer = sp;

        Ok(())
    }

    pub fn stack_pull(&mut self, memory: &Memory) -> Result<u8, MemoryError> {
        let byte = memory.read_byte(self.stack_pointer)?;
        self.stack_pointer += 1;

        Ok(byte)
    }

    /// Replaces the whole flags byte, exactly one comparison bit ends up set.
    pub fn set_comparison(&mut self, left: u8, right: u8) {
        self.flags = match left.cmp(&right) {
            std::cmp::Ordering::Equal => FLAG_EQUAL,
            std::cmp::Ordering::Greater => FLAG_GREATER,
            std::cmp::Ordering::Less => FLAG_LESS,
        };
    }

    pub fn e_flag_is_set(&self) -> bool {
        self.flags & FLAG_EQUAL == FLAG_EQUAL
    }

    pub fn g_flag_is_set(&self) -> bool {
        self.flags & FLAG_GREATER == FLAG_GREATER
    }

    pub fn l_flag_is_set(&self) -> bool {
        self.flags & FLAG_LESS == FLAG_LESS
    }

    pub fn format_flags(&self) -> String {
        format!(
            "{}{}{}",
            if self.l_flag_is_set() { "L" } else { "l" },
            if self.g_flag_is_set() { "G" } else { "g" },
            if self.e_flag_is_set() { "E" } else { "e" },
        )
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let general = self
            .general
            .iter()
            .enumerate()
            .map(|(index, value)| format!("R{}:0x{:02x}", index, value))
            .collect::<Vec<_>>()
            .join(", ");

        write!(
            f,
            "Registers [{} | PC:0x{:02x} SP:0x{:02x} | {}{}]",
            general,
            self.command_pointer,
            self.stack_pointer,
            self.format_flags(),
            if self.halted { " HALTED" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_registers() {
        let registers = Registers::new();
        assert_eq!([0, 0, 0, 0, 0, 0, 0, 0xf4], registers.general);
        assert_eq!(0x00, registers.command_pointer);
        assert_eq!(0xf4, registers.stack_pointer);
        assert_eq!(0x00, registers.flags);
        assert!(!registers.halted);
    }

    #[test]
    fn test_get_set() {
        let mut registers = Registers::new();
        registers.set(3, 0x2a).unwrap();
        assert_eq!(0x2a, registers.get(3).unwrap());
    }

    #[test]
    fn test_register_out_of_range() {
        let mut registers = Registers::new();
        assert_eq!(
            Err(RegisterError::IndexOutOfRange { index: 8 }),
            registers.get(8)
        );
        assert_eq!(
            Err(RegisterError::IndexOutOfRange { index: 0xff }),
            registers.set(0xff, 0x01)
        );
    }

    #[test]
    fn test_comparison_replaces_flags() {
        let mut registers = Registers::new();
        registers.set_comparison(1, 1);
        assert!(registers.e_flag_is_set());
        registers.set_comparison(1, 2);
        assert!(registers.l_flag_is_set());
        assert!(!registers.e_flag_is_set());
        assert_eq!(FLAG_LESS, registers.flags);
        registers.set_comparison(3, 2);
        assert_eq!(FLAG_GREATER, registers.flags);
        assert_eq!("lGe", registers.format_flags());
    }

    #[test]
    fn test_stack_push_pull() {
        let mut memory = Memory::default();
        let mut registers = Registers::new();
        registers.stack_push(&mut memory, 0x12).unwrap();
        assert_eq!(0xf3, registers.stack_pointer);
        assert_eq!(0x12, memory.read_byte(0xf3).unwrap());
        assert_eq!(0x12, registers.stack_pull(&memory).unwrap());
        assert_eq!(0xf4, registers.stack_pointer);
    }

    #[test]
    fn test_stack_overflow() {
        let mut memory = Memory::default();
        let mut registers = Registers::new();
        registers.stack_pointer = 0x00;
        assert_eq!(
            Err(MemoryError::StackOverflow),
            registers.stack_push(&mut memory, 0x12)
        );
        assert_eq!(0x00, registers.stack_pointer);
    }

    #[test]
    fn test_stack_underflow() {
        let memory = Memory::default();
        let mut registers = Registers::new();
        registers.stack_pointer = 0xff;
        registers.stack_pull(&memory).unwrap();
        assert_eq!(0x100, registers.stack_pointer);
        assert!(matches!(
            registers.stack_pull(&memory),
            Err(MemoryError::ReadOverflow { address: 0x100, .. })
        ));
        assert_eq!(0x100, registers.stack_pointer);
    }

    #[test]
    fn test_debug_format() {
        let mut registers = Registers::new();
        registers.general[0] = 0x48;
        registers.set_comparison(2, 2);
        assert_eq!(
            "Registers [R0:0x48, R1:0x00, R2:0x00, R3:0x00, R4:0x00, R5:0x00, R6:0x00, R7:0xf4 | PC:0x00 SP:0xf4 | lgE]",
            format!("{:?}", registers)
        );
    }
}

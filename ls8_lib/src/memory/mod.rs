mod error;
mod ram;

pub use error::MemoryError;
pub use ram::RAM;

/// Number of addressable cells, program and stack share them.
pub const MEMORY_SIZE: usize = 256;

/*
 * AddressableIO
 * this trait defines the interface for all memory systems
 */
pub trait AddressableIO {
    fn read(&self, addr: usize, len: usize) -> Result<Vec<u8>, MemoryError>;
    fn write(&mut self, location: usize, data: &[u8]) -> Result<(), MemoryError>;
    fn get_size(&self) -> usize;

    fn read_byte(&self, addr: usize) -> Result<u8, MemoryError> {
        Ok(self.read(addr, 1)?[0])
    }

    fn write_byte(&mut self, addr: usize, byte: u8) -> Result<(), MemoryError> {
        self.write(addr, &[byte])
    }
}

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Copy, Clone, Hash)]
pub enum MemoryError {
    #[error("could not READ {len} byte(s) at address 0x{address:02X}, address max is 0x{max:02X}")]
    ReadOverflow {
        len: usize,
        address: usize,
        max: usize,
    },
    #[error("could not WRITE {len} byte(s) at address 0x{address:02X}, address max is 0x{max:02X}")]
    WriteOverflow {
        len: usize,
        address: usize,
        max: usize,
    },
    #[error("stack overflow, cannot push below address 0x00")]
    StackOverflow,
}

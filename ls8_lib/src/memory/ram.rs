use super::*;

pub struct RAM {
    ram: Box<[u8; MEMORY_SIZE]>,
}

impl Default for RAM {
    fn default() -> Self {
        Self {
            ram: Box::new([0x00; MEMORY_SIZE]),
        }
    }
}

impl AddressableIO for RAM {
    fn read(&self, addr: usize, len: usize) -> Result<Vec<u8>, MemoryError> {
        match addr.checked_add(len) {
            Some(end) if end <= self.ram.len() => Ok(self.ram[addr..end].to_vec()),
            _ => Err(MemoryError::ReadOverflow {
                len,
                address: addr,
                max: self.ram.len() - 1,
            }),
        }
    }

    fn write(&mut self, location: usize, data: &[u8]) -> Result<(), MemoryError> {
        match location.checked_add(data.len()) {
            Some(end) if end <= self.ram.len() => {
                self.ram[location..end].copy_from_slice(data);

                Ok(())
            }
            _ => Err(MemoryError::WriteOverflow {
                len: data.len(),
                address: location,
                max: self.ram.len() - 1,
            }),
        }
    }

    fn get_size(&self) -> usize {
        self.ram.len()
    }
}

impl std::fmt::Debug for RAM {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RAM {{ size = {} bytes }}", self.ram.len())
    }
}

use crate::{
    error::{SimError, SimResult},
    Address, Word,
};

/// Flat main memory. Nothing writes to it, so every cell reads as zero and
/// only the size is stored.
#[derive(Debug)]
pub struct Memory {
    size: usize,
    reads: u64,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Memory { size, reads: 0 }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_range(&self, addr: Address) -> bool {
        usize::try_from(addr).is_ok_and(|idx| idx < self.size)
    }

    pub fn read(&mut self, addr: Address) -> SimResult<Word> {
        if !self.in_range(addr) {
            return Err(SimError::AddressOutOfRange {
                address: addr,
                size: self.size,
            });
        }
        self.reads += 1;
        Ok(0)
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }
}

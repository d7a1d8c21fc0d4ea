//! Flat word-addressable memory.

use perch_spec::{Address, Program, Word};

/// Default memory size in words
pub const DEFAULT_SIZE: usize = 1 << 16;

/// Main memory: a flat array of words addressed 0..len-1.
///
/// The memory is owned by exactly one CPU. Out-of-range accesses are
/// reported to the caller, never panicked on; the CPU turns them into a
/// halt.
#[derive(Debug, Clone)]
pub struct Memory {
    cells: Vec<Word>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the word at `addr`; `None` when out of range.
    #[inline]
    pub fn get(&self, addr: Address) -> Option<Word> {
        self.cells.get(addr as usize).copied()
    }

    /// Write the word at `addr`; `false` when out of range.
    #[inline]
    pub fn put(&mut self, addr: Address, value: Word) -> bool {
        match self.cells.get_mut(addr as usize) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Load an object program: word i lands at address i.
    pub fn load(&mut self, program: &Program) {
        for (i, &word) in program.words.iter().enumerate() {
            self.put(i as Address, word);
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_put() {
        let mut mem = Memory::new(8);
        assert_eq!(mem.get(3), Some(0));
        assert!(mem.put(3, 99));
        assert_eq!(mem.get(3), Some(99));
    }

    #[test]
    fn test_out_of_range() {
        let mut mem = Memory::new(8);
        assert_eq!(mem.get(8), None);
        assert!(!mem.put(8, 1));
    }

    #[test]
    fn test_load_places_words_in_order() {
        let mut mem = Memory::new(8);
        mem.load(&Program::new(vec![10, 20, 30]));
        assert_eq!(mem.get(0), Some(10));
        assert_eq!(mem.get(1), Some(20));
        assert_eq!(mem.get(2), Some(30));
        assert_eq!(mem.get(3), Some(0));
    }
}

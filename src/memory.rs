//! The architected memory interface: a byte-addressed, big-endian linear
//! store with atomic read-modify-write pairs.

use crate::consts::DEFAULT_RAM_SIZE;
use crate::error::MemoryError;

use sparc_asm::Word;

use std::sync::{Arc, Mutex, MutexGuard};

/// Memory port consumed by the execution core.
///
/// All accesses are big-endian; half-word and word accesses require
/// natural alignment. The default `ldstub`/`swap` pairs are adequate for a
/// single core; a port shared between cores must override them so the
/// read-modify-write pair is linearizable with other cores' accesses.
pub trait MemoryPort {
    /// Read one byte.
    fn read_byte(&self, addr: Word) -> Result<u8, MemoryError>;

    /// Read a big-endian half-word at a 2-byte aligned address.
    fn read_half(&self, addr: Word) -> Result<u16, MemoryError>;

    /// Read a big-endian word at a 4-byte aligned address.
    fn read_word(&self, addr: Word) -> Result<Word, MemoryError>;

    /// Write one byte.
    fn write_byte(&mut self, addr: Word, value: u8) -> Result<(), MemoryError>;

    /// Write a big-endian half-word at a 2-byte aligned address.
    fn write_half(&mut self, addr: Word, value: u16) -> Result<(), MemoryError>;

    /// Write a big-endian word at a 4-byte aligned address.
    fn write_word(&mut self, addr: Word, value: Word) -> Result<(), MemoryError>;

    /// One-past-the-end address of guest RAM.
    fn ram_end(&self) -> Word;

    /// Atomically load a byte and store `0xFF` back to its address.
    fn ldstub(&mut self, addr: Word) -> Result<u8, MemoryError> {
        let old = self.read_byte(addr)?;
        self.write_byte(addr, 0xff)?;
        Ok(old)
    }

    /// Atomically exchange a memory word with `value`.
    fn swap(&mut self, addr: Word, value: Word) -> Result<Word, MemoryError> {
        let old = self.read_word(addr)?;
        self.write_word(addr, value)?;
        Ok(old)
    }
}

/// Guest RAM as a flat big-endian byte array.
#[derive(Debug, Clone)]
pub struct LinearMemory {
    bytes: Vec<u8>,
}

impl LinearMemory {
    /// Allocate a zeroed store of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self { bytes: vec![0; size] }
    }

    /// Copy a block of bytes into memory, for program loading.
    pub fn write_bytes(&mut self, addr: Word, data: &[u8]) -> Result<(), MemoryError> {
        let range = self.check(addr, data.len() as Word, 1)?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// The raw backing store.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn check(&self, addr: Word, len: Word, align: Word) -> Result<std::ops::Range<usize>, MemoryError> {
        if addr % align != 0 {
            return Err(MemoryError::Misaligned { addr, len });
        }

        let end = addr
            .checked_add(len)
            .filter(|end| *end as usize <= self.bytes.len())
            .ok_or(MemoryError::OutOfBounds { addr, len })?;

        Ok(addr as usize..end as usize)
    }
}

impl Default for LinearMemory {
    fn default() -> Self {
        Self::new(DEFAULT_RAM_SIZE)
    }
}

impl MemoryPort for LinearMemory {
    fn read_byte(&self, addr: Word) -> Result<u8, MemoryError> {
        let range = self.check(addr, 1, 1)?;
        Ok(self.bytes[range.start])
    }

    fn read_half(&self, addr: Word) -> Result<u16, MemoryError> {
        let range = self.check(addr, 2, 2)?;
        let raw = [self.bytes[range.start], self.bytes[range.start + 1]];
        Ok(u16::from_be_bytes(raw))
    }

    fn read_word(&self, addr: Word) -> Result<Word, MemoryError> {
        let range = self.check(addr, 4, 4)?;
        let mut raw = [0; 4];
        raw.copy_from_slice(&self.bytes[range]);
        Ok(Word::from_be_bytes(raw))
    }

    fn write_byte(&mut self, addr: Word, value: u8) -> Result<(), MemoryError> {
        let range = self.check(addr, 1, 1)?;
        self.bytes[range.start] = value;
        Ok(())
    }

    fn write_half(&mut self, addr: Word, value: u16) -> Result<(), MemoryError> {
        let range = self.check(addr, 2, 2)?;
        self.bytes[range].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn write_word(&mut self, addr: Word, value: Word) -> Result<(), MemoryError> {
        let range = self.check(addr, 4, 4)?;
        self.bytes[range].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn ram_end(&self) -> Word {
        self.bytes.len() as Word
    }
}

/// A [`LinearMemory`] behind a lock, shareable between simulated cores.
///
/// Every access takes the lock, and the atomic pairs hold it across their
/// read-modify-write, which makes `LDSTUB` and `SWAP` linearizable with
/// the other cores' accesses.
#[derive(Debug, Clone, Default)]
pub struct SharedMemory {
    inner: Arc<Mutex<LinearMemory>>,
}

impl SharedMemory {
    /// Wrap an existing store.
    pub fn new(memory: LinearMemory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(memory)),
        }
    }

    /// Run `f` with exclusive access to the underlying store.
    pub fn with_inner<T>(&self, f: impl FnOnce(&mut LinearMemory) -> T) -> T {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, LinearMemory> {
        // A poisoned lock only means another core died mid-access; the
        // store itself is still a plain byte array.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MemoryPort for SharedMemory {
    fn read_byte(&self, addr: Word) -> Result<u8, MemoryError> {
        self.lock().read_byte(addr)
    }

    fn read_half(&self, addr: Word) -> Result<u16, MemoryError> {
        self.lock().read_half(addr)
    }

    fn read_word(&self, addr: Word) -> Result<Word, MemoryError> {
        self.lock().read_word(addr)
    }

    fn write_byte(&mut self, addr: Word, value: u8) -> Result<(), MemoryError> {
        self.lock().write_byte(addr, value)
    }

    fn write_half(&mut self, addr: Word, value: u16) -> Result<(), MemoryError> {
        self.lock().write_half(addr, value)
    }

    fn write_word(&mut self, addr: Word, value: Word) -> Result<(), MemoryError> {
        self.lock().write_word(addr, value)
    }

    fn ram_end(&self) -> Word {
        self.lock().ram_end()
    }

    fn ldstub(&mut self, addr: Word) -> Result<u8, MemoryError> {
        let mut mem = self.lock();
        let old = mem.read_byte(addr)?;
        mem.write_byte(addr, 0xff)?;
        Ok(old)
    }

    fn swap(&mut self, addr: Word, value: Word) -> Result<Word, MemoryError> {
        let mut mem = self.lock();
        let old = mem.read_word(addr)?;
        mem.write_word(addr, value)?;
        Ok(old)
    }
}

//! Memory block back end
//!
//! A small store of named memory blocks that can only be accessed in 32-bit
//! chunks through integer handles. Errors come back as bare codes; making
//! sense of them is the adapter's job.

use std::sync::Mutex;

use thiserror::Error;

/// Name of the first memory block
pub const BLOCK_NAME_0: &str = "gorp";
/// Name of the second memory block
pub const BLOCK_NAME_1: &str = "baba";
/// Name of the third memory block
pub const BLOCK_NAME_2: &str = "yaga";

/// Number of 32-bit chunks in every block
pub const DDR_MAX_OFFSET: usize = 32;

/// Handle to an open memory block
pub type DataHandle = usize;

/// Back end failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Memory block is already open and cannot be opened again")]
    BlockAlreadyOpened,

    #[error("Memory block is closed and cannot be accessed")]
    BlockNotOpened,

    #[error("The given name is not a recognized memory block name")]
    InvalidBlockName,

    #[error("The handle argument does not correspond to a valid open memory block")]
    InvalidHandle,

    #[error("The given offset is out of bounds")]
    InvalidOffset,
}

#[derive(Debug)]
struct MemoryBlock {
    name: &'static str,
    opened: bool,
    chunks: [u32; DDR_MAX_OFFSET],
}

impl MemoryBlock {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            opened: false,
            chunks: [0; DDR_MAX_OFFSET],
        }
    }
}

/// The memory block store
#[derive(Debug)]
pub struct MemoryBackend {
    blocks: Mutex<Vec<MemoryBlock>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        let blocks = [BLOCK_NAME_0, BLOCK_NAME_1, BLOCK_NAME_2]
            .into_iter()
            .map(MemoryBlock::new)
            .collect();
        Self {
            blocks: Mutex::new(blocks),
        }
    }

    /// Open a block by name for exclusive use
    pub fn open_memory_block(&self, name: &str) -> Result<DataHandle, BackendError> {
        let mut blocks = self.blocks.lock().expect("memory backend mutex poisoned");
        let (handle, block) = blocks
            .iter_mut()
            .enumerate()
            .find(|(_, block)| block.name == name)
            .ok_or(BackendError::InvalidBlockName)?;
        if block.opened {
            return Err(BackendError::BlockAlreadyOpened);
        }
        block.opened = true;
        log::debug!("memory block '{}' opened as handle {}", name, handle);
        Ok(handle)
    }

    pub fn close_memory_block(&self, handle: DataHandle) -> Result<(), BackendError> {
        self.with_block(handle, |block| {
            block.opened = false;
            Ok(())
        })
    }

    /// Size of an open block in chunks
    pub fn get_memory_size(&self, handle: DataHandle) -> Result<usize, BackendError> {
        self.with_block(handle, |block| Ok(block.chunks.len()))
    }

    pub fn get_data_chunk(&self, handle: DataHandle, offset: usize) -> Result<u32, BackendError> {
        self.with_block(handle, |block| {
            block
                .chunks
                .get(offset)
                .copied()
                .ok_or(BackendError::InvalidOffset)
        })
    }

    pub fn set_data_chunk(
        &self,
        handle: DataHandle,
        offset: usize,
        value: u32,
    ) -> Result<(), BackendError> {
        self.with_block(handle, |block| {
            let chunk = block
                .chunks
                .get_mut(offset)
                .ok_or(BackendError::InvalidOffset)?;
            *chunk = value;
            Ok(())
        })
    }

    fn with_block<T>(
        &self,
        handle: DataHandle,
        f: impl FnOnce(&mut MemoryBlock) -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        let mut blocks = self.blocks.lock().expect("memory backend mutex poisoned");
        let block = blocks.get_mut(handle).ok_or(BackendError::InvalidHandle)?;
        if !block.opened {
            return Err(BackendError::BlockNotOpened);
        }
        f(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_exclusive() {
        let backend = MemoryBackend::new();
        let handle = backend.open_memory_block(BLOCK_NAME_1).unwrap();
        assert_eq!(
            backend.open_memory_block(BLOCK_NAME_1),
            Err(BackendError::BlockAlreadyOpened)
        );
        backend.close_memory_block(handle).unwrap();
        assert!(backend.open_memory_block(BLOCK_NAME_1).is_ok());
    }

    #[test]
    fn test_unknown_name_and_handle() {
        let backend = MemoryBackend::new();
        assert_eq!(
            backend.open_memory_block("nope"),
            Err(BackendError::InvalidBlockName)
        );
        assert_eq!(backend.get_data_chunk(99, 0), Err(BackendError::InvalidHandle));
    }

    #[test]
    fn test_closed_block_rejects_access() {
        let backend = MemoryBackend::new();
        let handle = backend.open_memory_block(BLOCK_NAME_2).unwrap();
        backend.close_memory_block(handle).unwrap();
        assert_eq!(
            backend.get_data_chunk(handle, 0),
            Err(BackendError::BlockNotOpened)
        );
    }

    #[test]
    fn test_chunk_access_bounds() {
        let backend = MemoryBackend::new();
        let handle = backend.open_memory_block(BLOCK_NAME_0).unwrap();
        assert_eq!(backend.get_memory_size(handle), Ok(DDR_MAX_OFFSET));
        backend.set_data_chunk(handle, 31, 0xdead_beef).unwrap();
        assert_eq!(backend.get_data_chunk(handle, 31), Ok(0xdead_beef));
        assert_eq!(
            backend.set_data_chunk(handle, DDR_MAX_OFFSET, 1),
            Err(BackendError::InvalidOffset)
        );
    }
}

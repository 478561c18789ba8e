//! Adapter exercise
//!
//! The back end only speaks 32-bit chunks and bare error codes. The
//! `DataReaderWriter` adapts it to byte buffers and readable errors, and
//! releases its memory block when dropped.

pub mod backend;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

use backend::{BackendError, DataHandle, MemoryBackend, BLOCK_NAME_0, DDR_MAX_OFFSET};

const BYTES_PER_CHUNK: usize = 4;
const BYTES_PER_ROW: usize = 32;

fn backend_error(prompt: &'static str) -> impl FnOnce(BackendError) -> ExerciseError {
    move |source| ExerciseError::Backend { prompt, source }
}

/// Byte oriented access to one memory block
pub struct DataReaderWriter<'a> {
    backend: &'a MemoryBackend,
    handle: DataHandle,
}

impl<'a> DataReaderWriter<'a> {
    /// Open the named block for the lifetime of the returned value
    pub fn open(backend: &'a MemoryBackend, block_name: &str) -> Result<Self, ExerciseError> {
        let handle = backend
            .open_memory_block(block_name)
            .map_err(backend_error("Opening memory block"))?;
        Ok(Self { backend, handle })
    }

    /// Size of the block in bytes
    pub fn memory_size(&self) -> Result<usize, ExerciseError> {
        let chunks = self
            .backend
            .get_memory_size(self.handle)
            .map_err(backend_error("Getting memory size"))?;
        Ok(chunks * BYTES_PER_CHUNK)
    }

    /// Read up to `max_bytes` starting at `byte_offset`. Reading stops at the
    /// end of the block.
    pub fn read(&self, byte_offset: usize, max_bytes: usize) -> Result<Vec<u8>, ExerciseError> {
        let mut data = Vec::with_capacity(max_bytes);
        let mut chunk_offset = byte_offset / BYTES_PER_CHUNK;
        let mut byte_in_chunk = byte_offset % BYTES_PER_CHUNK;
        let mut value = self
            .backend
            .get_data_chunk(self.handle, chunk_offset)
            .map_err(backend_error("Reading initial memory chunk"))?
            >> (byte_in_chunk * 8);

        while data.len() < max_bytes {
            data.push(value as u8);
            value >>= 8;
            byte_in_chunk += 1;
            if byte_in_chunk == BYTES_PER_CHUNK && data.len() < max_bytes {
                chunk_offset += 1;
                if chunk_offset >= DDR_MAX_OFFSET {
                    break;
                }
                byte_in_chunk = 0;
                value = self
                    .backend
                    .get_data_chunk(self.handle, chunk_offset)
                    .map_err(backend_error("Reading successive memory chunk"))?;
            }
        }
        Ok(data)
    }

    /// Write `bytes` starting at `byte_offset`, preserving the untouched
    /// bytes of partially written chunks. Returns the number of bytes
    /// written; bytes past the end of the block are dropped.
    pub fn write(&self, byte_offset: usize, bytes: &[u8]) -> Result<usize, ExerciseError> {
        let mut written = 0;
        for (chunk_offset, chunk_bytes) in chunk_spans(byte_offset, bytes) {
            if chunk_offset >= DDR_MAX_OFFSET {
                break;
            }
            let (first_byte, values) = chunk_bytes;
            let mut value = if first_byte == 0 && values.len() == BYTES_PER_CHUNK {
                0
            } else {
                self.backend
                    .get_data_chunk(self.handle, chunk_offset)
                    .map_err(backend_error("Reading memory in preparation to writing memory"))?
            };
            for (i, byte) in values.iter().enumerate() {
                let shift = (first_byte + i) * 8;
                value &= !(0xffu32 << shift);
                value |= u32::from(*byte) << shift;
            }
            self.backend
                .set_data_chunk(self.handle, chunk_offset, value)
                .map_err(backend_error("Writing memory"))?;
            written += values.len();
        }
        Ok(written)
    }
}

impl Drop for DataReaderWriter<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.close_memory_block(self.handle) {
            log::warn!("Attempting to close memory block: {}", err);
        }
    }
}

/// Split a byte run into per-chunk pieces: (chunk offset, (first byte in
/// chunk, bytes))
fn chunk_spans(byte_offset: usize, bytes: &[u8]) -> Vec<(usize, (usize, &[u8]))> {
    let mut spans = Vec::new();
    let mut position = byte_offset;
    let mut rest = bytes;
    while !rest.is_empty() {
        let first_byte = position % BYTES_PER_CHUNK;
        let take = (BYTES_PER_CHUNK - first_byte).min(rest.len());
        let (head, tail) = rest.split_at(take);
        spans.push((position / BYTES_PER_CHUNK, (first_byte, head)));
        position += take;
        rest = tail;
    }
    spans
}

/// Format a buffer as rows of hex bytes, each row prefixed with its offset
pub fn buffer_to_string(data: &[u8], indent: usize) -> String {
    let mut output = String::new();
    for (index, row) in data.chunks(BYTES_PER_ROW).enumerate() {
        output.push_str(&format!(
            "{:indent$}0x{:04x} --",
            "",
            index * BYTES_PER_ROW,
            indent = indent
        ));
        let fields: Vec<String> = row.iter().map(|b| format!("{:02x}", b)).collect();
        output.push_str(&fields.join(" "));
        output.push('\n');
    }
    output
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let backend = MemoryBackend::new();
    let reader_writer = DataReaderWriter::open(&backend, BLOCK_NAME_0)?;

    let size = reader_writer.memory_size()?;
    let write_data: Vec<u8> = (0..size).map(|byte| byte as u8).collect();
    out.line("  Data written:");
    out.line(buffer_to_string(&write_data, 2));

    let bytes_written = reader_writer.write(0, &write_data)?;
    let read_data = reader_writer.read(0, bytes_written)?;

    out.line("  Data read:");
    out.line(buffer_to_string(&read_data, 2));

    if read_data != write_data {
        return Err(ExerciseError::Failed(
            "Data read back does not match the data written".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::backend::{BLOCK_NAME_1, BLOCK_NAME_2};

    #[test]
    fn test_write_then_read_full_block() {
        let backend = MemoryBackend::new();
        let rw = DataReaderWriter::open(&backend, BLOCK_NAME_0).unwrap();
        assert_eq!(rw.memory_size().unwrap(), 128);
        let data: Vec<u8> = (0..128u8).rev().collect();
        assert_eq!(rw.write(0, &data).unwrap(), 128);
        assert_eq!(rw.read(0, 128).unwrap(), data);
    }

    #[test]
    fn test_chunks_are_little_endian() {
        let backend = MemoryBackend::new();
        let rw = DataReaderWriter::open(&backend, BLOCK_NAME_1).unwrap();
        rw.write(0, &[0x01, 0x02, 0x03, 0x04]).unwrap();
        assert_eq!(backend.get_data_chunk(rw.handle, 0), Ok(0x0403_0201));
    }

    #[test]
    fn test_unaligned_write_preserves_neighbours() {
        let backend = MemoryBackend::new();
        let rw = DataReaderWriter::open(&backend, BLOCK_NAME_2).unwrap();
        rw.write(0, &[0xaa; 8]).unwrap();
        rw.write(3, &[0x11, 0x22]).unwrap();
        assert_eq!(
            rw.read(0, 8).unwrap(),
            vec![0xaa, 0xaa, 0xaa, 0x11, 0x22, 0xaa, 0xaa, 0xaa]
        );
        assert_eq!(rw.read(3, 2).unwrap(), vec![0x11, 0x22]);
    }

    #[test]
    fn test_read_stops_at_end_of_block() {
        let backend = MemoryBackend::new();
        let rw = DataReaderWriter::open(&backend, BLOCK_NAME_0).unwrap();
        assert_eq!(rw.read(120, 64).unwrap().len(), 8);
        assert_eq!(rw.write(124, &[1; 10]).unwrap(), 4);
    }

    #[test]
    fn test_block_released_on_drop() {
        let backend = MemoryBackend::new();
        {
            let _rw = DataReaderWriter::open(&backend, BLOCK_NAME_0).unwrap();
            let err = DataReaderWriter::open(&backend, BLOCK_NAME_0)
                .err()
                .unwrap();
            assert_eq!(
                err.to_string(),
                "Opening memory block: Memory block is already open and cannot be opened again"
            );
        }
        assert!(DataReaderWriter::open(&backend, BLOCK_NAME_0).is_ok());
    }

    #[test]
    fn test_buffer_to_string_rows() {
        let data: Vec<u8> = (0..40u8).collect();
        let dump = buffer_to_string(&data, 2);
        let rows: Vec<&str> = dump.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  0x0000 --00 01 02"));
        assert!(rows[0].ends_with("1e 1f"));
        assert_eq!(rows[1], "  0x0020 --20 21 22 23 24 25 26 27");
    }

    #[test]
    fn test_exercise_output() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        let lines = out.into_lines();
        assert_eq!(lines[0], "  Data written:");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "  Data read:");
        assert_eq!(lines[1], lines[7]);
        assert_eq!(lines[4], lines[10]);
        assert!(lines[4].starts_with("  0x0060 --60 61"));
    }
}

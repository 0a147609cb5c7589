//! Cipher engine behind an arena-backed buffer boundary

pub mod arena;

pub use arena::{Arena, BufferHandle};

use crate::cipher;
use crate::error::EngineError;

/// One engine instance: the cipher plus the linear memory the host
/// exchanges buffers through.
///
/// Every state-changing call takes `&mut self`, so a module shared across
/// execution contexts needs external serialization; a dedicated module per
/// context avoids that entirely.
#[derive(Debug)]
pub struct CipherModule {
    arena: Arena,
}

impl CipherModule {
    pub fn new() -> Self {
        CipherModule {
            arena: Arena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CipherModule {
            arena: Arena::with_capacity(capacity),
        }
    }

    /// Reserve a zero-filled buffer for the host to populate.
    pub fn allocate(&mut self, size: usize) -> Result<BufferHandle, EngineError> {
        self.arena.allocate(size)
    }

    /// Release a buffer. Hosts free exactly the handles they own: the
    /// input and key buffers they allocated plus the output buffer the
    /// engine handed back.
    pub fn free(&mut self, handle: BufferHandle) -> Result<(), EngineError> {
        self.arena.free(handle)
    }

    /// Host-side population of a buffer before processing.
    pub fn write(
        &mut self,
        handle: BufferHandle,
        offset: usize,
        bytes: &[u8],
    ) -> Result<(), EngineError> {
        self.arena.write(handle, offset, bytes)
    }

    /// Host-side read-back of a buffer after processing.
    pub fn read(
        &self,
        handle: BufferHandle,
        offset: usize,
        len: usize,
    ) -> Result<&[u8], EngineError> {
        self.arena.read(handle, offset, len)
    }

    /// Run the cipher over `input_len` bytes of `input` keyed by `key_len`
    /// bytes of `key`, leaving the result in a freshly allocated buffer.
    ///
    /// The returned handle belongs to the caller, which must free it along
    /// with the input and key buffers; neither of those is consumed or
    /// freed here. Handle and key validation happen before the output
    /// allocation, so a failed call leaves the arena exactly as it was.
    pub fn process(
        &mut self,
        input: BufferHandle,
        input_len: usize,
        key: BufferHandle,
        key_len: usize,
    ) -> Result<BufferHandle, EngineError> {
        let output = {
            let key_bytes = self.arena.read(key, 0, key_len)?;
            let input_bytes = self.arena.read(input, 0, input_len)?;
            cipher::process(input_bytes, key_bytes)?
        };

        let handle = self.arena.allocate(output.len())?;
        self.arena.write(handle, 0, &output)?;
        Ok(handle)
    }

    /// Buffers currently live in the arena.
    pub fn live_buffers(&self) -> usize {
        self.arena.live_buffers()
    }

    /// Bytes currently reserved in the arena.
    pub fn bytes_in_use(&self) -> usize {
        self.arena.bytes_in_use()
    }
}

impl Default for CipherModule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_hex;

    fn loaded(module: &mut CipherModule, bytes: &[u8]) -> BufferHandle {
        let handle = module.allocate(bytes.len()).unwrap();
        module.write(handle, 0, bytes).unwrap();
        handle
    }

    #[test]
    fn test_boundary_process_known_vector() {
        let mut module = CipherModule::new();
        let input = loaded(&mut module, b"Plaintext");
        let key = loaded(&mut module, b"Key");

        let output = module.process(input, 9, key, 3).unwrap();
        let ciphertext = module.read(output, 0, 9).unwrap();
        assert_eq!(encode_hex(ciphertext), "bbf316e8d940af0ad3");
    }

    #[test]
    fn test_output_is_independent_of_input() {
        let mut module = CipherModule::new();
        let input = loaded(&mut module, b"Plaintext");
        let key = loaded(&mut module, b"Key");

        let output = module.process(input, 9, key, 3).unwrap();
        assert_ne!(output, input);
        assert_eq!(module.read(input, 0, 9).unwrap(), b"Plaintext");
        assert_eq!(module.live_buffers(), 3);
    }

    #[test]
    fn test_empty_key_aborts_before_output_allocation() {
        let mut module = CipherModule::new();
        let input = loaded(&mut module, b"data");
        let key = module.allocate(0).unwrap();
        let reserved = module.bytes_in_use();

        let err = module.process(input, 4, key, 0).unwrap_err();
        assert_eq!(err, EngineError::InvalidKey);
        assert_eq!(module.live_buffers(), 2);
        assert_eq!(module.bytes_in_use(), reserved);
    }

    #[test]
    fn test_process_rejects_stale_input_handle() {
        let mut module = CipherModule::new();
        let input = loaded(&mut module, b"data");
        let key = loaded(&mut module, b"Key");
        module.free(input).unwrap();

        assert!(matches!(
            module.process(input, 4, key, 3),
            Err(EngineError::UseAfterFree { .. })
        ));
    }

    #[test]
    fn test_process_rejects_overlong_length() {
        let mut module = CipherModule::new();
        let input = loaded(&mut module, b"data");
        let key = loaded(&mut module, b"Key");

        assert!(matches!(
            module.process(input, 5, key, 3),
            Err(EngineError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_output_allocation_failure_is_clean() {
        let mut module = CipherModule::with_capacity(8);
        let input = loaded(&mut module, b"ABCDE");
        let key = loaded(&mut module, b"Key");
        assert_eq!(module.bytes_in_use(), 8);

        let err = module.process(input, 5, key, 3).unwrap_err();
        assert!(matches!(
            err,
            EngineError::AllocationFailure {
                requested: 5,
                remaining: 0
            }
        ));
        assert_eq!(module.live_buffers(), 2);
    }

    #[test]
    fn test_round_trip_through_the_boundary() {
        let mut module = CipherModule::new();
        let plaintext = b"The quick brown fox";
        let input = loaded(&mut module, plaintext);
        let key = loaded(&mut module, b"boundary key");

        let ciphertext = module.process(input, plaintext.len(), key, 12).unwrap();
        let back = module.process(ciphertext, plaintext.len(), key, 12).unwrap();
        assert_eq!(module.read(back, 0, plaintext.len()).unwrap(), plaintext);
    }
}

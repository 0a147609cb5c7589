//! Host-side calling convention for the cipher engine

use crate::encoding::{decode_hex, encode_hex};
use crate::engine::{BufferHandle, CipherModule};
use crate::error::EngineError;

/// Drive one request across the boundary.
///
/// Allocates the input and key buffers, populates them, processes, reads
/// the result back, and frees every handle the request created, on success
/// and failure paths alike, so no arena space outlives the request.
pub fn run_request(
    module: &mut CipherModule,
    input: &[u8],
    key: &[u8],
) -> Result<Vec<u8>, EngineError> {
    if key.is_empty() {
        return Err(EngineError::InvalidKey);
    }
    let live_before = module.live_buffers();

    let input_handle = module.allocate(input.len())?;
    let key_handle = match module.allocate(key.len()) {
        Ok(handle) => handle,
        Err(err) => {
            let _ = module.free(input_handle);
            return Err(err);
        }
    };

    let result = exchange(module, input_handle, input, key_handle, key);

    let _ = module.free(input_handle);
    let _ = module.free(key_handle);
    debug_assert_eq!(module.live_buffers(), live_before);
    result
}

fn exchange(
    module: &mut CipherModule,
    input_handle: BufferHandle,
    input: &[u8],
    key_handle: BufferHandle,
    key: &[u8],
) -> Result<Vec<u8>, EngineError> {
    module.write(input_handle, 0, input)?;
    module.write(key_handle, 0, key)?;

    let output_handle = module.process(input_handle, input.len(), key_handle, key.len())?;
    let output = module
        .read(output_handle, 0, input.len())
        .map(|bytes| bytes.to_vec());
    let _ = module.free(output_handle);
    output
}

/// Encrypt UTF-8 text, rendering the ciphertext as lowercase hex.
pub fn encrypt_text(
    module: &mut CipherModule,
    text: &str,
    key: &str,
) -> Result<String, EngineError> {
    let ciphertext = run_request(module, text.as_bytes(), key.as_bytes())?;
    Ok(encode_hex(&ciphertext))
}

/// Decrypt hex-encoded ciphertext back to text.
///
/// The hex input is validated before the engine is invoked. Output bytes
/// decode as UTF-8 with invalid sequences rendered as replacement
/// characters; a wrong key therefore yields garbage text, not an error.
pub fn decrypt_hex(module: &mut CipherModule, hex: &str, key: &str) -> Result<String, EngineError> {
    let ciphertext = decode_hex(hex)?;
    let plaintext = run_request(module, &ciphertext, key.as_bytes())?;
    Ok(String::from_utf8_lossy(&plaintext).into_owned())
}

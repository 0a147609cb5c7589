//! Hex encoding and decoding for the boundary text conventions

use crate::error::EngineError;

/// Encode bytes as lowercase hex, two digits per byte, no separators.
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// Decode a hex string to bytes.
///
/// Surrounding whitespace is trimmed and mixed case is accepted. Empty
/// input, odd lengths, and characters outside `[0-9a-fA-F]` are rejected
/// before anything reaches the engine.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, EngineError> {
    let digits: Vec<char> = text.trim().chars().collect();

    if digits.is_empty() {
        return Err(EngineError::InvalidEncoding {
            detail: "hex string is empty".to_string(),
        });
    }
    if digits.len() % 2 != 0 {
        return Err(EngineError::InvalidEncoding {
            detail: format!("hex string has odd length {}", digits.len()),
        });
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let hi = hex_value(pair[0])?;
        let lo = hex_value(pair[1])?;
        bytes.push((hi << 4) | lo);
    }

    Ok(bytes)
}

fn hex_value(ch: char) -> Result<u8, EngineError> {
    ch.to_digit(16)
        .map(|value| value as u8)
        .ok_or_else(|| EngineError::InvalidEncoding {
            detail: format!("invalid hex character: {}", ch),
        })
}

//! RC4 stream cipher

pub mod key_schedule;
pub mod keystream;

pub use key_schedule::Permutation;
pub use keystream::Keystream;

use crate::error::EngineError;

/// Run the cipher over `input` with `key`.
///
/// Encryption and decryption are the same operation: the output is the
/// input XORed with the keystream, so running it twice with the same key
/// restores the original bytes. The permutation built here lives only for
/// this call. Returns a fresh buffer the same length as the input.
pub fn process(input: &[u8], key: &[u8]) -> Result<Vec<u8>, EngineError> {
    let permutation = Permutation::from_key(key)?;
    let mut output = input.to_vec();
    Keystream::new(permutation).apply(&mut output);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_hex;
    use proptest::prelude::*;

    #[test]
    fn test_process_symmetric() {
        let key = b"test_key";
        let plaintext = b"Hello, World!";

        let encrypted = process(plaintext, key).unwrap();
        let decrypted = process(&encrypted, key).unwrap();

        assert_eq!(plaintext, &decrypted[..]);
    }

    #[test]
    fn test_known_vectors() {
        let cases: [(&[u8], &[u8], &str); 3] = [
            (b"Key", b"Plaintext", "bbf316e8d940af0ad3"),
            (b"Wiki", b"pedia", "1021bf0420"),
            (b"Secret", b"Attack at dawn", "45a01f645fc35b383552544b9bf5"),
        ];

        for (key, plaintext, expected) in cases {
            let ciphertext = process(plaintext, key).unwrap();
            assert_eq!(encode_hex(&ciphertext), expected);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(process(b"", b"Key").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(process(b"data", b"").unwrap_err(), EngineError::InvalidKey);
    }

    #[test]
    fn test_deterministic() {
        let a = process(b"same input", b"same key").unwrap();
        let b = process(b"same input", b"same key").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_sensitivity() {
        let a = process(b"same input", b"key one").unwrap();
        let b = process(b"same input", b"key two").unwrap();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn round_trip_restores_plaintext(
            input in prop::collection::vec(any::<u8>(), 0..512),
            key in prop::collection::vec(any::<u8>(), 1..64),
        ) {
            let ciphertext = process(&input, &key).unwrap();
            prop_assert_eq!(ciphertext.len(), input.len());

            let plaintext = process(&ciphertext, &key).unwrap();
            prop_assert_eq!(plaintext, input);
        }
    }
}

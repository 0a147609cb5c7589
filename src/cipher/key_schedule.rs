//! Key scheduling (KSA)

use crate::error::EngineError;

/// The 256-entry state every keystream draws from.
///
/// Invariant: always a bijection of the 0-255 index space. It starts as the
/// identity and is only ever changed by swapping two entries.
#[derive(Debug, PartialEq, Eq)]
pub struct Permutation([u8; 256]);

impl Permutation {
    /// Build the key-dependent permutation from `key`.
    ///
    /// The schedule index wraps at 256, so a short key is cycled and key
    /// bytes past the first 256 never contribute. Empty keys are rejected
    /// before scheduling begins.
    pub fn from_key(key: &[u8]) -> Result<Self, EngineError> {
        if key.is_empty() {
            return Err(EngineError::InvalidKey);
        }

        let mut state = [0u8; 256];
        for i in 0..256 {
            state[i] = i as u8;
        }

        // Key scheduling algorithm (KSA)
        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
            state.swap(i, j as usize);
        }

        Ok(Permutation(state))
    }

    #[inline]
    pub(crate) fn get(&self, index: u8) -> u8 {
        self.0[index as usize]
    }

    #[inline]
    pub(crate) fn swap(&mut self, a: u8, b: u8) {
        self.0.swap(a as usize, b as usize);
    }
}

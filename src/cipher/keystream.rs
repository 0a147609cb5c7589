//! Keystream generation (PRGA)

use super::key_schedule::Permutation;

/// Lazy pseudo-random byte sequence driven by a key-scheduled permutation.
///
/// Every byte drawn permanently advances the state; there is no rewind
/// short of rebuilding the permutation from the key. The state is
/// single-writer and belongs to exactly one cipher pass.
#[derive(Debug)]
pub struct Keystream {
    state: Permutation,
    i: u8,
    j: u8,
}

impl Keystream {
    /// Take ownership of a freshly scheduled permutation.
    pub fn new(state: Permutation) -> Self {
        Keystream { state, i: 0, j: 0 }
    }

    /// Produce the next keystream byte, mutating the permutation in place.
    pub fn next_byte(&mut self) -> u8 {
        // Pseudo-random generation algorithm (PRGA)
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.state.get(self.i));
        self.state.swap(self.i, self.j);

        let k = self.state.get(self.i).wrapping_add(self.state.get(self.j));
        self.state.get(k)
    }

    /// XOR the keystream over `data` in place, one byte per input byte.
    pub fn apply(&mut self, data: &mut [u8]) {
        for byte in data {
            *byte ^= self.next_byte();
        }
    }
}

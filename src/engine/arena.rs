//! Growable linear memory with explicitly managed buffers.
//!
//! The arena stands in for the flat byte-addressable heap a host indexes
//! into: one contiguous region, no garbage collector, every buffer
//! explicitly allocated and explicitly freed by whoever owns it.
//!
//! Design:
//! - Bump allocation from a cursor over a single `Vec<u8>` backing store.
//! - The store grows in 64 KiB pages on demand, up to a hard capacity
//!   budget, and never shrinks.
//! - Handles carry a slot index plus a generation counter. Freeing a slot
//!   bumps its generation, so a stale handle can never alias whatever
//!   reuses the slot; it fails loudly instead.
//! - Freeing the topmost buffer rewinds the cursor, and freeing the last
//!   live buffer resets it to zero, so balanced allocate/free sequences
//!   hand the whole region back.

use crate::error::EngineError;

/// Default capacity budget: 16 MiB of linear memory.
pub const DEFAULT_CAPACITY: usize = 16 * 1024 * 1024;

/// Growth granularity of the backing store.
const PAGE_SIZE: usize = 64 * 1024;

/// Reference to one allocated buffer.
///
/// A handle conveys a usage right, not ownership of the storage, and is
/// only meaningful to the arena that issued it. It stays valid until the
/// buffer's owner frees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    offset: usize,
    len: usize,
    generation: u32,
    live: bool,
}

/// Bump allocator over one contiguous byte region.
#[derive(Debug)]
pub struct Arena {
    heap: Vec<u8>,
    capacity: usize,
    cursor: usize,
    slots: Vec<Slot>,
    free_slots: Vec<usize>,
    live: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an arena with a hard capacity budget in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            heap: Vec::new(),
            capacity,
            cursor: 0,
            slots: Vec::new(),
            free_slots: Vec::new(),
            live: 0,
        }
    }

    /// Reserve `size` zero-filled bytes and hand back a handle for them.
    ///
    /// Fails with `AllocationFailure` when the request does not fit under
    /// the capacity budget; the arena is left unchanged in that case.
    pub fn allocate(&mut self, size: usize) -> Result<BufferHandle, EngineError> {
        let end = match self.cursor.checked_add(size) {
            Some(end) if end <= self.capacity => end,
            _ => {
                return Err(EngineError::AllocationFailure {
                    requested: size,
                    remaining: self.remaining(),
                })
            }
        };
        self.ensure_heap(end);

        let offset = self.cursor;
        self.cursor = end;
        // The cursor can revisit rewound space, so stale bytes are scrubbed
        // rather than leaking a previous buffer's contents.
        self.heap[offset..end].fill(0);

        let (index, generation) = match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.offset = offset;
                slot.len = size;
                slot.live = true;
                (index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    offset,
                    len: size,
                    generation: 0,
                    live: true,
                });
                (self.slots.len() - 1, 0)
            }
        };
        self.live += 1;

        Ok(BufferHandle { index, generation })
    }

    /// Release the buffer behind `handle`. Each handle may be freed once;
    /// a repeat free fails with `DoubleFree`.
    pub fn free(&mut self, handle: BufferHandle) -> Result<(), EngineError> {
        let index = handle.index;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EngineError::InvalidHandle { index })?;
        if !slot.live || slot.generation != handle.generation {
            return Err(EngineError::DoubleFree { index });
        }

        slot.live = false;
        slot.generation = slot.generation.wrapping_add(1);
        let offset = slot.offset;
        let len = slot.len;

        self.live -= 1;
        self.free_slots.push(index);

        // Reclaim without a free-space map: rewind when the freed buffer
        // was topmost, reset once nothing is live.
        if self.live == 0 {
            self.cursor = 0;
        } else if offset + len == self.cursor {
            self.cursor = offset;
        }

        Ok(())
    }

    /// Borrow `len` bytes starting at `offset` within the buffer.
    pub fn read(
        &self,
        handle: BufferHandle,
        offset: usize,
        len: usize,
    ) -> Result<&[u8], EngineError> {
        let span = self.span(handle, offset, len)?;
        Ok(&self.heap[span])
    }

    /// Copy `bytes` into the buffer starting at `offset` within it.
    pub fn write(
        &mut self,
        handle: BufferHandle,
        offset: usize,
        bytes: &[u8],
    ) -> Result<(), EngineError> {
        let span = self.span(handle, offset, bytes.len())?;
        self.heap[span].copy_from_slice(bytes);
        Ok(())
    }

    /// Number of live buffers.
    pub fn live_buffers(&self) -> usize {
        self.live
    }

    /// Bytes currently reserved, including unreclaimed gaps below the
    /// cursor.
    pub fn bytes_in_use(&self) -> usize {
        self.cursor
    }

    /// Bytes still available under the capacity budget.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    // Resolves a handle plus an in-buffer range to a heap range, rejecting
    // stale handles and out-of-range access.
    fn span(
        &self,
        handle: BufferHandle,
        offset: usize,
        len: usize,
    ) -> Result<std::ops::Range<usize>, EngineError> {
        let index = handle.index;
        let slot = self
            .slots
            .get(index)
            .ok_or(EngineError::InvalidHandle { index })?;
        if !slot.live || slot.generation != handle.generation {
            return Err(EngineError::UseAfterFree { index });
        }

        let end = offset
            .checked_add(len)
            .filter(|&end| end <= slot.len)
            .ok_or(EngineError::OutOfBounds {
                offset,
                len,
                buffer_len: slot.len,
            })?;

        Ok(slot.offset + offset..slot.offset + end)
    }

    // Grows the backing store in whole pages, never past the budget.
    // Callers have already checked `required <= self.capacity`.
    fn ensure_heap(&mut self, required: usize) {
        if required > self.heap.len() {
            let pages = required.div_ceil(PAGE_SIZE);
            let target = pages.saturating_mul(PAGE_SIZE).min(self.capacity);
            self.heap.resize(target, 0);
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

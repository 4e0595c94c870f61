//! The scratch buffer and block accumulator shared by every tinyhash digest.
//!
//! A `ScratchBuffer` stages the current 64-byte message block. The running
//! byte count lives with the hash state, not the buffer, so one buffer can
//! serve any digest: the write offset inside the block is always
//! `count mod 64`. The buffer is wiped after every compression and, at the
//! end of a computation, holds nothing but the lowercase hex digest.

#![cfg_attr(not(feature="use-std"), no_std)]

use tinyhash_bytes::{hex, ByteOrder};
use zeroize::Zeroize;

pub mod arena;

/// Size of one message block in bytes.
pub const BLOCK_LEN: usize = 64;
/// Size of the header region in front of the block.
pub const HEADER_LEN: usize = 4;
/// Total size of a scratch buffer.
pub const SCRATCH_LEN: usize = HEADER_LEN + BLOCK_LEN;
/// Size of the length field at the end of the final block.
pub const LENGTH_FIELD_LEN: usize = 8;

/// One message block.
pub type Block = [u8; BLOCK_LEN];

/// Total number of bytes consumed, kept as two 32-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroize)]
pub struct ByteCount {
    low: u32,
    high: u32,
}

impl ByteCount {
    /// A zero count.
    pub const fn new() -> ByteCount {
        ByteCount { low: 0, high: 0 }
    }

    /// A count with the given halves.
    pub const fn from_halves(low: u32, high: u32) -> ByteCount {
        ByteCount { low, high }
    }

    /// Add `len` bytes. A wrap of the low half carries into the high half.
    pub fn add(&mut self, len: usize) {
        let len = len as u64;
        let low = len as u32;
        self.low = self.low.wrapping_add(low);
        if self.low < low {
            self.high = self.high.wrapping_add(1);
        }
        self.high = self.high.wrapping_add((len >> 32) as u32);
    }

    /// Write offset inside the current block.
    pub fn block_offset(&self) -> usize {
        (self.low & 0x3f) as usize
    }

    /// The count as `(low, high)` halves.
    pub fn halves(&self) -> (u32, u32) {
        (self.low, self.high)
    }

    /// The count as a single value.
    pub fn bytes(&self) -> u64 {
        (u64::from(self.high) << 32) | u64::from(self.low)
    }

    /// The count in bits as `(low, high)` halves: shifted left by three, the
    /// top three bits of the low half folded into the high half.
    pub fn to_bits(&self) -> (u32, u32) {
        (self.low << 3, (self.high << 3) | (self.low >> 29))
    }
}

/// Staging area for the block being assembled: a small header followed by
/// the 64-byte block region.
///
/// The header holds the tag of the digest that last wrote a partial block,
/// which lets a state notice when another computation has used its buffer
/// in between.
#[derive(Clone)]
pub struct ScratchBuffer {
    header: [u8; HEADER_LEN],
    block: Block,
}

impl ScratchBuffer {
    /// A zeroed buffer.
    pub const fn new() -> ScratchBuffer {
        ScratchBuffer {
            header: [0u8; HEADER_LEN],
            block: [0u8; BLOCK_LEN],
        }
    }

    /// The block region.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// The header region.
    pub fn header(&self) -> &[u8; HEADER_LEN] {
        &self.header
    }

    /// Tag of the digest owning the buffered partial block, 0 if none.
    pub fn owner(&self) -> u8 {
        self.header[0]
    }

    /// Record `tag` as the owner of the buffered partial block.
    pub fn set_owner(&mut self, tag: u8) {
        self.header[0] = tag;
    }

    /// Zero the whole buffer.
    pub fn wipe(&mut self) {
        self.header.zeroize();
        self.block.zeroize();
    }

    /// Hand the block to `func`, then zero it.
    fn process<F: FnMut(&Block)>(&mut self, func: &mut F) {
        func(&self.block);
        self.block.zeroize();
    }

    /// Input a vector of bytes. Every time the block becomes full, process it
    /// with the provided function and clear it. Whatever is left over stays
    /// buffered at the start of the block.
    ///
    /// `count` is advanced by `input.len()`; its value on entry decides where
    /// in the block the input lands.
    pub fn input<F: FnMut(&Block)>(&mut self, count: &mut ByteCount,
                                   input: &[u8], mut func: F) {
        let mut index = count.block_offset();
        count.add(input.len());

        let mut i = 0;
        let partial = BLOCK_LEN - index;
        if input.len() >= partial {
            // Fill the rest of the current block.
            self.block[index..].copy_from_slice(&input[..partial]);
            self.process(&mut func);
            i = partial;

            while input.len() - i >= BLOCK_LEN {
                self.block.copy_from_slice(&input[i..i + BLOCK_LEN]);
                self.process(&mut func);
                i += BLOCK_LEN;
            }
            index = 0;
        }

        let rest = &input[i..];
        self.block[index..index + rest.len()].copy_from_slice(rest);
    }

    /// Add standard padding to the block. The block must not be full when
    /// this method is called and is guaranteed to have exactly `rem`
    /// trailing zero bytes free when it returns. If there are not at least
    /// `rem` bytes available after the `0x80` marker, the block is zero
    /// padded, processed, and a fresh zero block is started.
    pub fn standard_padding<F: FnMut(&Block)>(&mut self, count: &ByteCount,
                                              rem: usize, mut func: F) {
        let index = count.block_offset();
        self.block[index] = 0x80;
        self.block[index + 1..].zeroize();

        if BLOCK_LEN - 1 - index < rem {
            self.process(&mut func);
        }
    }

    /// The length field at the end of the block.
    pub fn length_field_mut(&mut self) -> &mut [u8] {
        &mut self.block[BLOCK_LEN - LENGTH_FIELD_LEN..]
    }

    /// Process the block as it stands and clear it.
    pub fn finish_block<F: FnMut(&Block)>(&mut self, mut func: F) {
        self.process(&mut func);
    }

    /// Write `words` as the digest: the raw bytes go into `out` and into the
    /// block, which is then rewritten in place as lowercase hex. Everything
    /// past the hex digest, header included, is zeroed.
    pub fn write_digest(&mut self, words: &[u32], order: ByteOrder, out: &mut [u8]) {
        let len = words.len() * 4;
        assert!(2 * len <= BLOCK_LEN);
        assert_eq!(out.len(), len);

        order.write_u32v(&mut self.block[..len], words);
        out.copy_from_slice(&self.block[..len]);
        hex::expand_in_place(&mut self.block, len);

        self.block[2 * len..].zeroize();
        self.header.zeroize();
    }

    /// The hex digest left by `write_digest` for a digest of `len` bytes.
    pub fn hex_digest(&self, len: usize) -> &[u8] {
        &self.block[..2 * len]
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self { Self::new() }
}

impl Zeroize for ScratchBuffer {
    fn zeroize(&mut self) {
        self.wipe();
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        self.wipe();
    }
}

#[cfg(test)]
mod tests;

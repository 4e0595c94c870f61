//! The streaming engine shared by the tinyhash digests.
//!
//! Every algorithm plugs a `BlockFunction` (its initial state, byte orders
//! and 64-byte compression function) into the same Init/Update/Final
//! machinery. `HashState` is the bare context and borrows a `ScratchBuffer`
//! for each call; `Hasher` bundles a state with a private buffer and
//! implements `Digest`.

#![cfg_attr(not(feature="use-std"), no_std)]

pub extern crate generic_array;

use generic_array::{GenericArray, ArrayLength};
use generic_array::typenum::Unsigned;
use zeroize::Zeroize;

pub use tinyhash_bytes::{ByteOrder, LengthOrder};
pub use tinyhash_fixed_buffer::{arena, Block, ByteCount, ScratchBuffer, BLOCK_LEN};

mod compare;
mod hasher;
mod registers;
mod state;

pub use compare::{matches, matches_fixed_time};
pub use hasher::Hasher;
pub use registers::{Registers, Role};
pub use state::HashState;

/// The Digest trait specifies an interface common to digest functions
pub trait Digest : Default {
    type N: ArrayLength<u8>;

    /// Create new digest instance
    fn new() -> Self {
        Default::default()
    }

    /// Digest input data. This method can be called repeatedly
    /// for use with streaming messages.
    fn input(&mut self, input: &[u8]);

    /// Retrieve the digest result. This method consumes digest instance
    fn result(self) -> GenericArray<u8, Self::N>;

    /// Reset the digest to its initial state.
    fn reset(&mut self);

    /// Get the block size in bytes.
    fn block_size(&self) -> usize;

    /// Get the output size in bytes.
    fn output_bytes(&self) -> usize { Self::N::to_usize() }

    /// Get the output size in bits.
    fn output_bits(&self) -> usize { Self::N::to_usize() * 8 }

    /// Convenience function that feeds a string into a digest.
    #[cfg(feature = "use-std")]
    fn input_str(&mut self, input: &str) {
        self.input(input.as_bytes());
    }

    /// Convenience function that retrieves the result of a digest as a
    /// lowercase hex string.
    #[cfg(feature = "use-std")]
    fn result_str(self) -> String {
        let out = self.result();
        let mut buf = vec![0u8; out.len() * 2];
        tinyhash_bytes::hex::encode(&out, &mut buf);
        buf.into_iter().map(char::from).collect()
    }
}

/// One hash algorithm: its chaining state, byte orders and compression
/// function.
pub trait BlockFunction {
    /// The running digest words.
    type State: Copy + AsRef<[u32]> + AsMut<[u32]> + Zeroize;
    /// Digest size in bytes; always four bytes per state word.
    type OutputSize: ArrayLength<u8>;

    /// Human readable algorithm name.
    const NAME: &'static str;
    /// Non-zero tag recorded in a scratch buffer's header while this
    /// algorithm owns a buffered partial block.
    const TAG: u8;
    const INITIAL_STATE: Self::State;
    /// Byte order of message words, length words and digest words.
    const WORD_ORDER: ByteOrder;
    /// Order of the two halves of the bit length.
    const LENGTH_ORDER: LengthOrder;

    /// Mix one 64-byte block into `state`.
    fn compress(state: &mut Self::State, block: &Block);
}

/// Algorithms whose running state may absorb the hex expansion of an
/// earlier digest through `add_expanded_hash`.
pub trait Chaining: BlockFunction {}

/// The digest produced by `A`.
pub type Output<A> = GenericArray<u8, <A as BlockFunction>::OutputSize>;

#[cfg(test)]
mod tests;

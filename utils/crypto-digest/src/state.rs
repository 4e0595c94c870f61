use core::fmt;

use generic_array::typenum::Unsigned;
use log::trace;
use tinyhash_bytes::{hex, write_length};
use tinyhash_fixed_buffer::{ByteCount, ScratchBuffer, LENGTH_FIELD_LEN};
use zeroize::Zeroize;

use super::{BlockFunction, Chaining, Output};

/// The context of one in-progress computation: the running digest words
/// and the number of bytes consumed so far.
///
/// A state owns no buffer. Each `update` and the final `finalize` borrow a
/// `ScratchBuffer`, which must be the same one for the whole computation and
/// must not be fed by another computation in between.
pub struct HashState<A: BlockFunction> {
    words: A::State,
    count: ByteCount,
}

impl<A: BlockFunction> HashState<A> {
    /// Init: the algorithm's initial words and a zero byte count.
    pub fn new() -> HashState<A> {
        HashState {
            words: A::INITIAL_STATE,
            count: ByteCount::new(),
        }
    }

    /// Re-initialise in place.
    pub fn init(&mut self) {
        self.words = A::INITIAL_STATE;
        self.count = ByteCount::new();
    }

    /// Update: stage `data` in `scratch`, compressing every block that fills
    /// up. Whatever is left stays buffered in `scratch` for the next call.
    pub fn update(&mut self, scratch: &mut ScratchBuffer, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        debug_assert!(self.count.block_offset() == 0 || scratch.owner() == A::TAG,
                      "{} partial block overwritten by another computation", A::NAME);

        let words = &mut self.words;
        scratch.input(&mut self.count, data, |block| A::compress(words, block));
        scratch.set_owner(if self.count.block_offset() == 0 { 0 } else { A::TAG });
    }

    /// Final: pad, append the bit length, run the last compression(s) and
    /// return the digest.
    ///
    /// On return `scratch` holds the lowercase hex digest in its first
    /// `2 * output_bytes` bytes followed by zeros, and the state is wiped.
    pub fn finalize(mut self, scratch: &mut ScratchBuffer) -> Output<A> {
        let words = &mut self.words;
        scratch.standard_padding(&self.count, LENGTH_FIELD_LEN,
                                 |block| A::compress(words, block));

        let (low, high) = self.count.to_bits();
        write_length(scratch.length_field_mut(), low, high, A::WORD_ORDER, A::LENGTH_ORDER);
        scratch.finish_block(|block| A::compress(words, block));

        let mut out = Output::<A>::default();
        scratch.write_digest(self.words.as_ref(), A::WORD_ORDER, &mut out);
        trace!("{} finalised after {} bytes", A::NAME, self.count.bytes());
        out
    }

    /// Bytes consumed since the last Init.
    pub fn byte_count(&self) -> u64 {
        self.count.bytes()
    }

    /// The running digest words.
    pub fn words(&self) -> &[u32] {
        self.words.as_ref()
    }

    /// Digest size in bytes.
    pub fn output_bytes(&self) -> usize {
        A::OutputSize::USIZE
    }
}

impl<A: Chaining> HashState<A> {
    /// Feed the lowercase hex expansion of `digest` through `update`, two
    /// characters per digest byte.
    pub fn add_expanded_hash(&mut self, scratch: &mut ScratchBuffer, digest: &Output<A>) {
        for &byte in digest.iter() {
            self.update(scratch, &hex::hex_pair(byte));
        }
    }
}

impl<A: BlockFunction> Default for HashState<A> {
    fn default() -> Self { Self::new() }
}

impl<A: BlockFunction> Clone for HashState<A> {
    fn clone(&self) -> Self {
        HashState { words: self.words, count: self.count }
    }
}

impl<A: BlockFunction> fmt::Debug for HashState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashState")
            .field("algorithm", &A::NAME)
            .field("bytes", &self.count.bytes())
            .finish_non_exhaustive()
    }
}

impl<A: BlockFunction> Zeroize for HashState<A> {
    fn zeroize(&mut self) {
        self.words.zeroize();
        self.count.zeroize();
    }
}

impl<A: BlockFunction> Drop for HashState<A> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

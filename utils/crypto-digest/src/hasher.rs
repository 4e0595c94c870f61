use core::mem;

use tinyhash_fixed_buffer::{ScratchBuffer, BLOCK_LEN};

use super::{BlockFunction, Chaining, Digest, HashState, Output};

/// A complete digest context: a `HashState` together with its own private
/// scratch buffer.
pub struct Hasher<A: BlockFunction> {
    state: HashState<A>,
    scratch: ScratchBuffer,
}

impl<A: BlockFunction> Hasher<A> {
    /// Construct a new instance of the digest.
    pub fn new() -> Hasher<A> {
        Hasher {
            state: HashState::new(),
            scratch: ScratchBuffer::new(),
        }
    }

    /// Finish the computation, return the digest and start over.
    pub fn result_reset(&mut self) -> Output<A> {
        let state = mem::replace(&mut self.state, HashState::new());
        let out = state.finalize(&mut self.scratch);
        self.scratch.wipe();
        out
    }

    /// Bytes consumed since the last reset.
    pub fn byte_count(&self) -> u64 {
        self.state.byte_count()
    }

    /// The underlying state.
    pub fn state(&self) -> &HashState<A> {
        &self.state
    }
}

impl<A: Chaining> Hasher<A> {
    /// Feed the lowercase hex expansion of an earlier digest.
    pub fn add_expanded_hash(&mut self, digest: &Output<A>) {
        self.state.add_expanded_hash(&mut self.scratch, digest);
    }
}

impl<A: BlockFunction> Default for Hasher<A> {
    fn default() -> Self { Self::new() }
}

impl<A: BlockFunction> Clone for Hasher<A> {
    fn clone(&self) -> Self {
        Hasher {
            state: self.state.clone(),
            scratch: self.scratch.clone(),
        }
    }
}

impl<A: BlockFunction> Digest for Hasher<A> {
    type N = A::OutputSize;

    fn input(&mut self, input: &[u8]) {
        self.state.update(&mut self.scratch, input);
    }

    fn result(self) -> Output<A> {
        let Hasher { state, mut scratch } = self;
        state.finalize(&mut scratch)
    }

    fn reset(&mut self) {
        self.state.init();
        self.scratch.wipe();
    }

    fn block_size(&self) -> usize { BLOCK_LEN }
}

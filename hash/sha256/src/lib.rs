//! An implementation of the SHA-256 cryptographic hash algorithm (FIPS 180-2).
//!
//! # Usage
//!
//! ```rust
//! use tinyhash_sha256::{Digest, Sha256};
//!
//! // create a Sha256 object
//! let mut hasher = Sha256::new();
//!
//! // write input message
//! hasher.input_str("hello world");
//!
//! // read hash digest
//! let hex = hasher.result_str();
//!
//! assert_eq!(hex,
//!            concat!("b94d27b9934d3e08a52e52d7da7dabfa",
//!                    "c484efe37a5380ee9088f7ace2efcde9"));
//! ```
//!
//! The sixteen message words are expanded in place, so the schedule never
//! occupies more than one block.

#![cfg_attr(not(feature="use-std"), no_std)]

use generic_array::typenum::U32;
use tinyhash_bytes::read_u32v_be;
use tinyhash_digest::{Block, BlockFunction, ByteOrder, Chaining, HashState, Hasher,
                      LengthOrder, Registers, Role};
use zeroize::Zeroize;

pub use tinyhash_digest::Digest;

mod consts;
use consts::{H256, K32, STATE_LEN};

#[inline]
fn choose(x: u32, y: u32, z: u32) -> u32 { (x & y) ^ (!x & z) }

#[inline]
fn majority(x: u32, y: u32, z: u32) -> u32 { (x & y) ^ (x & z) ^ (y & z) }

#[inline]
fn big_sigma0(x: u32) -> u32 { x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22) }

#[inline]
fn big_sigma1(x: u32) -> u32 { x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25) }

#[inline]
fn sigma0(x: u32) -> u32 { x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3) }

#[inline]
fn sigma1(x: u32) -> u32 { x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10) }

/// Process one 64-byte block.
pub fn sha256_digest_block(state: &mut [u32; STATE_LEN], block: &Block) {
    let mut w = [0u32; 16];
    read_u32v_be(&mut w, block);

    let mut regs = Registers::<STATE_LEN>::load(state);
    for step in 0..64 {
        let s = step & 15;
        if step >= 16 {
            let t = sigma1(w[(s + 14) & 15])
                .wrapping_add(w[(s + 9) & 15])
                .wrapping_add(sigma0(w[(s + 1) & 15]));
            w[s] = w[s].wrapping_add(t);
        }

        let e = regs.e();
        let t1 = big_sigma1(e)
            .wrapping_add(choose(e, regs.f(), regs.g()))
            .wrapping_add(K32[step])
            .wrapping_add(w[s]);
        regs.add(Role::H, t1);
        let h = regs.h();
        regs.add(Role::D, h);
        let a = regs.a();
        regs.add(Role::H, big_sigma0(a).wrapping_add(majority(a, regs.b(), regs.c())));
        regs.advance();
    }
    regs.fold_into(state);

    w.zeroize();
}

/// The SHA-256 block function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Transform;

impl BlockFunction for Sha256Transform {
    type State = [u32; STATE_LEN];
    type OutputSize = U32;

    const NAME: &'static str = "sha256";
    const TAG: u8 = b'S';
    const INITIAL_STATE: [u32; STATE_LEN] = H256;
    const WORD_ORDER: ByteOrder = ByteOrder::BigEndian;
    const LENGTH_ORDER: LengthOrder = LengthOrder::HighWordFirst;

    fn compress(state: &mut [u32; STATE_LEN], block: &Block) {
        sha256_digest_block(state, block);
    }
}

impl Chaining for Sha256Transform {}

/// The SHA-256 hash algorithm with the SHA-256 initial hash value.
pub type Sha256 = Hasher<Sha256Transform>;

/// Bare SHA-256 context borrowing a caller-supplied scratch buffer.
pub type Sha256State = HashState<Sha256Transform>;

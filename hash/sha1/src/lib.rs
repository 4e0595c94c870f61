//! An implementation of the SHA-1 cryptographic hash algorithm (FIPS 180-1).
//!
//! The message schedule is expanded on the fly in a rolling window of
//! sixteen words, so a block never needs more than the 64 bytes it arrived
//! in plus the five working registers.
//!
//! SHA-1 does not offer `add_expanded_hash`.

#![cfg_attr(not(feature="use-std"), no_std)]

use generic_array::typenum::U20;
use tinyhash_bytes::read_u32v_be;
use tinyhash_digest::{Block, BlockFunction, ByteOrder, HashState, Hasher, LengthOrder,
                      Registers, Role};
use zeroize::Zeroize;

pub use tinyhash_digest::Digest;

mod consts;
use consts::{H, K, STATE_LEN};

#[inline]
fn choose(x: u32, y: u32, z: u32) -> u32 { (x & y) | (!x & z) }

#[inline]
fn parity(x: u32, y: u32, z: u32) -> u32 { x ^ y ^ z }

#[inline]
fn majority(x: u32, y: u32, z: u32) -> u32 { (x & y) | (x & z) | (y & z) }

/// Process one 64-byte block.
pub fn sha1_digest_block(state: &mut [u32; STATE_LEN], block: &Block) {
    let mut w = [0u32; 16];
    read_u32v_be(&mut w, block);

    let mut regs = Registers::<STATE_LEN>::load(state);
    for step in 0..80 {
        let s = step & 15;
        if step >= 16 {
            w[s] = (w[(s + 13) & 15] ^ w[(s + 8) & 15] ^ w[(s + 2) & 15] ^ w[s]).rotate_left(1);
        }

        let (b, c, d) = (regs.b(), regs.c(), regs.d());
        let f = match step / 20 {
            0 => choose(b, c, d),
            2 => majority(b, c, d),
            _ => parity(b, c, d),
        };
        regs.add(Role::E, regs.a().rotate_left(5)
                              .wrapping_add(f)
                              .wrapping_add(w[s])
                              .wrapping_add(K[step / 20]));
        regs.rotate_left(Role::B, 30);
        regs.advance();
    }
    regs.fold_into(state);

    w.zeroize();
}

/// The SHA-1 block function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha1Transform;

impl BlockFunction for Sha1Transform {
    type State = [u32; STATE_LEN];
    type OutputSize = U20;

    const NAME: &'static str = "sha1";
    const TAG: u8 = b'1';
    const INITIAL_STATE: [u32; STATE_LEN] = H;
    const WORD_ORDER: ByteOrder = ByteOrder::BigEndian;
    const LENGTH_ORDER: LengthOrder = LengthOrder::HighWordFirst;

    fn compress(state: &mut [u32; STATE_LEN], block: &Block) {
        sha1_digest_block(state, block);
    }
}

/// The SHA-1 hash algorithm
pub type Sha1 = Hasher<Sha1Transform>;

/// Bare SHA-1 context borrowing a caller-supplied scratch buffer.
pub type Sha1State = HashState<Sha1Transform>;

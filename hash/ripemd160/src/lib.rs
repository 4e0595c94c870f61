//! An implementation of the RIPEMD-160 cryptographic hash.
//!
//! First create a `Ripemd160` object using the `Ripemd160` constructor,
//! then feed it input using the `input` or `input_str` methods, which
//! may be called any number of times.
//!
//! After the entire input has been fed to the hash read the result using
//! the `result` or `result_str` methods.
//!
//! The `Ripemd160` object may be reused to create multiple hashes by
//! calling the `reset` method.
//!
//! RIPEMD-160 does not offer `add_expanded_hash`.

#![cfg_attr(not(feature="use-std"), no_std)]

use generic_array::typenum::U20;
use tinyhash_bytes::read_u32v_le;
use tinyhash_digest::{Block, BlockFunction, ByteOrder, HashState, Hasher, LengthOrder,
                      Registers, Role};
use zeroize::Zeroize;

pub use tinyhash_digest::Digest;

mod consts;
use consts::{DIGEST_BUF_LEN, H, KL, KR, RL, RR, SL, SR};

type Lane = Registers<DIGEST_BUF_LEN>;

/// The five boolean functions, in left lane round order. The right lane
/// runs them backwards.
fn round_function(round: usize, x: u32, y: u32, z: u32) -> u32 {
    match round {
        0 => x ^ y ^ z,
        1 => (x & y) | (!x & z),
        2 => (x | !y) ^ z,
        3 => (x & z) | (y & !z),
        _ => x ^ (y | !z),
    }
}

fn lane_step(lane: &mut Lane, round: usize, word: u32, k: u32, shift: u32) {
    let f = round_function(round, lane.b(), lane.c(), lane.d());
    let t = lane.a().wrapping_add(f).wrapping_add(word).wrapping_add(k);
    lane.set(Role::A, t.rotate_left(shift).wrapping_add(lane.e()));
    lane.rotate_left(Role::C, 10);
    lane.advance();
}

/// Process one 64-byte block.
pub fn ripemd160_digest_block(h: &mut [u32; DIGEST_BUF_LEN], block: &Block) {
    let mut x = [0u32; 16];
    read_u32v_le(&mut x, block);

    let mut left = Lane::load(h);
    let mut right = Lane::load(h);
    for step in 0..80 {
        let (round, s) = (step >> 4, step & 15);
        lane_step(&mut left, round, x[RL[round][s] as usize], KL[round], SL[step]);
        lane_step(&mut right, 4 - round, x[RR[round][s] as usize], KR[round], SR[step]);
    }

    let mut prev = *h;
    for i in 0..DIGEST_BUF_LEN {
        h[i] = prev[(i + 1) % 5]
            .wrapping_add(left.home((i + 2) % 5))
            .wrapping_add(right.home((i + 3) % 5));
    }

    prev.zeroize();
    x.zeroize();
}

/// The RIPEMD-160 block function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ripemd160Transform;

impl BlockFunction for Ripemd160Transform {
    type State = [u32; DIGEST_BUF_LEN];
    type OutputSize = U20;

    const NAME: &'static str = "ripemd160";
    const TAG: u8 = b'R';
    const INITIAL_STATE: [u32; DIGEST_BUF_LEN] = H;
    const WORD_ORDER: ByteOrder = ByteOrder::LittleEndian;
    const LENGTH_ORDER: LengthOrder = LengthOrder::LowWordFirst;

    fn compress(h: &mut [u32; DIGEST_BUF_LEN], block: &Block) {
        ripemd160_digest_block(h, block);
    }
}

/// Structure representing the state of a Ripemd160 computation
pub type Ripemd160 = Hasher<Ripemd160Transform>;

/// Bare RIPEMD-160 context borrowing a caller-supplied scratch buffer.
pub type Ripemd160State = HashState<Ripemd160Transform>;

//! An implementation of the MD5 cryptographic hash algorithm (RFC 1321).
//!
//! `Md5` owns its scratch buffer and implements `Digest`:
//!
//! ```
//! use tinyhash_md5::{Digest, Md5};
//!
//! let mut sh = Md5::new();
//! sh.input(b"abc");
//! assert_eq!(sh.result_str(), "900150983cd24fb0d6963f7d28e17f72");
//! ```
//!
//! `Md5State` is the bare context for callers that manage the scratch buffer
//! themselves, for instance through the shared arena. After `finalize` the
//! buffer holds the lowercase hex digest.

#![cfg_attr(not(feature="use-std"), no_std)]

use generic_array::typenum::U16;
use tinyhash_bytes::read_u32v_le;
use tinyhash_digest::{Block, BlockFunction, ByteOrder, Chaining, HashState, Hasher,
                      LengthOrder, Registers, Role};
use zeroize::Zeroize;

pub use tinyhash_digest::Digest;

mod consts;
use consts::{H, SHIFTS, STATE_LEN, T};

#[inline]
fn xchoose(x: u32, y: u32, z: u32) -> u32 { (x & y) | (!x & z) }

#[inline]
fn zchoose(x: u32, y: u32, z: u32) -> u32 { (z & x) | (!z & y) }

#[inline]
fn parity(x: u32, y: u32, z: u32) -> u32 { x ^ y ^ z }

#[inline]
fn i(x: u32, y: u32, z: u32) -> u32 { y ^ (x | !z) }

/// Process one 64-byte block.
pub fn md5_digest_block(state: &mut [u32; STATE_LEN], block: &Block) {
    let mut x = [0u32; 16];
    read_u32v_le(&mut x, block);

    let mut regs = Registers::<STATE_LEN>::load(state);
    for step in 0..64 {
        let s = step & 15;
        let (b, c, d) = (regs.b(), regs.c(), regs.d());
        let (f, k) = match step >> 4 {
            0 => (xchoose(b, c, d), s),
            1 => (zchoose(b, c, d), (5 * s + 1) & 15),
            2 => (parity(b, c, d), (3 * s + 5) & 15),
            _ => (i(b, c, d), (7 * s) & 15),
        };
        let z = regs.a().wrapping_add(f).wrapping_add(x[k]).wrapping_add(T[step]);
        regs.set(Role::A, b.wrapping_add(z.rotate_left(SHIFTS[step >> 4][step & 3])));
        regs.advance();
    }
    regs.fold_into(state);

    x.zeroize();
}

/// The MD5 block function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5Transform;

impl BlockFunction for Md5Transform {
    type State = [u32; STATE_LEN];
    type OutputSize = U16;

    const NAME: &'static str = "md5";
    const TAG: u8 = b'5';
    const INITIAL_STATE: [u32; STATE_LEN] = H;
    const WORD_ORDER: ByteOrder = ByteOrder::LittleEndian;
    const LENGTH_ORDER: LengthOrder = LengthOrder::LowWordFirst;

    fn compress(state: &mut [u32; STATE_LEN], block: &Block) {
        md5_digest_block(state, block);
    }
}

impl Chaining for Md5Transform {}

/// The MD5 Digest algorithm
pub type Md5 = Hasher<Md5Transform>;

/// Bare MD5 context borrowing a caller-supplied scratch buffer.
pub type Md5State = HashState<Md5Transform>;

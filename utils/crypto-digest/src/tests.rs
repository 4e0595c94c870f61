extern crate std;

use std::vec::Vec;

use generic_array::typenum::U16;
use generic_array::GenericArray;
use tinyhash_bytes::{write_length, ByteOrder, LengthOrder};
use tinyhash_fixed_buffer::{Block, ScratchBuffer};

use super::{matches, matches_fixed_time, BlockFunction, Chaining, Digest, HashState,
            Hasher, Output, Registers, Role};

// A deliberately weak mixing function: good enough to tell blocks, byte
// orders and length fields apart.
macro_rules! toy_function {
    ($name:ident, $tag:expr, $words:expr, $length:expr) => {
        struct $name;

        impl BlockFunction for $name {
            type State = [u32; 4];
            type OutputSize = U16;

            const NAME: &'static str = stringify!($name);
            const TAG: u8 = $tag;
            const INITIAL_STATE: [u32; 4] = [0x01234567, 0x89abcdef, 0xfedcba98, 0x76543210];
            const WORD_ORDER: ByteOrder = $words;
            const LENGTH_ORDER: LengthOrder = $length;

            fn compress(state: &mut [u32; 4], block: &Block) {
                let mut w = [0u32; 16];
                Self::WORD_ORDER.read_u32v(&mut w, block);
                for (i, &x) in w.iter().enumerate() {
                    let s = &mut state[i % 4];
                    *s = s.rotate_left(7) ^ x.wrapping_add(i as u32);
                }
            }
        }
    };
}

toy_function!(LittleToy, b'l', ByteOrder::LittleEndian, LengthOrder::LowWordFirst);
toy_function!(BigToy, b'b', ByteOrder::BigEndian, LengthOrder::HighWordFirst);

impl Chaining for LittleToy {}

/// Pad the whole message up front and compress it block by block.
fn reference<A: BlockFunction<State = [u32; 4]>>(msg: &[u8]) -> Vec<u8> {
    let mut padded = msg.to_vec();
    padded.push(0x80);
    while padded.len() % 64 != 56 {
        padded.push(0);
    }
    let bits = (msg.len() as u64) * 8;
    let mut field = [0u8; 8];
    write_length(&mut field, bits as u32, (bits >> 32) as u32, A::WORD_ORDER, A::LENGTH_ORDER);
    padded.extend_from_slice(&field);

    let mut state = A::INITIAL_STATE;
    for chunk in padded.chunks(64) {
        let mut block = [0u8; 64];
        block.copy_from_slice(chunk);
        A::compress(&mut state, &block);
    }
    let mut out = std::vec![0u8; 16];
    A::WORD_ORDER.write_u32v(&mut out, &state);
    out
}

fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

#[test]
fn streaming_matches_padded_reference() {
    for len in 0..200 {
        let msg = message(len);

        let mut scratch = ScratchBuffer::new();
        let mut state = HashState::<LittleToy>::new();
        state.update(&mut scratch, &msg);
        assert_eq!(&state.finalize(&mut scratch)[..], &reference::<LittleToy>(&msg)[..],
                   "len {}", len);

        let mut hasher = Hasher::<BigToy>::new();
        hasher.input(&msg);
        assert_eq!(&hasher.result()[..], &reference::<BigToy>(&msg)[..], "len {}", len);
    }
}

#[test]
fn split_points_do_not_matter() {
    let msg = message(300);
    let expected = reference::<LittleToy>(&msg);
    for &step in &[1usize, 3, 55, 63, 64, 65, 127] {
        let mut scratch = ScratchBuffer::new();
        let mut state = HashState::<LittleToy>::new();
        for chunk in msg.chunks(step) {
            state.update(&mut scratch, chunk);
            state.update(&mut scratch, &[]);
        }
        assert_eq!(state.byte_count(), 300);
        assert_eq!(&state.finalize(&mut scratch)[..], &expected[..], "step {}", step);
    }
}

#[test]
fn length_layouts_differ() {
    let msg = message(10);
    let mut a = HashState::<LittleToy>::new();
    let mut b = HashState::<BigToy>::new();
    let mut scratch = ScratchBuffer::new();
    a.update(&mut scratch, &msg);
    let a = a.finalize(&mut scratch);
    b.update(&mut scratch, &msg);
    let b = b.finalize(&mut scratch);
    assert_ne!(a, b);
}

#[test]
fn scratch_holds_hex_digest_after_final() {
    let mut scratch = ScratchBuffer::new();
    let mut state = HashState::<BigToy>::new();
    state.update(&mut scratch, b"hex me");
    let out = state.finalize(&mut scratch);

    let mut hex = [0u8; 32];
    tinyhash_bytes::hex::encode(&out, &mut hex);
    assert_eq!(scratch.hex_digest(16), &hex[..]);
    assert!(scratch.block()[32..].iter().all(|&b| b == 0));
    assert_eq!(scratch.header(), &[0u8; 4]);
}

#[test]
fn remainder_is_followed_by_zeros() {
    let mut scratch = ScratchBuffer::new();
    let mut state = HashState::<LittleToy>::new();
    let msg = message(150);
    let mut fed = 0;
    for chunk in msg.chunks(37) {
        state.update(&mut scratch, chunk);
        fed += chunk.len();
        let rem = fed % 64;
        assert_eq!(&scratch.block()[..rem], &msg[fed - rem..fed]);
        assert!(scratch.block()[rem..].iter().all(|&b| b == 0));
        assert_eq!(scratch.owner(), if rem == 0 { 0 } else { b'l' });
    }
}

#[test]
fn expanded_hash_equals_hex_update() {
    let prior: Output<LittleToy> = GenericArray::clone_from_slice(&message(16));
    let mut hex = [0u8; 32];
    tinyhash_bytes::hex::encode(&prior, &mut hex);

    let mut scratch = ScratchBuffer::new();
    let mut chained = HashState::<LittleToy>::new();
    chained.update(&mut scratch, b"salt");
    chained.add_expanded_hash(&mut scratch, &prior);
    let chained = chained.finalize(&mut scratch);

    let mut plain = Hasher::<LittleToy>::new();
    plain.input(b"salt");
    plain.input(&hex);
    assert_eq!(chained, plain.result());

    let mut hasher = Hasher::<LittleToy>::new();
    hasher.input(b"salt");
    hasher.add_expanded_hash(&prior);
    assert_eq!(hasher.byte_count(), 36);
    assert_eq!(chained, hasher.result());
}

#[test]
fn reset_after_final() {
    let mut hasher = Hasher::<BigToy>::new();
    hasher.input(&message(90));
    let first = hasher.result_reset();
    assert_eq!(hasher.byte_count(), 0);
    assert_eq!(hasher.state().words(), &BigToy::INITIAL_STATE[..]);

    hasher.input(&message(90));
    assert_eq!(hasher.result_reset(), first);

    hasher.input(b"junk");
    hasher.reset();
    hasher.input(&message(90));
    assert_eq!(hasher.clone().result(), first);
    assert_eq!(hasher.output_bytes(), 16);
    assert_eq!(hasher.output_bits(), 128);
    assert_eq!(hasher.block_size(), 64);
}

#[cfg(feature = "use-std")]
#[test]
fn result_str_is_lowercase_hex() {
    let mut hasher = Hasher::<LittleToy>::new();
    hasher.input_str("abc");
    let expected: std::string::String = reference::<LittleToy>(b"abc")
        .iter()
        .map(|b| std::format!("{:02x}", b))
        .collect();
    assert_eq!(hasher.result_str(), expected);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "partial block overwritten")]
fn interleaving_one_buffer_is_caught() {
    let mut scratch = ScratchBuffer::new();
    let mut a = HashState::<LittleToy>::new();
    let mut b = HashState::<BigToy>::new();
    a.update(&mut scratch, b"first");
    b.update(&mut scratch, b"second");
    a.update(&mut scratch, b"third");
}

#[test]
fn register_roles_rotate() {
    let mut regs = Registers::<4>::load(&[1, 2, 3, 4]);
    assert_eq!((regs.a(), regs.b(), regs.c(), regs.d()), (1, 2, 3, 4));

    regs.advance();
    assert_eq!((regs.a(), regs.b(), regs.c(), regs.d()), (4, 1, 2, 3));

    regs.set(Role::A, 40);
    regs.add(Role::B, 9);
    regs.rotate_left(Role::C, 1);
    for _ in 0..3 {
        regs.advance();
    }
    assert_eq!(regs.step(), 4);
    assert_eq!((regs.home(0), regs.home(1), regs.home(2), regs.home(3)), (10, 4, 3, 40));

    let mut words = [1u32, 1, 1, u32::MAX];
    regs.fold_into(&mut words);
    assert_eq!(words, [11, 5, 4, 39]);
}

#[test]
fn match_predicates() {
    let a: GenericArray<u8, U16> = GenericArray::clone_from_slice(&message(16));
    let mut b = a.clone();
    assert!(matches(&a, &b));
    assert!(matches_fixed_time(&a, &b));
    b[15] ^= 1;
    assert!(!matches(&a, &b));
    assert!(!matches_fixed_time(&a, &b));
}

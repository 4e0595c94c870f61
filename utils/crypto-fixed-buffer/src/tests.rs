use tinyhash_bytes::ByteOrder;

use super::{arena, Block, ByteCount, ScratchBuffer, BLOCK_LEN, LENGTH_FIELD_LEN};

fn pattern<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    for (i, b) in out.iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(7).wrapping_add(1);
    }
    out
}

#[test]
fn byte_count_carries_into_high_half() {
    let mut count = ByteCount::from_halves(u32::MAX - 9, 0);
    count.add(10);
    assert_eq!(count.halves(), (0, 1));
    count.add(65535);
    assert_eq!(count.halves(), (65535, 1));
    assert_eq!(count.bytes(), (1u64 << 32) + 65535);
}

#[test]
fn byte_count_bit_conversion_folds_top_bits() {
    let count = ByteCount::from_halves(0xe000_0001, 0x0000_0002);
    assert_eq!(count.to_bits(), (0x0000_0008, 0x0000_0017));

    let mut small = ByteCount::new();
    small.add(3);
    assert_eq!(small.to_bits(), (24, 0));
}

#[test]
fn partial_input_is_buffered_without_processing() {
    let mut scratch = ScratchBuffer::new();
    let mut count = ByteCount::new();
    let data = pattern::<10>();
    let mut calls = 0;

    scratch.input(&mut count, &data, |_| calls += 1);
    scratch.input(&mut count, &data, |_| calls += 1);

    assert_eq!(calls, 0);
    assert_eq!(count.bytes(), 20);
    assert_eq!(&scratch.block()[..10], &data);
    assert_eq!(&scratch.block()[10..20], &data);
    assert!(scratch.block()[20..].iter().all(|&b| b == 0));
}

#[test]
fn full_blocks_are_processed_and_cleared() {
    let mut scratch = ScratchBuffer::new();
    let mut count = ByteCount::new();
    let data = pattern::<200>();
    let mut seen = [[0u8; BLOCK_LEN]; 3];
    let mut calls = 0;

    scratch.input(&mut count, &data[..30], |_| calls += 1);
    scratch.input(&mut count, &data[30..], |b: &Block| {
        seen[calls] = *b;
        calls += 1;
    });

    assert_eq!(calls, 3);
    for (i, block) in seen.iter().enumerate() {
        assert_eq!(&block[..], &data[i * 64..(i + 1) * 64]);
    }
    // 200 - 192 bytes remain, everything after them is clear.
    assert_eq!(count.block_offset(), 8);
    assert_eq!(&scratch.block()[..8], &data[192..]);
    assert!(scratch.block()[8..].iter().all(|&b| b == 0));
}

#[test]
fn exact_block_leaves_nothing_buffered() {
    let mut scratch = ScratchBuffer::new();
    let mut count = ByteCount::new();
    let data = pattern::<64>();
    let mut calls = 0;

    scratch.input(&mut count, &data, |_| calls += 1);

    assert_eq!(calls, 1);
    assert_eq!(count.block_offset(), 0);
    assert!(scratch.block().iter().all(|&b| b == 0));
}

#[test]
fn padding_fits_in_current_block() {
    for &len in &[0usize, 1, 55] {
        let mut scratch = ScratchBuffer::new();
        let mut count = ByteCount::new();
        let data = pattern::<64>();
        let mut calls = 0;

        scratch.input(&mut count, &data[..len], |_| calls += 1);
        scratch.standard_padding(&count, LENGTH_FIELD_LEN, |_| calls += 1);

        assert_eq!(calls, 0, "len {}", len);
        assert_eq!(scratch.block()[len], 0x80);
        assert!(scratch.block()[len + 1..].iter().all(|&b| b == 0));
    }
}

#[test]
fn padding_spills_into_fresh_block() {
    for &len in &[56usize, 60, 63] {
        let mut scratch = ScratchBuffer::new();
        let mut count = ByteCount::new();
        let data = pattern::<64>();
        let mut spilled = [0u8; BLOCK_LEN];
        let mut calls = 0;

        scratch.input(&mut count, &data[..len], |_| calls += 1);
        scratch.standard_padding(&count, LENGTH_FIELD_LEN, |b: &Block| {
            spilled = *b;
            calls += 1;
        });

        assert_eq!(calls, 1, "len {}", len);
        assert_eq!(&spilled[..len], &data[..len]);
        assert_eq!(spilled[len], 0x80);
        assert!(spilled[len + 1..].iter().all(|&b| b == 0));
        assert!(scratch.block().iter().all(|&b| b == 0));
    }
}

#[test]
fn digest_is_written_as_hex_over_the_block() {
    let mut scratch = ScratchBuffer::new();
    scratch.set_owner(b'5');
    let mut count = ByteCount::new();
    scratch.input(&mut count, &pattern::<40>(), |_| ());

    let mut raw = [0u8; 8];
    scratch.write_digest(&[0x01234567, 0x89abcdef], ByteOrder::LittleEndian, &mut raw);

    assert_eq!(raw, [0x67, 0x45, 0x23, 0x01, 0xef, 0xcd, 0xab, 0x89]);
    assert_eq!(scratch.hex_digest(8), b"67452301efcdab89");
    assert!(scratch.block()[16..].iter().all(|&b| b == 0));
    assert_eq!(scratch.header(), &[0u8; 4]);
}

#[test]
fn owner_tag_survives_processing() {
    let mut scratch = ScratchBuffer::new();
    let mut count = ByteCount::new();
    scratch.set_owner(b'R');
    scratch.input(&mut count, &pattern::<100>(), |_| ());
    assert_eq!(scratch.owner(), b'R');
    scratch.wipe();
    assert_eq!(scratch.owner(), 0);
}

#[test]
fn arena_is_exclusive() {
    arena::with_arena(|scratch| {
        scratch.wipe();
        assert!(arena::try_with_arena(|_| ()).is_none());
    });
    assert_eq!(arena::try_with_arena(|scratch| scratch.owner()), Some(0));
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tinyhash_digest::Digest;

pub struct Test {
    pub name: &'static str,
    pub input: &'static [u8],
    pub output: &'static [u8],
}

#[macro_export]
macro_rules! new_tests {
    ( $( $name:expr ),*  ) => {
        [$(
            $crate::hash::Test {
                name: $name,
                input: include_bytes!(concat!("data/", $name, ".input")),
                output: include_bytes!(concat!("data/", $name, ".output")),
            },
        )*]
    };
}

/// Lengths on either side of the points where padding changes shape.
pub const BOUNDARY_LENGTHS: &[usize] = &[0, 1, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128, 129];

fn digest_of<D: Digest>(data: &[u8]) -> Vec<u8> {
    let mut sh = D::new();
    sh.input(data);
    sh.result().to_vec()
}

pub fn main_test<D: Digest>(tests: &[Test]) {
    // Test that it works when accepting the message all at once
    for t in tests.iter() {
        let mut sh = D::new();
        sh.input(t.input);

        let out = sh.result();

        assert_eq!(out[..], t.output[..], "{}", t.name);
    }

    // Test that it works when accepting the message in pieces
    for t in tests.iter() {
        let mut sh = D::new();
        let len = t.input.len();
        let mut left = len;
        while left > 0 {
            let take = (left + 1) / 2;
            sh.input(&t.input[len - left..take + len - left]);
            left -= take;
        }

        let out = sh.result();

        assert_eq!(out[..], t.output[..], "{}", t.name);
    }
}

pub fn one_million_a<D: Digest>(expected: &[u8]) {
    let mut sh = D::new();
    for _ in 0..50000 {
        sh.input(&[b'a'; 10]);
    }
    sh.input(&[b'a'; 500000]);
    let out = sh.result();
    assert_eq!(out[..], expected[..]);
}

/// Feed 1,000,000 'a's into the digest with varying input sizes and check that
/// the result is correct.
pub fn one_million_random<D: Digest>(expected: &[u8]) {
    let total_size = 1000000;
    let mut sh = D::new();
    let blocksize = sh.block_size();
    let buffer = vec![b'a'; blocksize * 2];
    let mut rng = StdRng::seed_from_u64(0x6d6f_6e65);
    let mut count = 0;

    while count < total_size {
        let next = rng.random_range(0..=2 * blocksize);
        let size = next.min(total_size - count);
        sh.input(&buffer[..size]);
        count += size;
    }

    let out = sh.result();
    assert_eq!(out[..], expected[..]);
}

/// Compare against `reference` for every length in `BOUNDARY_LENGTHS`, fed
/// whole.
pub fn boundary_test<D, F>(reference: F)
    where D: Digest,
          F: Fn(&[u8]) -> Vec<u8>
{
    for &len in BOUNDARY_LENGTHS {
        let data: Vec<u8> = (0..len).map(|i| (i as u8) ^ 0x5c).collect();
        assert_eq!(digest_of::<D>(&data), reference(&data), "length {}", len);
    }
}

/// Split one message at every possible point and check each split against
/// the one-shot digest.
pub fn split_test<D: Digest>(len: usize) {
    let data: Vec<u8> = (0..len).map(|i| (i * 13 + 1) as u8).collect();
    let expected = digest_of::<D>(&data);
    for cut in 0..=len {
        let mut sh = D::new();
        sh.input(&data[..cut]);
        sh.input(&data[cut..]);
        assert_eq!(sh.result().to_vec(), expected, "cut at {}", cut);
    }
}

/// Hash `len` seeded random bytes in random pieces and compare with
/// `reference` over the same bytes.
pub fn reference_test<D, F>(reference: F, len: usize, seed: u64)
    where D: Digest,
          F: Fn(&[u8]) -> Vec<u8>
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(&mut data[..]);

    let mut sh = D::new();
    let mut rest = &data[..];
    while !rest.is_empty() {
        let take = rng.random_range(0..=8192).min(rest.len());
        sh.input(&rest[..take]);
        rest = &rest[take..];
    }
    assert_eq!(sh.result().to_vec(), reference(&data));
}

/// Feed `data` through the digest in the given piece sizes, then the rest.
pub fn chunked<D: Digest>(data: &[u8], cuts: &[usize]) -> Vec<u8> {
    let mut sh = D::new();
    let mut rest = data;
    for &cut in cuts {
        let take = cut.min(rest.len());
        sh.input(&rest[..take]);
        rest = &rest[take..];
    }
    sh.input(rest);
    sh.result().to_vec()
}

pub const DIGEST_BUF_LEN: usize = 5;

pub const H: [u32; DIGEST_BUF_LEN] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Left lane constants, one per round.
pub const KL: [u32; 5] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xa953fd4e];
/// Right lane constants, one per round.
pub const KR: [u32; 5] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x7a6d76e9, 0x00000000];

/// Word permutation taking one left lane round's message order to the next.
pub const P: [usize; 16] = [7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8];

/// Message word order of the left lane, per round.
pub const RL: [[u8; 16]; 5] = left_order();
/// Message word order of the right lane, per round.
pub const RR: [[u8; 16]; 5] = right_order(&RL);

// Round 0 reads the words in order, each later round permutes the previous.
const fn left_order() -> [[u8; 16]; 5] {
    let mut r = [[0u8; 16]; 5];
    let mut s = 0;
    while s < 16 {
        r[0][s] = s as u8;
        s += 1;
    }
    let mut j = 1;
    while j < 5 {
        let mut s = 0;
        while s < 16 {
            r[j][s] = r[j - 1][P[s]];
            s += 1;
        }
        j += 1;
    }
    r
}

const fn right_order(left: &[[u8; 16]; 5]) -> [[u8; 16]; 5] {
    let mut r = [[0u8; 16]; 5];
    let mut j = 0;
    while j < 5 {
        let mut s = 0;
        while s < 16 {
            r[j][s] = left[j][(9 * s + 5) & 15];
            s += 1;
        }
        j += 1;
    }
    r
}

/// Left lane rotation amounts, per step.
pub const SL: [u32; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12,
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5,
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12,
    9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6,
];

/// Right lane rotation amounts, per step.
pub const SR: [u32; 80] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6,
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11,
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5,
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8,
    8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11,
];

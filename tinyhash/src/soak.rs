//! Long-running self test over pseudo-random messages.
//!
//! Messages come from a 16-bit Galois LFSR, so a record only has to carry
//! the message length and the LFSR state it started from for anyone to
//! regenerate the input and check the digest. A run hashes each message in
//! random segments of 0 to 79 bytes and compares with hashing it in one
//! call.
//!
//! Record layout, 40 bytes:
//!
//! | bytes  | field                                       |
//! |--------|---------------------------------------------|
//! | 0..4   | algorithm tag: `MD5=`, `SHA1`, `S256`, `R160` |
//! | 4..6   | message length, big-endian                  |
//! | 6..8   | starting LFSR state, big-endian             |
//! | 8..40  | digest, zero padded                         |

use thiserror::Error;

use super::{Algorithm, DynHasher, DynOutput, MAX_OUTPUT_LEN};

/// Messages are shorter than this.
pub const MAX_MESSAGE_LEN: usize = 1500;
/// Segments are shorter than this.
pub const MAX_SEGMENT_LEN: usize = 80;
pub const RECORD_LEN: usize = 8 + MAX_OUTPUT_LEN;

const TAPS: u16 = 0xb400;

/// 16-bit Galois LFSR emitting bytes most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr {
    state: u16,
}

impl Lfsr {
    /// A zero state is kept as is: it stays zero and emits zero bytes.
    pub fn new(seed: u16) -> Lfsr {
        Lfsr { state: seed }
    }

    pub fn state(&self) -> u16 {
        self.state
    }

    pub fn next_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | (self.state & 1) as u8;
            self.state >>= 1;
            if byte & 1 != 0 {
                self.state ^= TAPS;
            }
        }
        byte
    }

    pub fn fill(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = self.next_byte();
        }
    }
}

impl Iterator for Lfsr {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_byte())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is {0} bytes, expected {len}", len = RECORD_LEN)]
    Length(usize),
    #[error("unknown algorithm tag {0:02x?}")]
    Tag([u8; 4]),
    #[error("message length {0} is not below {max}", max = MAX_MESSAGE_LEN)]
    MessageLength(u16),
    #[error("non-zero byte after the {0}-byte digest")]
    Padding(usize),
}

fn tag(algorithm: Algorithm) -> [u8; 4] {
    match algorithm {
        Algorithm::Md5 => *b"MD5=",
        Algorithm::Sha1 => *b"SHA1",
        Algorithm::Sha256 => *b"S256",
        Algorithm::Ripemd160 => *b"R160",
    }
}

/// One soak result: which message was hashed, and the digest obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoakRecord {
    pub length: u16,
    pub seed: u16,
    pub digest: DynOutput,
}

impl SoakRecord {
    pub fn algorithm(&self) -> Algorithm {
        self.digest.algorithm()
    }

    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[..4].copy_from_slice(&tag(self.algorithm()));
        out[4..6].copy_from_slice(&self.length.to_be_bytes());
        out[6..8].copy_from_slice(&self.seed.to_be_bytes());
        let digest = self.digest.as_slice();
        out[8..8 + digest.len()].copy_from_slice(digest);
        out
    }

    /// Parse a record. The padding after the digest must be zero; the digest
    /// itself is not checked, see `verify`.
    pub fn decode(record: &[u8]) -> Result<SoakRecord, RecordError> {
        if record.len() != RECORD_LEN {
            return Err(RecordError::Length(record.len()));
        }
        let tag_bytes = [record[0], record[1], record[2], record[3]];
        let algorithm = Algorithm::ALL.iter()
            .copied()
            .find(|&alg| tag(alg) == tag_bytes)
            .ok_or(RecordError::Tag(tag_bytes))?;
        let length = u16::from_be_bytes([record[4], record[5]]);
        if length as usize >= MAX_MESSAGE_LEN {
            return Err(RecordError::MessageLength(length));
        }
        let seed = u16::from_be_bytes([record[6], record[7]]);
        let end = 8 + algorithm.output_bytes();
        if record[end..].iter().any(|&b| b != 0) {
            return Err(RecordError::Padding(algorithm.output_bytes()));
        }
        let digest = DynOutput::from_slice(algorithm, &record[8..end])
            .ok_or(RecordError::Length(record.len()))?;
        Ok(SoakRecord { length, seed, digest })
    }

    /// Regenerate the message, hash it in one call and compare.
    pub fn verify(&self) -> bool {
        let length = self.length as usize;
        if length >= MAX_MESSAGE_LEN {
            return false;
        }
        let mut message = [0u8; MAX_MESSAGE_LEN];
        let message = &mut message[..length];
        Lfsr::new(self.seed).fill(message);
        let mut sh = DynHasher::new(self.algorithm());
        sh.input(message);
        sh.result().matches(self.digest.as_slice())
    }
}

/// Outcome of one soak iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoakOutcome {
    pub record: SoakRecord,
    /// Segmented and one-call digests agree.
    pub passed: bool,
}

#[cfg(feature = "use-std")]
pub use self::runner::Soak;

#[cfg(feature = "use-std")]
mod runner {
    use log::debug;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{Lfsr, SoakOutcome, SoakRecord, MAX_MESSAGE_LEN, MAX_SEGMENT_LEN};
    use crate::{Algorithm, DynHasher};

    /// Seeded soak generator. The LFSR runs on across iterations, so every
    /// message starts where the previous one ended.
    pub struct Soak {
        rng: StdRng,
        lfsr: Lfsr,
    }

    impl Soak {
        pub fn new(seed: u64) -> Soak {
            let mut rng = StdRng::seed_from_u64(seed);
            // Zero is the one state the register never leaves.
            let lfsr = Lfsr::new(rng.random_range(1..=u16::MAX));
            Soak { rng, lfsr }
        }

        pub fn run(&mut self, algorithm: Algorithm) -> SoakOutcome {
            let length = self.rng.random_range(0..MAX_MESSAGE_LEN);
            let seed = self.lfsr.state();
            let mut message = [0u8; MAX_MESSAGE_LEN];
            let message = &mut message[..length];
            self.lfsr.fill(message);

            let mut segmented = DynHasher::new(algorithm);
            let mut fed = 0;
            let mut segments = 0;
            while fed < length {
                let take = self.rng.random_range(0..MAX_SEGMENT_LEN).min(length - fed);
                segmented.input(&message[fed..fed + take]);
                fed += take;
                segments += 1;
            }
            let digest = segmented.result();

            let mut whole = DynHasher::new(algorithm);
            whole.input(message);
            let passed = whole.result() == digest;
            debug!("{} soak: {} bytes in {} segments from {:04x}, passed {}",
                   algorithm, length, segments, seed, passed);

            SoakOutcome {
                record: SoakRecord { length: length as u16, seed, digest },
                passed,
            }
        }
    }
}

use core::fmt;
use core::str::FromStr;

use generic_array::{ArrayLength, GenericArray};
use thiserror::Error;
use tinyhash_bytes::hex;
use tinyhash_digest::{matches, matches_fixed_time, BlockFunction, Digest, Output};
use tinyhash_md5::{Md5, Md5Transform};
use tinyhash_ripemd160::{Ripemd160, Ripemd160Transform};
use tinyhash_sha1::{Sha1, Sha1Transform};
use tinyhash_sha256::{Sha256, Sha256Transform};

/// Size of the largest digest, SHA-256's.
pub const MAX_OUTPUT_LEN: usize = 32;

/// The name did not match any supported algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown hash algorithm (expected md5, sha1, sha256 or ripemd160)")]
pub struct UnknownAlgorithm;

/// Errors from `DynHasher::add_expanded_hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("{0} does not support hash chaining")]
    Unsupported(Algorithm),
    #[error("expected a {expected}-byte digest, got {actual} bytes")]
    Length { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Ripemd160,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] =
        [Algorithm::Md5, Algorithm::Sha1, Algorithm::Sha256, Algorithm::Ripemd160];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => Md5Transform::NAME,
            Algorithm::Sha1 => Sha1Transform::NAME,
            Algorithm::Sha256 => Sha256Transform::NAME,
            Algorithm::Ripemd160 => Ripemd160Transform::NAME,
        }
    }

    /// Digest size in bytes.
    pub fn output_bytes(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 | Algorithm::Ripemd160 => 20,
            Algorithm::Sha256 => 32,
        }
    }

    /// Whether `add_expanded_hash` is available.
    pub fn supports_chaining(self) -> bool {
        matches!(self, Algorithm::Md5 | Algorithm::Sha256)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, Algorithm); 5] = [
            ("md5", Algorithm::Md5),
            ("sha1", Algorithm::Sha1),
            ("sha256", Algorithm::Sha256),
            ("ripemd160", Algorithm::Ripemd160),
            ("rmd160", Algorithm::Ripemd160),
        ];
        NAMES.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, alg)| alg)
            .ok_or(UnknownAlgorithm)
    }
}

/// A finished digest of any of the four algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynOutput {
    Md5(Output<Md5Transform>),
    Sha1(Output<Sha1Transform>),
    Sha256(Output<Sha256Transform>),
    Ripemd160(Output<Ripemd160Transform>),
}

fn compare<N: ArrayLength<u8>>(digest: &GenericArray<u8, N>, other: &[u8], fixed_time: bool) -> bool {
    if other.len() != digest.len() {
        return false;
    }
    let other = GenericArray::from_slice(other);
    if fixed_time {
        matches_fixed_time(digest, other)
    } else {
        matches(digest, other)
    }
}

impl DynOutput {
    /// Wrap a raw digest. Returns `None` unless `bytes` has the algorithm's
    /// output length.
    pub fn from_slice(algorithm: Algorithm, bytes: &[u8]) -> Option<DynOutput> {
        if bytes.len() != algorithm.output_bytes() {
            return None;
        }
        Some(match algorithm {
            Algorithm::Md5 => DynOutput::Md5(GenericArray::clone_from_slice(bytes)),
            Algorithm::Sha1 => DynOutput::Sha1(GenericArray::clone_from_slice(bytes)),
            Algorithm::Sha256 => DynOutput::Sha256(GenericArray::clone_from_slice(bytes)),
            Algorithm::Ripemd160 => DynOutput::Ripemd160(GenericArray::clone_from_slice(bytes)),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            DynOutput::Md5(_) => Algorithm::Md5,
            DynOutput::Sha1(_) => Algorithm::Sha1,
            DynOutput::Sha256(_) => Algorithm::Sha256,
            DynOutput::Ripemd160(_) => Algorithm::Ripemd160,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            DynOutput::Md5(d) => d.as_slice(),
            DynOutput::Sha1(d) => d.as_slice(),
            DynOutput::Sha256(d) => d.as_slice(),
            DynOutput::Ripemd160(d) => d.as_slice(),
        }
    }

    /// Plain byte-wise comparison with a raw digest. A length mismatch is
    /// never a match.
    pub fn matches(&self, other: &[u8]) -> bool {
        self.compare(other, false)
    }

    /// Like `matches`, in time independent of the digest contents.
    pub fn matches_fixed_time(&self, other: &[u8]) -> bool {
        self.compare(other, true)
    }

    fn compare(&self, other: &[u8], fixed_time: bool) -> bool {
        match self {
            DynOutput::Md5(d) => compare(d, other, fixed_time),
            DynOutput::Sha1(d) => compare(d, other, fixed_time),
            DynOutput::Sha256(d) => compare(d, other, fixed_time),
            DynOutput::Ripemd160(d) => compare(d, other, fixed_time),
        }
    }
}

impl AsRef<[u8]> for DynOutput {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Lowercase hex.
impl fmt::Display for DynOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.as_slice() {
            let [hi, lo] = hex::hex_pair(byte);
            write!(f, "{}{}", hi as char, lo as char)?;
        }
        Ok(())
    }
}

/// A streaming hasher whose algorithm is chosen at run time.
#[derive(Clone)]
pub enum DynHasher {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Ripemd160(Ripemd160),
}

impl DynHasher {
    pub fn new(algorithm: Algorithm) -> DynHasher {
        match algorithm {
            Algorithm::Md5 => DynHasher::Md5(Md5::new()),
            Algorithm::Sha1 => DynHasher::Sha1(Sha1::new()),
            Algorithm::Sha256 => DynHasher::Sha256(Sha256::new()),
            Algorithm::Ripemd160 => DynHasher::Ripemd160(Ripemd160::new()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            DynHasher::Md5(_) => Algorithm::Md5,
            DynHasher::Sha1(_) => Algorithm::Sha1,
            DynHasher::Sha256(_) => Algorithm::Sha256,
            DynHasher::Ripemd160(_) => Algorithm::Ripemd160,
        }
    }

    pub fn input(&mut self, data: &[u8]) {
        match self {
            DynHasher::Md5(h) => h.input(data),
            DynHasher::Sha1(h) => h.input(data),
            DynHasher::Sha256(h) => h.input(data),
            DynHasher::Ripemd160(h) => h.input(data),
        }
    }

    /// Feed the lowercase hex expansion of `digest`, which must be a raw
    /// digest of this hasher's algorithm. Only MD5 and SHA-256 chain.
    pub fn add_expanded_hash(&mut self, digest: &[u8]) -> Result<(), ChainError> {
        let algorithm = self.algorithm();
        if !algorithm.supports_chaining() {
            return Err(ChainError::Unsupported(algorithm));
        }
        if digest.len() != algorithm.output_bytes() {
            return Err(ChainError::Length { expected: algorithm.output_bytes(), actual: digest.len() });
        }
        match self {
            DynHasher::Md5(h) => h.add_expanded_hash(GenericArray::from_slice(digest)),
            DynHasher::Sha256(h) => h.add_expanded_hash(GenericArray::from_slice(digest)),
            DynHasher::Sha1(_) | DynHasher::Ripemd160(_) => {
                return Err(ChainError::Unsupported(algorithm));
            }
        }
        Ok(())
    }

    pub fn result(self) -> DynOutput {
        match self {
            DynHasher::Md5(h) => DynOutput::Md5(h.result()),
            DynHasher::Sha1(h) => DynOutput::Sha1(h.result()),
            DynHasher::Sha256(h) => DynOutput::Sha256(h.result()),
            DynHasher::Ripemd160(h) => DynOutput::Ripemd160(h.result()),
        }
    }

    #[cfg(feature = "use-std")]
    pub fn result_hex(self) -> String {
        self.result().to_string()
    }
}

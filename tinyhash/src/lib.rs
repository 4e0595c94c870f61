//! MD5, SHA-1, SHA-256 and RIPEMD-160 behind one streaming engine.
//!
//! The four algorithm crates are re-exported as they are. `Algorithm` and
//! `DynHasher` pick one of them at run time, which is what the `tinyhash`
//! binary uses.

#![cfg_attr(not(feature="use-std"), no_std)]

pub extern crate tinyhash_bytes as bytes;
pub extern crate tinyhash_digest as digest;
pub extern crate tinyhash_fixed_buffer as fixed_buffer;
pub extern crate tinyhash_md5 as md5;
pub extern crate tinyhash_ripemd160 as ripemd160;
pub extern crate tinyhash_sha1 as sha1;
pub extern crate tinyhash_sha256 as sha256;

mod algorithm;
pub mod soak;

pub use algorithm::{Algorithm, ChainError, DynHasher, DynOutput, UnknownAlgorithm,
                    MAX_OUTPUT_LEN};
pub use tinyhash_digest::{matches, matches_fixed_time, Digest};

//! Test vectors and streaming checks shared by the tinyhash digest crates.

pub mod hash;

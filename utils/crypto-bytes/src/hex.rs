//! Lowercase hex expansion of digests.
//!
//! The digests are rendered with a 16-entry nibble table rather than a
//! formatter so the same code runs without `std` and can rewrite a raw digest
//! in place inside the scratch buffer.

use thiserror::Error;

/// Nibble to lowercase ASCII hex digit.
pub const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Errors raised while parsing a hex digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The text does not have exactly twice as many characters as the
    /// destination has bytes.
    #[error("expected {expected} hex characters, found {actual}")]
    InvalidLength { expected: usize, actual: usize },
    /// A character outside `0-9`, `a-f`, `A-F`.
    #[error("invalid hex character {ch:?} at position {index}")]
    InvalidCharacter { ch: char, index: usize },
}

/// The two lowercase hex characters of `byte`, high nibble first.
#[inline]
pub fn hex_pair(byte: u8) -> [u8; 2] {
    [HEX_DIGITS[(byte >> 4) as usize], HEX_DIGITS[(byte & 0x0f) as usize]]
}

/// Write the hex expansion of `src` into the first `2 * src.len()` bytes of
/// `dst`.
pub fn encode(src: &[u8], dst: &mut [u8]) {
    assert!(dst.len() >= src.len() * 2);
    for (pair, &byte) in dst.chunks_exact_mut(2).zip(src.iter()) {
        pair.copy_from_slice(&hex_pair(byte));
    }
}

/// Rewrite the first `raw_len` bytes of `buf` as their hex expansion,
/// occupying `buf[..2 * raw_len]`.
///
/// Works back to front: byte `i` lands at `2i` and `2i + 1`, both at or after
/// `i`, so every raw byte is read before anything overwrites it.
pub fn expand_in_place(buf: &mut [u8], raw_len: usize) {
    assert!(buf.len() >= raw_len * 2);
    for i in (0..raw_len).rev() {
        let pair = hex_pair(buf[i]);
        buf[2 * i] = pair[0];
        buf[2 * i + 1] = pair[1];
    }
}

fn nibble(ch: u8, index: usize) -> Result<u8, Error> {
    match ch {
        b'0'..=b'9' => Ok(ch - b'0'),
        b'a'..=b'f' => Ok(ch - b'a' + 10),
        b'A'..=b'F' => Ok(ch - b'A' + 10),
        _ => Err(Error::InvalidCharacter { ch: ch as char, index }),
    }
}

/// Parse `src` (either case) into `dst`, which fixes the expected length.
pub fn decode(src: &str, dst: &mut [u8]) -> Result<(), Error> {
    let text = src.as_bytes();
    if text.len() != dst.len() * 2 {
        return Err(Error::InvalidLength { expected: dst.len() * 2, actual: text.len() });
    }
    for (i, out) in dst.iter_mut().enumerate() {
        let hi = nibble(text[2 * i], 2 * i)?;
        let lo = nibble(text[2 * i + 1], 2 * i + 1)?;
        *out = (hi << 4) | lo;
    }
    Ok(())
}

//! Byte-order word view shared by the tinyhash digests.
//!
//! Every digest in the workspace assembles its message words from a 64-byte
//! block and writes its state and length field back out as bytes. MD5 and
//! RIPEMD-160 treat words as least-significant-byte first, SHA-1 and SHA-256
//! as most-significant-byte first. The order in which the two halves of the
//! 64-bit length field are laid out is a second, independent choice, modelled
//! by `LengthOrder`.

#![cfg_attr(not(feature="use-std"), no_std)]

pub mod hex;

#[cfg(feature = "use-std")]
mod write_ext;
#[cfg(feature = "use-std")]
pub use write_ext::WriteExt;

/// Order of the four bytes inside one 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first (MD5, RIPEMD-160).
    LittleEndian,
    /// Most significant byte first (SHA-1, SHA-256).
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the build target. Digests never depend on it.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;
    /// Byte order of the build target. Digests never depend on it.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    /// Read one word from the first four bytes of `src`.
    pub fn read_u32(self, src: &[u8]) -> u32 {
        assert!(src.len() >= 4);
        let bytes = [src[0], src[1], src[2], src[3]];
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    /// Write one word into the first four bytes of `dst`.
    pub fn write_u32(self, dst: &mut [u8], val: u32) {
        assert!(dst.len() >= 4);
        let bytes = match self {
            ByteOrder::LittleEndian => val.to_le_bytes(),
            ByteOrder::BigEndian => val.to_be_bytes(),
        };
        dst[..4].copy_from_slice(&bytes);
    }

    /// Read `dst.len()` consecutive words from `src`, which must hold
    /// exactly four bytes per word.
    pub fn read_u32v(self, dst: &mut [u32], src: &[u8]) {
        assert_eq!(dst.len() * 4, src.len());
        for (word, chunk) in dst.iter_mut().zip(src.chunks_exact(4)) {
            *word = self.read_u32(chunk);
        }
    }

    /// Write the words of `src` into `dst`, which must hold exactly four
    /// bytes per word.
    pub fn write_u32v(self, dst: &mut [u8], src: &[u32]) {
        assert_eq!(dst.len(), src.len() * 4);
        for (chunk, &word) in dst.chunks_exact_mut(4).zip(src.iter()) {
            self.write_u32(chunk, word);
        }
    }
}

/// Order of the two 32-bit halves of the 64-bit length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthOrder {
    /// Low half in the first four bytes (MD5, RIPEMD-160).
    LowWordFirst,
    /// High half in the first four bytes (SHA-1, SHA-256).
    HighWordFirst,
}

impl LengthOrder {
    /// Arrange the `(low, high)` halves in field order.
    pub fn arrange(self, low: u32, high: u32) -> [u32; 2] {
        match self {
            LengthOrder::LowWordFirst => [low, high],
            LengthOrder::HighWordFirst => [high, low],
        }
    }
}

/// Write the 64-bit value given as `(low, high)` halves into the first eight
/// bytes of `dst`. The two parameters are applied independently.
pub fn write_length(dst: &mut [u8], low: u32, high: u32,
                    words: ByteOrder, halves: LengthOrder) {
    assert!(dst.len() >= 8);
    words.write_u32v(&mut dst[..8], &halves.arrange(low, high));
}

/// Write a u32 into a vector, which must be 4 bytes long. The value is
/// written in little-endian format.
pub fn write_u32_le(dst: &mut [u8], val: u32) {
    assert_eq!(dst.len(), 4);
    ByteOrder::LittleEndian.write_u32(dst, val);
}

/// Write a u32 into a vector, which must be 4 bytes long. The value is
/// written in big-endian format.
pub fn write_u32_be(dst: &mut [u8], val: u32) {
    assert_eq!(dst.len(), 4);
    ByteOrder::BigEndian.write_u32(dst, val);
}

/// Read a vector of bytes into a vector of u32s. The values are read in
/// little-endian format.
pub fn read_u32v_le(dst: &mut [u32], input: &[u8]) {
    ByteOrder::LittleEndian.read_u32v(dst, input);
}

/// Read a vector of bytes into a vector of u32s. The values are read in
/// big-endian format.
pub fn read_u32v_be(dst: &mut [u32], input: &[u8]) {
    ByteOrder::BigEndian.read_u32v(dst, input);
}

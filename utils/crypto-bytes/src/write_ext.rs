use std::io;
use super::hex;

/// Hex output for anything that implements `Write`.
pub trait WriteExt {
    /// Write `bytes` as lowercase hex, two characters per byte.
    fn write_hex(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<T> WriteExt for T
    where T: io::Write
{
    fn write_hex(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut buff = [0u8; 64];
        for chunk in bytes.chunks(32) {
            let len = chunk.len() * 2;
            hex::encode(chunk, &mut buff[..len]);
            self.write_all(&buff[..len])?;
        }
        Ok(())
    }
}

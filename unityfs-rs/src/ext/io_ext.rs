use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

pub trait ReadExt: Read {
    fn read_cstring(&mut self) -> io::Result<String>;

    fn read_bytes(&mut self, count: usize) -> io::Result<Vec<u8>>;
}

impl<T> ReadExt for T
where
    T: Read,
{
    /// Reads bytes up to a null terminator and returns them as a string,
    /// advancing past the terminator.
    fn read_cstring(&mut self) -> io::Result<String> {
        let mut bytes = Vec::new();
        let mut buf = [0u8; 1];
        loop {
            self.read_exact(&mut buf)?;
            if buf[0] == 0 {
                break;
            }
            bytes.push(buf[0]);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads exactly `count` bytes into a freshly allocated buffer.
    fn read_bytes(&mut self, count: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Utility methods for working with seekable streams.
pub trait SeekExt: Seek {
    /// Advances the position to the next multiple of `alignment`, discarding
    /// any padding bytes rather than interpreting them.
    fn align_to(&mut self, alignment: u64) -> io::Result<u64>;
}

impl<T> SeekExt for T
where
    T: Seek,
{
    fn align_to(&mut self, alignment: u64) -> io::Result<u64> {
        let position = self.stream_position()?;
        let remainder = position % alignment;
        if remainder == 0 {
            return Ok(position);
        }
        self.seek(SeekFrom::Start(position + alignment - remainder))
    }
}

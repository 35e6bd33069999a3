use std::io::{self, Read, Write};

/// Packs bits MSB-first into bytes and hands full bytes to `inner`.
///
/// The trailing partial byte is zero-padded and written exactly once, either
/// by [`BitWriter::finish`] or when the writer is dropped. Errors from the
/// drop path are lost, so callers that care should call `finish`.
pub struct BitWriter<W: Write> {
    inner: W,
    current: u8,
    filled: u8,
    bits_written: u64,
    finished: bool,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        BitWriter {
            inner,
            current: 0,
            filled: 0,
            bits_written: 0,
            finished: false,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        if bit {
            self.current |= 1 << (7 - self.filled);
        }
        self.filled += 1;
        self.bits_written += 1;

        if self.filled == 8 {
            let byte = self.current;
            self.current = 0;
            self.filled = 0;
            self.inner.write_all(&[byte])?;
        }
        Ok(())
    }

    pub fn write_bits(&mut self, bits: &[bool]) -> io::Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Bytes the payload occupies once padded.
    pub fn bytes_written(&self) -> u64 {
        self.bits_written.div_ceil(8)
    }

    /// Pads and writes the partial byte, then flushes `inner`. Later calls
    /// are no-ops.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if self.filled > 0 {
            let byte = self.current;
            self.current = 0;
            self.filled = 0;
            self.inner.write_all(&[byte])?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.finish();
        }
    }
}

/// Reads bits MSB-first, one byte from `inner` at a time. Wrap unbuffered
/// sources in a `BufReader`.
pub struct BitReader<R: Read> {
    inner: R,
    current: u8,
    remaining: u8,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        BitReader {
            inner,
            current: 0,
            remaining: 0,
            bits_read: 0,
        }
    }

    /// Next bit, or `None` at end of stream.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.remaining == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.remaining = 8;
                }
                None => return Ok(None),
            }
        }
        self.remaining -= 1;
        self.bits_read += 1;
        Ok(Some((self.current >> self.remaining) & 1 == 1))
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }
}

//! Layout of the compressed file header.
//!
//! ```text
//! repeat per distinct symbol, in first-seen order:
//!     symbol     u8
//!     frequency  u32 big-endian, never zero
//! terminator:    0x00, 0u32
//! symbol count   u64 big-endian
//! ```
//!
//! The payload follows immediately. The symbol count tells the decoder where
//! the content ends, so pad bits in the last payload byte are never decoded.

use std::io::{self, Read, Write};

use crate::error::{HeaderError, HuffmanError, Phase, Result};
use crate::frequency::FrequencyTable;

const ENTRY_LEN: usize = 5;
const COUNT_LEN: usize = 8;
const MAX_ENTRIES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub frequencies: FrequencyTable,
    pub symbol_count: u64,
}

impl Header {
    pub fn new(frequencies: FrequencyTable) -> Self {
        let symbol_count = frequencies.total();
        Header {
            frequencies,
            symbol_count,
        }
    }

    /// Encoded size in bytes.
    pub fn byte_len(&self) -> usize {
        encoded_len(&self.frequencies)
    }
}

pub fn encoded_len(frequencies: &FrequencyTable) -> usize {
    (frequencies.len() + 1) * ENTRY_LEN + COUNT_LEN
}

pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> Result<()> {
    write_entries(writer, header).map_err(HuffmanError::io(Phase::WritingHeader))
}

fn write_entries<W: Write>(writer: &mut W, header: &Header) -> io::Result<()> {
    for (symbol, frequency) in header.frequencies.iter() {
        writer.write_all(&[symbol])?;
        writer.write_all(&frequency.to_be_bytes())?;
    }
    writer.write_all(&[0])?;
    writer.write_all(&0u32.to_be_bytes())?;
    writer.write_all(&header.symbol_count.to_be_bytes())?;
    Ok(())
}

pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut frequencies = FrequencyTable::new();

    loop {
        let mut entry = [0u8; ENTRY_LEN];
        read_field(
            reader,
            &mut entry,
            HeaderError::Truncated {
                entries: frequencies.len(),
            },
        )?;
        let symbol = entry[0];
        let frequency = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);

        if frequency == 0 {
            if symbol != 0 {
                return Err(HeaderError::BadSentinel { symbol }.into());
            }
            break;
        }
        if frequencies.len() == MAX_ENTRIES {
            return Err(HeaderError::TooManySymbols.into());
        }
        if !frequencies.insert(symbol, frequency) {
            return Err(HeaderError::DuplicateSymbol { symbol }.into());
        }
    }

    let mut count = [0u8; COUNT_LEN];
    read_field(
        reader,
        &mut count,
        HeaderError::TruncatedCount {
            entries: frequencies.len(),
        },
    )?;
    let symbol_count = u64::from_be_bytes(count);

    if frequencies.is_empty() {
        return Err(HeaderError::NoSymbols.into());
    }
    let expected = frequencies.total();
    if symbol_count != expected {
        return Err(HeaderError::CountMismatch {
            declared: symbol_count,
            expected,
        }
        .into());
    }

    Ok(Header {
        frequencies,
        symbol_count,
    })
}

/// Fills `buf`, reporting `on_eof` if the stream ends first.
fn read_field<R: Read>(reader: &mut R, buf: &mut [u8], on_eof: HeaderError) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => on_eof.into(),
        _ => HuffmanError::io(Phase::ReadingHeader)(e),
    })
}

use std::fmt;
use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Stage of an encode or decode session, attached to I/O failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    OpeningInput,
    CreatingOutput,
    CountingFrequencies,
    ReadingInput,
    WritingHeader,
    WritingPayload,
    ReadingHeader,
    ReadingPayload,
    WritingOutput,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Phase::OpeningInput => "opening input",
            Phase::CreatingOutput => "creating output",
            Phase::CountingFrequencies => "counting frequencies",
            Phase::ReadingInput => "reading input",
            Phase::WritingHeader => "writing header",
            Phase::WritingPayload => "writing payload",
            Phase::ReadingHeader => "reading header",
            Phase::ReadingPayload => "reading payload",
            Phase::WritingOutput => "writing output",
        };
        f.write_str(phase)
    }
}

#[derive(Debug, Error)]
pub enum HuffmanError {
    #[error("cannot build a code for empty input")]
    EmptyInput,
    #[error("symbol {symbol:#04x} occurs more often than the header can record")]
    FrequencyOverflow { symbol: u8 },
    #[error("symbol {symbol:#04x} has no codeword")]
    MissingCode { symbol: u8 },
    #[error("input changed between passes: counted {counted} symbols, encoded {encoded}")]
    InputChanged { counted: u64, encoded: u64 },
    #[error("malformed header: {0}")]
    Header(#[from] HeaderError),
    #[error("malformed payload: {0}")]
    Decode(#[from] DecodeError),
    #[error("i/o error while {phase}")]
    Io {
        phase: Phase,
        #[source]
        source: io::Error,
    },
}

impl HuffmanError {
    pub fn io(phase: Phase) -> impl FnOnce(io::Error) -> HuffmanError {
        move |source| HuffmanError::Io { phase, source }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            HuffmanError::Io { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("stream ended after {entries} symbol entries, before the table terminator")]
    Truncated { entries: usize },
    #[error("stream ended inside the symbol count, after the terminator of {entries} symbol entries")]
    TruncatedCount { entries: usize },
    #[error("terminator carries symbol {symbol:#04x} instead of 0x00")]
    BadSentinel { symbol: u8 },
    #[error("symbol {symbol:#04x} listed twice")]
    DuplicateSymbol { symbol: u8 },
    #[error("more than 256 symbol entries")]
    TooManySymbols,
    #[error("symbol table is empty")]
    NoSymbols,
    #[error("symbol count {declared} disagrees with frequency total {expected}")]
    CountMismatch { declared: u64, expected: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload ended after {decoded} of {expected} symbols")]
    UnexpectedEnd { decoded: u64, expected: u64 },
    #[error("bit {position} does not continue any codeword")]
    InvalidBit { position: u64 },
}

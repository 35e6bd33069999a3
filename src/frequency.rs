use std::io::{self, Read};

use crate::error::{HuffmanError, Phase, Result};

/// Occurrence counts per byte, kept in the order each byte was first seen.
///
/// The order matters: leaves are created in table order, and the header
/// stores the table in the same order, so the decoder rebuilds the very tree
/// the encoder used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    entries: Vec<(u8, u32)>,
}

#[derive(Debug)]
struct Counter {
    counts: [u64; 256],
    order: Vec<u8>,
}

impl Counter {
    fn new() -> Self {
        Counter {
            counts: [0; 256],
            order: Vec::new(),
        }
    }

    fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.counts[byte as usize] == 0 {
                self.order.push(byte);
            }
            self.counts[byte as usize] += 1;
        }
    }

    fn finish(self) -> Result<FrequencyTable> {
        let entries = self
            .order
            .iter()
            .map(|&symbol| {
                u32::try_from(self.counts[symbol as usize])
                    .map(|count| (symbol, count))
                    .map_err(|_| HuffmanError::FrequencyOverflow { symbol })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FrequencyTable { entries })
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable { entries: vec![] }
    }

    pub fn count_bytes(bytes: &[u8]) -> Result<Self> {
        let mut counter = Counter::new();
        counter.feed(bytes);
        counter.finish()
    }

    /// Counts every byte `reader` yields until end of stream.
    pub fn count_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut counter = Counter::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HuffmanError::io(Phase::CountingFrequencies)(e)),
            };
            counter.feed(&buf[..n]);
        }
        counter.finish()
    }

    /// Appends `symbol` unless it is already present. Returns whether it was
    /// added.
    pub fn insert(&mut self, symbol: u8, frequency: u32) -> bool {
        if self.get(symbol).is_some() {
            return false;
        }
        self.entries.push((symbol, frequency));
        true
    }

    pub fn get(&self, symbol: u8) -> Option<u32> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|&(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbols the table accounts for.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, f)| f as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(u8, u32)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u32)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (symbol, frequency) in iter {
            table.insert(symbol, frequency);
        }
        table
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_first_seen_order() {
        let table = FrequencyTable::count_bytes(b"banana").unwrap();
        let entries: Vec<(u8, u32)> = table.iter().collect();
        assert_eq!(entries, vec![(b'b', 1), (b'a', 3), (b'n', 2)]);
        assert_eq!(table.total(), 6);
        assert_eq!(table.get(b'n'), Some(2));
        assert_eq!(table.get(b'z'), None);
    }

    #[test]
    fn test_reader_matches_slice() {
        let data: Vec<u8> = (0..50_000u32).map(|i| (i * 7 % 251) as u8).collect();
        let from_reader = FrequencyTable::count_reader(Cursor::new(&data)).unwrap();
        let from_slice = FrequencyTable::count_bytes(&data).unwrap();
        assert_eq!(from_reader, from_slice);
        assert_eq!(from_reader.total(), 50_000);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::count_bytes(b"").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut table = FrequencyTable::new();
        assert!(table.insert(0, 5));
        assert!(!table.insert(0, 9));
        assert_eq!(table.get(0), Some(5));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_read_failure_is_tagged() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let err = FrequencyTable::count_reader(Broken).unwrap_err();
        assert_eq!(err.phase(), Some(Phase::CountingFrequencies));
    }

    #[test]
    fn test_count_past_u32_overflows() {
        let mut counter = Counter::new();
        counter.feed(b"ba");
        counter.counts[b'a' as usize] = u32::MAX as u64 + 1;
        assert!(matches!(
            counter.finish(),
            Err(HuffmanError::FrequencyOverflow { symbol: b'a' })
        ));

        let mut counter = Counter::new();
        counter.feed(b"a");
        counter.counts[b'a' as usize] = u32::MAX as u64;
        let table = counter.finish().unwrap();
        assert_eq!(table.get(b'a'), Some(u32::MAX));
    }
}

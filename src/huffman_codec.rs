use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::arena::NodeId;
use crate::bit_io::{BitReader, BitWriter};
use crate::code_table::CodeTable;
use crate::config::CodecConfig;
use crate::error::{DecodeError, HuffmanError, Phase, Result};
use crate::frequency::FrequencyTable;
use crate::header::{self, Header};
use crate::hufftree::HuffmanTree;
use crate::observer::{NoopObserver, Observer};

/// Byte-oriented Huffman encoder and decoder.
///
/// Every call is an independent session: the tree and code table are rebuilt
/// from the frequency table each time and dropped at the end.
pub struct HuffmanCodec<O: Observer = NoopObserver> {
    config: CodecConfig,
    observer: O,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    pub symbol_count: u64,
    pub distinct_symbols: usize,
    pub header_bytes: u64,
    pub payload_bits: u64,
}

impl EncodeSummary {
    pub fn payload_bytes(&self) -> u64 {
        self.payload_bits.div_ceil(8)
    }

    pub fn compressed_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes()
    }

    /// Compressed size over original size.
    pub fn compression_rate(&self) -> f64 {
        if self.symbol_count == 0 {
            return 0.0;
        }
        self.compressed_bytes() as f64 / self.symbol_count as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSummary {
    pub symbol_count: u64,
    pub distinct_symbols: usize,
    pub header_bytes: u64,
    pub payload_bits: u64,
}

/// Outcome of feeding one bit to a [`TreeWalker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Symbol(u8),
    Continue,
    Invalid,
}

/// Bit-by-bit decoding state: the node reached so far, reset to the root
/// after every emitted symbol.
pub struct TreeWalker<'t> {
    tree: &'t HuffmanTree,
    current: NodeId,
}

impl<'t> TreeWalker<'t> {
    pub fn new(tree: &'t HuffmanTree) -> Self {
        TreeWalker {
            tree,
            current: tree.root(),
        }
    }

    pub fn at_root(&self) -> bool {
        self.current == self.tree.root()
    }

    pub fn step(&mut self, bit: bool) -> Step {
        let arena = self.tree.arena();
        let node = &arena[self.current];

        // single-leaf tree: the only codeword is `0`
        if let Some(symbol) = node.symbol {
            return if bit { Step::Invalid } else { Step::Symbol(symbol) };
        }

        let next = if bit { node.right } else { node.left };
        let Some(next) = next else {
            self.current = self.tree.root();
            return Step::Invalid;
        };
        match arena[next].symbol {
            Some(symbol) => {
                self.current = self.tree.root();
                Step::Symbol(symbol)
            }
            None => {
                self.current = next;
                Step::Continue
            }
        }
    }
}

impl HuffmanCodec<NoopObserver> {
    pub fn new() -> Self {
        HuffmanCodec::with_config(CodecConfig::default())
    }

    pub fn with_config(config: CodecConfig) -> Self {
        HuffmanCodec {
            config,
            observer: NoopObserver,
        }
    }
}

impl Default for HuffmanCodec<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Observer> HuffmanCodec<O> {
    pub fn with_observer(config: CodecConfig, observer: O) -> Self {
        HuffmanCodec { config, observer }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn encode(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let frequencies = FrequencyTable::count_bytes(data)?;
        self.observer.frequencies_counted(&frequencies);

        let mut out = Vec::with_capacity(header::encoded_len(&frequencies) + data.len() / 2);
        self.encode_counted(frequencies, data, &mut out)?;
        Ok(out)
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode_stream(data, &mut out)?;
        Ok(out)
    }

    /// Encodes a seekable source in two passes: count frequencies, rewind to
    /// where the source started, then write header and payload.
    pub fn encode_stream<R, W>(&mut self, mut input: R, output: W) -> Result<EncodeSummary>
    where
        R: Read + Seek,
        W: Write,
    {
        let frequencies = self.count_and_rewind(&mut input)?;
        self.encode_counted(frequencies, input, output)
    }

    fn count_and_rewind<R: Read + Seek>(&mut self, input: &mut R) -> Result<FrequencyTable> {
        let start = input
            .stream_position()
            .map_err(HuffmanError::io(Phase::CountingFrequencies))?;
        let frequencies = FrequencyTable::count_reader(&mut *input)?;
        self.observer.frequencies_counted(&frequencies);

        input
            .seek(SeekFrom::Start(start))
            .map_err(HuffmanError::io(Phase::ReadingInput))?;
        Ok(frequencies)
    }

    fn encode_counted<R, W>(
        &mut self,
        frequencies: FrequencyTable,
        mut input: R,
        mut output: W,
    ) -> Result<EncodeSummary>
    where
        R: Read,
        W: Write,
    {
        let header = Header::new(frequencies);
        let (_tree, table) = self.build_code(&header.frequencies)?;

        header::write_header(&mut output, &header)?;

        let mut sink = BitWriter::new(&mut output);
        let mut buf = vec![0u8; self.config.buffer_capacity()];
        let mut encoded = 0u64;
        loop {
            let n = match input.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HuffmanError::io(Phase::ReadingInput)(e)),
            };
            for &symbol in &buf[..n] {
                let code = table
                    .get(symbol)
                    .ok_or(HuffmanError::MissingCode { symbol })?;
                sink.write_bits(code.bits())
                    .map_err(HuffmanError::io(Phase::WritingPayload))?;
            }
            encoded += n as u64;
        }
        if encoded != header.symbol_count {
            return Err(HuffmanError::InputChanged {
                counted: header.symbol_count,
                encoded,
            });
        }
        sink.finish().map_err(HuffmanError::io(Phase::WritingPayload))?;

        let summary = EncodeSummary {
            symbol_count: header.symbol_count,
            distinct_symbols: header.frequencies.len(),
            header_bytes: header.byte_len() as u64,
            payload_bits: sink.bits_written(),
        };
        self.observer.payload_written(&summary);
        Ok(summary)
    }

    fn build_code(&mut self, frequencies: &FrequencyTable) -> Result<(HuffmanTree, CodeTable)> {
        let tree = HuffmanTree::from_frequencies(frequencies)?;
        self.observer.tree_built(&tree);
        if self.config.dump_tree() {
            tree.log_structure();
        }

        let table = tree.generate_table();
        self.observer.code_table_built(&table);
        Ok((tree, table))
    }

    pub fn decode_stream<R, W>(&mut self, mut input: R, mut output: W) -> Result<DecodeSummary>
    where
        R: Read,
        W: Write,
    {
        let header = header::read_header(&mut input)?;
        self.observer.header_read(&header);

        let tree = HuffmanTree::from_frequencies(&header.frequencies)?;
        self.observer.tree_built(&tree);
        if self.config.dump_tree() {
            tree.log_structure();
        }

        let expected = header.symbol_count;
        let mut source = BitReader::new(&mut input);
        let mut walker = TreeWalker::new(&tree);
        let mut buf = Vec::with_capacity(self.config.buffer_capacity());
        let mut decoded = 0u64;

        while decoded < expected {
            let bit = source
                .read_bit()
                .map_err(HuffmanError::io(Phase::ReadingPayload))?
                .ok_or(DecodeError::UnexpectedEnd { decoded, expected })?;
            match walker.step(bit) {
                Step::Continue => {}
                Step::Symbol(symbol) => {
                    buf.push(symbol);
                    decoded += 1;
                    if buf.len() >= self.config.buffer_capacity() {
                        output
                            .write_all(&buf)
                            .map_err(HuffmanError::io(Phase::WritingOutput))?;
                        buf.clear();
                    }
                }
                Step::Invalid => {
                    return Err(DecodeError::InvalidBit {
                        position: source.bits_read() - 1,
                    }
                    .into());
                }
            }
        }
        output
            .write_all(&buf)
            .and_then(|_| output.flush())
            .map_err(HuffmanError::io(Phase::WritingOutput))?;

        let summary = DecodeSummary {
            symbol_count: decoded,
            distinct_symbols: header.frequencies.len(),
            header_bytes: header.byte_len() as u64,
            payload_bits: source.bits_read(),
        };
        self.observer.payload_decoded(&summary);
        Ok(summary)
    }

    /// The output file is only created once the input is known to be
    /// non-empty.
    pub fn encode_file(&mut self, input: &Path, output: &Path) -> Result<EncodeSummary> {
        let capacity = self.config.buffer_capacity();
        let input = File::open(input).map_err(HuffmanError::io(Phase::OpeningInput))?;
        let mut reader = BufReader::with_capacity(capacity, input);
        let frequencies = self.count_and_rewind(&mut reader)?;
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let output = File::create(output).map_err(HuffmanError::io(Phase::CreatingOutput))?;
        let mut writer = BufWriter::with_capacity(capacity, output);
        let summary = self.encode_counted(frequencies, reader, &mut writer)?;
        writer.flush().map_err(HuffmanError::io(Phase::WritingPayload))?;
        Ok(summary)
    }

    pub fn decode_file(&mut self, input: &Path, output: &Path) -> Result<DecodeSummary> {
        let capacity = self.config.buffer_capacity();
        let input = File::open(input).map_err(HuffmanError::io(Phase::OpeningInput))?;
        let output = File::create(output).map_err(HuffmanError::io(Phase::CreatingOutput))?;

        let reader = BufReader::with_capacity(capacity, input);
        let mut writer = BufWriter::with_capacity(capacity, output);
        let summary = self.decode_stream(reader, &mut writer)?;
        writer.flush().map_err(HuffmanError::io(Phase::WritingOutput))?;
        Ok(summary)
    }
}

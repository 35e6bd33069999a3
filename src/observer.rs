//! Hooks fired at the phase boundaries of an encode or decode session.
//!
//! The codec itself never prints. Hand it a [`LogObserver`] to get progress
//! through the `log` facade, or implement [`Observer`] to collect the events
//! some other way.

use crate::code_table::CodeTable;
use crate::frequency::FrequencyTable;
use crate::header::Header;
use crate::huffman_codec::{DecodeSummary, EncodeSummary};
use crate::hufftree::HuffmanTree;

pub trait Observer {
    fn frequencies_counted(&mut self, _frequencies: &FrequencyTable) {}

    fn header_read(&mut self, _header: &Header) {}

    fn tree_built(&mut self, _tree: &HuffmanTree) {}

    fn code_table_built(&mut self, _table: &CodeTable) {}

    fn payload_written(&mut self, _summary: &EncodeSummary) {}

    fn payload_decoded(&mut self, _summary: &DecodeSummary) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn frequencies_counted(&mut self, frequencies: &FrequencyTable) {
        log::info!(
            "counted {} symbols, {} distinct",
            frequencies.total(),
            frequencies.len()
        );
    }

    fn header_read(&mut self, header: &Header) {
        log::info!(
            "loaded symbol table: {} distinct, {} symbols",
            header.frequencies.len(),
            header.symbol_count
        );
    }

    fn tree_built(&mut self, tree: &HuffmanTree) {
        log::info!(
            "built huffman tree: {} leaves, {} nodes",
            tree.leaf_count(),
            tree.arena().len()
        );
    }

    fn code_table_built(&mut self, table: &CodeTable) {
        log::info!("built code table, longest codeword {} bits", table.max_len());
        for (symbol, code) in table.iter() {
            log::debug!("{:#04x} {:?} -> {}", symbol, symbol as char, code);
        }
    }

    fn payload_written(&mut self, summary: &EncodeSummary) {
        log::info!(
            "wrote {} payload bits ({} bytes) after a {} byte header",
            summary.payload_bits,
            summary.payload_bytes(),
            summary.header_bytes
        );
    }

    fn payload_decoded(&mut self, summary: &DecodeSummary) {
        log::info!(
            "decoded {} symbols from {} payload bits",
            summary.symbol_count,
            summary.payload_bits
        );
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn frequencies_counted(&mut self, frequencies: &FrequencyTable) {
        (**self).frequencies_counted(frequencies)
    }

    fn header_read(&mut self, header: &Header) {
        (**self).header_read(header)
    }

    fn tree_built(&mut self, tree: &HuffmanTree) {
        (**self).tree_built(tree)
    }

    fn code_table_built(&mut self, table: &CodeTable) {
        (**self).code_table_built(table)
    }

    fn payload_written(&mut self, summary: &EncodeSummary) {
        (**self).payload_written(summary)
    }

    fn payload_decoded(&mut self, summary: &DecodeSummary) {
        (**self).payload_decoded(summary)
    }
}

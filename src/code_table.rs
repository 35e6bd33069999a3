use std::fmt;

use crate::arena::NodeId;
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;

/// Root-to-leaf path of one symbol, `false` for left and `true` for right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: Vec<bool>,
}

impl Codeword {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codewords for every leaf of a [`HuffmanTree`], in leaf order.
#[derive(Debug, Clone)]
pub struct CodeTable {
    entries: Vec<(u8, Codeword)>,
    by_symbol: [Option<usize>; 256],
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let arena = tree.arena();
        let mut entries = Vec::with_capacity(tree.leaf_count());
        let mut by_symbol = [None; 256];

        for (id, leaf) in arena.leaves() {
            let Some(symbol) = leaf.symbol else { continue };
            let mut bits = walk_to_root(tree, id);
            // a lone leaf would get an empty code; give it one bit instead
            if bits.is_empty() {
                bits.push(false);
            }
            by_symbol[symbol as usize] = Some(entries.len());
            entries.push((symbol, Codeword { bits }));
        }

        CodeTable { entries, by_symbol }
    }

    pub fn get(&self, symbol: u8) -> Option<&Codeword> {
        self.by_symbol[symbol as usize].map(|i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Codeword)> + '_ {
        self.entries.iter().map(|(symbol, code)| (*symbol, code))
    }

    pub fn max_len(&self) -> usize {
        self.entries.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Payload size in bits for input with the given frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count as u64 * code.len() as u64))
            .sum()
    }
}

fn walk_to_root(tree: &HuffmanTree, leaf: NodeId) -> Vec<bool> {
    let arena = tree.arena();
    let mut bits = Vec::new();
    let mut child = leaf;
    while let Some(parent) = arena[child].parent {
        bits.push(arena[parent].right == Some(child));
        child = parent;
    }
    bits.reverse();
    bits
}

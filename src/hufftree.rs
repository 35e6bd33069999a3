use crate::arena::{NodeArena, NodeId};
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

/// A finished Huffman tree: the arena that owns every node plus the root id.
///
/// Leaves occupy arena slots `0..leaf_count` in frequency-table order,
/// internal nodes follow in creation order.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    arena: NodeArena,
    root: NodeId,
    leaf_count: usize,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::count_bytes(bytes)?;
        HuffmanTree::from_frequencies(&frequencies)
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut arena = NodeArena::with_capacity(frequencies.len());
        let leaves: Vec<NodeId> = frequencies
            .iter()
            .map(|(symbol, count)| arena.create_leaf(symbol, count as u64))
            .collect();
        let leaf_count = leaves.len();

        let heap = MinHeap::build(leaves, &arena);
        let root = HuffmanTree::build_from_heap(&mut arena, heap).ok_or(HuffmanError::EmptyInput)?;

        Ok(HuffmanTree {
            arena,
            root,
            leaf_count,
        })
    }

    /// Merges the two lightest entries until a single root is left. Returns
    /// `None` only for an empty heap.
    fn build_from_heap(arena: &mut NodeArena, mut heap: MinHeap) -> Option<NodeId> {
        while let Some(a) = heap.extract_min(arena) {
            let Some(b) = heap.extract_min(arena) else {
                return Some(a);
            };

            let weight = arena.frequency(a) + arena.frequency(b);
            let z = arena.create_internal(weight, a, b);
            arena.set_parent(a, z);
            arena.set_parent(b, z);

            heap.insert(z, arena);
        }
        None
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Id of the leaf created for the `position`-th frequency-table entry.
    pub fn leaf(&self, position: usize) -> Option<NodeId> {
        if position < self.leaf_count {
            self.arena.id_at(position)
        } else {
            None
        }
    }

    /// True when the whole tree is one leaf, i.e. the input had a single
    /// distinct byte.
    pub fn is_degenerate(&self) -> bool {
        self.arena[self.root].is_leaf()
    }

    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.arena[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// `Σ frequency × depth` over all leaves.
    pub fn weighted_path_length(&self) -> u64 {
        self.arena
            .leaves()
            .map(|(id, node)| node.frequency * self.depth(id) as u64)
            .sum()
    }

    pub fn generate_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }

    pub fn log_structure(&self) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        log::trace!("huffman tree structure:");
        self.log_node(self.root, 0, "root");
    }

    fn log_node(&self, id: NodeId, depth: usize, label: &str) {
        let indent = "  ".repeat(depth);
        let node = &self.arena[id];
        match (node.symbol, node.left, node.right) {
            (Some(byte), _, _) => {
                log::trace!(
                    "{}{}-> leaf {:?} ({}) [weight: {}]",
                    indent,
                    label,
                    byte as char,
                    byte,
                    node.frequency
                );
            }
            (None, Some(left), Some(right)) => {
                log::trace!("{}{}-> internal {} [weight: {}]", indent, label, id, node.frequency);
                self.log_node(left, depth + 1, "L");
                self.log_node(right, depth + 1, "R");
            }
            _ => log::trace!("{}{}-> malformed {}", indent, label, id),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_aaab_tree_shape() {
        let tree = HuffmanTree::from_bytes(b"aaab").unwrap();
        let arena = tree.arena();

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[tree.root()].frequency, 4);
        assert!(!tree.is_degenerate());

        // the lighter leaf is extracted first and lands on the left
        let root = &arena[tree.root()];
        assert_eq!(arena[root.left.unwrap()].symbol, Some(b'b'));
        assert_eq!(arena[root.right.unwrap()].symbol, Some(b'a'));
        assert_eq!(tree.weighted_path_length(), 4);
    }

    #[test]
    fn test_counts_and_single_root() {
        let tree = HuffmanTree::from_bytes(b"the quick brown fox jumps over the lazy dog").unwrap();
        let arena = tree.arena();
        let n = tree.leaf_count();

        assert_eq!(arena.leaf_count(), n);
        assert_eq!(arena.len(), 2 * n - 1);
        let roots: Vec<NodeId> = arena.ids().filter(|&id| arena[id].parent.is_none()).collect();
        assert_eq!(roots, vec![tree.root()]);
        assert_eq!(arena[tree.root()].frequency, 43);

        for id in arena.ids().filter(|&id| !arena[id].is_leaf()) {
            let node = &arena[id];
            let (l, r) = (node.left.unwrap(), node.right.unwrap());
            assert_eq!(node.frequency, arena[l].frequency + arena[r].frequency);
            assert_eq!(arena[l].parent, Some(id));
            assert_eq!(arena[r].parent, Some(id));
        }
    }

    #[test]
    fn test_leaves_follow_table_order() {
        let tree = HuffmanTree::from_bytes(b"zyzx").unwrap();
        let symbols: Vec<Option<u8>> = (0..tree.leaf_count())
            .map(|i| tree.arena()[tree.leaf(i).unwrap()].symbol)
            .collect();
        assert_eq!(symbols, vec![Some(b'z'), Some(b'y'), Some(b'x')]);
    }

    #[test]
    fn test_single_symbol_is_degenerate() {
        let tree = HuffmanTree::from_bytes(b"qqqqqq").unwrap();
        assert!(tree.is_degenerate());
        assert_eq!(tree.arena().len(), 1);
        assert_eq!(tree.depth(tree.root()), 0);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = HuffmanTree::from_bytes(b"").unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyInput));
    }

    #[test]
    fn test_classic_weights() {
        // textbook example: f:5 e:9 c:12 b:13 d:16 a:45 -> cost 224
        let frequencies: FrequencyTable =
            [(b'a', 45), (b'b', 13), (b'c', 12), (b'd', 16), (b'e', 9), (b'f', 5)]
                .into_iter()
                .collect();
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        assert_eq!(tree.weighted_path_length(), 224);
        assert_eq!(tree.depth(tree.leaf(0).unwrap()), 1);
        assert_eq!(tree.leaf(6), None);
    }
}

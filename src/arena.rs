use std::fmt;
use std::ops::Index;

/// Stable handle to a node stored in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub symbol: Option<u8>,
    pub frequency: u64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Append-only store of tree nodes.
///
/// Leaves and internal nodes live side by side and refer to each other by
/// [`NodeId`]. Ids never move once handed out, so the heap and the code table
/// can keep them around while the tree is still growing.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(leaves: usize) -> Self {
        // a full tree over n leaves has 2n - 1 nodes
        NodeArena {
            nodes: Vec::with_capacity((2 * leaves).saturating_sub(1)),
        }
    }

    pub fn create_leaf(&mut self, symbol: u8, frequency: u64) -> NodeId {
        self.push(Node {
            symbol: Some(symbol),
            frequency,
            left: None,
            right: None,
            parent: None,
        })
    }

    pub fn create_internal(&mut self, frequency: u64, left: NodeId, right: NodeId) -> NodeId {
        self.push(Node {
            symbol: None,
            frequency,
            left: Some(left),
            right: Some(right),
            parent: None,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Panics if `id` was not handed out by this arena.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn frequency(&self, id: NodeId) -> u64 {
        self.nodes[id.0].frequency
    }

    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.0].parent = Some(parent);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    pub fn id_at(&self, index: usize) -> Option<NodeId> {
        (index < self.nodes.len()).then_some(NodeId(index))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(i, node)| (NodeId(i), node))
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ids_are_sequential_and_stable() {
        let mut arena = NodeArena::new();
        let a = arena.create_leaf(b'a', 3);
        let b = arena.create_leaf(b'b', 1);
        let ab = arena.create_internal(4, b, a);
        arena.set_parent(a, ab);
        arena.set_parent(b, ab);

        assert_eq!((a.index(), b.index(), ab.index()), (0, 1, 2));
        assert_eq!(arena[a].symbol, Some(b'a'));
        assert_eq!(arena[a].parent, Some(ab));
        assert_eq!(arena[ab].left, Some(b));
        assert_eq!(arena[ab].right, Some(a));
        assert_eq!(arena.frequency(ab), 4);
    }

    #[test]
    fn test_leaf_detection() {
        let mut arena = NodeArena::with_capacity(2);
        let a = arena.create_leaf(0, 7);
        let b = arena.create_leaf(1, 2);
        let root = arena.create_internal(9, a, b);

        assert!(arena[a].is_leaf());
        assert!(!arena[root].is_leaf());
        assert_eq!(arena.leaf_count(), 2);
        assert_eq!(arena.len(), 3);
        let leaves: Vec<NodeId> = arena.leaves().map(|(id, _)| id).collect();
        assert_eq!(leaves, vec![a, b]);
    }

    #[test]
    #[should_panic]
    fn test_foreign_id_panics() {
        let mut other = NodeArena::new();
        other.create_leaf(1, 1);
        let id = other.create_leaf(2, 1);

        let arena = NodeArena::new();
        arena.get(id);
    }
}

use crate::arena::{NodeArena, NodeId};

/// Binary min-heap of arena ids, keyed on each node's frequency.
///
/// Positions are 1-based: the minimum sits at position 1 and the children of
/// `k` are `2k` and `2k + 1`. Position `k` is stored at `elements[k - 1]`.
/// The heap never borrows the arena between calls, every operation takes it
/// as an argument instead.
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    elements: Vec<NodeId>,
}

impl MinHeap {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn parent(&self, k: usize) -> usize {
        k / 2
    }

    pub fn left(&self, k: usize) -> usize {
        2 * k
    }

    pub fn right(&self, k: usize) -> usize {
        2 * k + 1
    }

    fn at(&self, k: usize) -> NodeId {
        self.elements[k - 1]
    }

    fn key(&self, k: usize, arena: &NodeArena) -> u64 {
        arena.frequency(self.at(k))
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a - 1, b - 1);
    }

    /// Bulk-loads `source` and heapifies bottom-up in linear time.
    pub fn build(source: Vec<NodeId>, arena: &NodeArena) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for k in (1..=n / 2).rev() {
            heap.min_heapify(k, arena);
        }
        heap
    }

    pub fn valid_min_heap(&self, arena: &NodeArena) -> bool {
        (2..=self.heap_size()).all(|k| self.key(self.parent(k), arena) <= self.key(k, arena))
    }

    /// Sift-down from position `k`.
    pub fn min_heapify(&mut self, mut k: usize, arena: &NodeArena) {
        let n = self.heap_size();
        loop {
            let l = self.left(k);
            let r = self.right(k);
            let mut smallest = k;

            if l <= n && self.key(l, arena) < self.key(smallest, arena) {
                smallest = l;
            }
            if r <= n && self.key(r, arena) < self.key(smallest, arena) {
                smallest = r;
            }
            if smallest == k {
                return;
            }
            self.swap(k, smallest);
            k = smallest;
        }
    }

    fn sift_up(&mut self, mut k: usize, arena: &NodeArena) {
        while k > 1 {
            let p = self.parent(k);
            if self.key(p, arena) <= self.key(k, arena) {
                break;
            }
            self.swap(p, k);
            k = p;
        }
    }

    pub fn insert(&mut self, id: NodeId, arena: &NodeArena) {
        self.elements.push(id);
        let n = self.heap_size();
        self.sift_up(n, arena);
    }

    pub fn peek_min(&self) -> Option<NodeId> {
        self.elements.first().copied()
    }

    /// Removes the id with the smallest frequency, `None` once the heap is
    /// drained.
    pub fn extract_min(&mut self, arena: &NodeArena) -> Option<NodeId> {
        if self.is_empty() {
            return None;
        }
        let n = self.heap_size();
        self.swap(1, n);
        let result = self.elements.pop();
        if self.heap_size() > 1 {
            self.min_heapify(1, arena);
        }
        result
    }
}

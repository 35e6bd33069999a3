pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Knobs for a [`HuffmanCodec`](crate::HuffmanCodec) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    buffer_capacity: usize,
    dump_tree: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            dump_tree: false,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes.max(1);
        self
    }

    pub fn with_dump_tree(mut self, dump_tree: bool) -> Self {
        self.dump_tree = dump_tree;
        self
    }

    /// Size of the read and write buffers wrapped around files, and of the
    /// chunks the codec moves between input and output. Never zero.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Dump the tree at `trace` level once it is built.
    pub fn dump_tree(&self) -> bool {
        self.dump_tree
    }
}

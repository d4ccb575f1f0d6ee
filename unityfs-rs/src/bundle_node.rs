/// Represents one named logical file packed inside a bundle.
///
/// A node is addressed by offset and size within the logical address space
/// formed by concatenating all storage blocks' decompressed bytes. Node
/// boundaries are not required to align with block boundaries.
#[derive(Debug, Clone)]
pub struct BundleNode {
    /// The position in the decompressed address space where the node's bytes begin.
    pub offset: i64,
    /// The byte length of the node.
    pub size: i64,
    /// Node kind flags, opaque to this crate.
    pub flags: u32,
    /// The path used for lookup. Duplicates are preserved; the first match wins.
    pub path: String,
}

/// Represents one independently compressed chunk of the bundle payload.
///
/// Blocks are stored back to back in table order; the concatenation of all
/// blocks' decompressed bytes forms the logical address space that directory
/// nodes are addressed in.
#[derive(Debug, Clone, Copy)]
pub struct StorageBlock {
    /// The offset of this block's compressed bytes within the payload region.
    /// Not stored in the file; derived as the running sum of prior blocks'
    /// compressed sizes.
    pub compressed_offset: u64,
    /// The compressed size of the block in the file.
    pub compressed_size: u32,
    /// The decompressed size of the block.
    pub uncompressed_size: u32,
    /// Per-block flags. Some container variants put a compression code in the
    /// low six bits; this crate resolves the codec once from the header flags.
    pub flags: u16,
}

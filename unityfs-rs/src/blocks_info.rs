use crate::bundle_header::{ArchiveFlags, BundleHeader};
use crate::bundle_node::BundleNode;
use crate::compression_type::CompressionType;
use crate::error::BundleError;
use crate::ext::io_ext::{ReadExt, SeekExt};
use crate::storage_block::StorageBlock;
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read, Seek, SeekFrom};
use tracing::debug;

/// The parsed blocks table and directory of a bundle.
///
/// Both tables are read in one pass from the (possibly compressed and
/// possibly relocated) blocks info section and are read-only afterwards.
#[derive(Debug)]
pub(crate) struct BlocksInfo {
    pub(crate) blocks: Vec<StorageBlock>,
    pub(crate) nodes: Vec<BundleNode>,
}

impl BlocksInfo {
    /// Locates, decompresses, and parses the blocks info section.
    ///
    /// On return the reader is positioned at the start of the block payload
    /// region: directly after the inline section, or at the saved position
    /// when the section is stored at the end of the file.
    pub(crate) fn read<R: Read + Seek>(
        reader: &mut R,
        header: &BundleHeader,
        compression: CompressionType,
    ) -> Result<Self, BundleError> {
        if header.version >= 7 {
            reader.align_to(16)?;
        }

        let compressed_size = header.compressed_blocks_info_size as usize;
        let info_bytes = if header.flags.contains(ArchiveFlags::BLOCKS_INFO_AT_END) {
            let position = reader.stream_position()?;
            let length = reader.seek(SeekFrom::End(0))?;
            let info_offset = length
                .checked_sub(u64::from(header.compressed_blocks_info_size))
                .ok_or_else(|| {
                    BundleError::TruncatedData("blocks info section larger than file".into())
                })?;
            reader.seek(SeekFrom::Start(info_offset))?;
            let bytes = reader.read_bytes(compressed_size)?;
            reader.seek(SeekFrom::Start(position))?;
            bytes
        } else {
            reader.read_bytes(compressed_size)?
        };

        let info_bytes =
            compression.decompress(&info_bytes, header.uncompressed_blocks_info_size as usize)?;

        Self::parse(&info_bytes)
    }

    /// Parses the decompressed blocks info bytes as an independent stream.
    fn parse(info_bytes: &[u8]) -> Result<Self, BundleError> {
        let mut info_reader = Cursor::new(info_bytes);

        // Content hash over the decompressed data; not validated here.
        let _hash = info_reader.read_bytes(16)?;

        let block_count = info_reader.read_i32::<BigEndian>()?;
        let block_count = usize::try_from(block_count)
            .map_err(|_| BundleError::DecodeFailure(format!("negative block count: {block_count}")))?;
        let mut blocks = Vec::with_capacity(block_count);
        let mut compressed_offset = 0u64;
        for _ in 0..block_count {
            let uncompressed_size = info_reader.read_u32::<BigEndian>()?;
            let compressed_size = info_reader.read_u32::<BigEndian>()?;
            let flags = info_reader.read_u16::<BigEndian>()?;
            blocks.push(StorageBlock {
                compressed_offset,
                compressed_size,
                uncompressed_size,
                flags,
            });
            compressed_offset += u64::from(compressed_size);
        }

        let node_count = info_reader.read_i32::<BigEndian>()?;
        let node_count = usize::try_from(node_count)
            .map_err(|_| BundleError::DecodeFailure(format!("negative node count: {node_count}")))?;
        let mut nodes = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            let offset = info_reader.read_i64::<BigEndian>()?;
            let size = info_reader.read_i64::<BigEndian>()?;
            let flags = info_reader.read_u32::<BigEndian>()?;
            let path = info_reader.read_cstring()?;
            nodes.push(BundleNode {
                offset,
                size,
                flags,
                path,
            });
        }

        debug!(
            blocks = blocks.len(),
            nodes = nodes.len(),
            "parsed blocks info"
        );

        Ok(BlocksInfo { blocks, nodes })
    }
}

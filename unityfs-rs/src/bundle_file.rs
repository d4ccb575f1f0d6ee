use crate::blocks_info::BlocksInfo;
use crate::bundle_header::BundleHeader;
use crate::bundle_node::BundleNode;
use crate::compression_type::CompressionType;
use crate::error::BundleError;
use crate::ext::io_ext::ReadExt;
use crate::storage_block::StorageBlock;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Represents an open bundle file, providing access to its directory and
/// the content of its entries.
///
/// `BundleFile` is the main entry point of this crate. It parses the bundle
/// header and the blocks/directory tables when opened, and reconstructs the
/// exact bytes of any named entry on demand. Entries rarely align with
/// storage block boundaries; reconstruction decompresses only the blocks an
/// entry touches, each in full exactly once.
///
/// # Usage
///
/// Typically you open a bundle from disk with [`BundleFile::open`], list the
/// directory via [`BundleFile::nodes`], and extract entry contents with
/// [`BundleFile::open_asset`].
///
/// ```no_run
/// use unityfs_rs::bundle_file::BundleFile;
///
/// let mut bundle = BundleFile::open("path/to/bundle.unity3d").unwrap();
///
/// for node in bundle.nodes() {
///     println!("Entry: {} ({} bytes)", node.path, node.size);
/// }
///
/// let path = bundle.nodes()[0].path.clone();
/// let bytes = bundle.open_asset(&path).unwrap();
/// assert_eq!(bytes.len() as i64, bundle.nodes()[0].size);
/// ```
///
/// # Concurrency
///
/// A `BundleFile` holds one reader with one cursor; every reconstruction
/// repositions it, so [`BundleFile::open_asset`] takes `&mut self` and calls
/// are serialized by the borrow checker. Use one bundle handle per worker
/// for parallel extraction.
///
/// # Lifecycle
///
/// The bundle is the sole owner of the reader and the parsed tables. They
/// are released together when the bundle is dropped, or earlier via
/// [`BundleFile::close`]; operations on a closed bundle fail with
/// [`BundleError::Closed`]. A decode failure during open drops the handle on
/// the way out, so no partially parsed bundle is ever observable.
#[derive(Debug)]
pub struct BundleFile<R: Read + Seek = File> {
    /// The parsed bundle header.
    pub header: BundleHeader,
    /// The blocks table, in file order.
    blocks: Vec<StorageBlock>,
    /// The directory, in table order.
    nodes: Vec<BundleNode>,
    /// The codec for the storage blocks, resolved once from the header flags.
    compression: CompressionType,
    /// Absolute offset of the first storage block's compressed bytes.
    data_offset: u64,
    /// The underlying reader; `None` once the bundle has been closed.
    reader: Option<R>,
}

impl BundleFile<File> {
    /// Opens a bundle from a file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read + Seek> BundleFile<R> {
    /// Opens a bundle from any seekable byte source positioned at the start
    /// of the file.
    ///
    /// A signature other than "UnityFS" is not an error: the bundle opens
    /// with an empty directory. Truncated or undecodable tables abort the
    /// open and nothing of the bundle is exposed.
    pub fn from_reader(mut reader: R) -> Result<Self, BundleError> {
        let header = BundleHeader::read(&mut reader)?;
        debug!(
            signature = %header.signature,
            version = header.version,
            "decoded bundle header"
        );

        if !header.is_unity_fs() {
            // Legacy signatures carry no blocks table and no directory.
            return Ok(BundleFile {
                header,
                blocks: Vec::new(),
                nodes: Vec::new(),
                compression: CompressionType::None,
                data_offset: 0,
                reader: Some(reader),
            });
        }

        let compression = CompressionType::from(header.flags.compression_code());
        let info = BlocksInfo::read(&mut reader, &header, compression)?;
        let data_offset = reader.stream_position()?;

        Ok(BundleFile {
            header,
            blocks: info.blocks,
            nodes: info.nodes,
            compression,
            data_offset,
            reader: Some(reader),
        })
    }

    /// The bundle's directory, in table order.
    ///
    /// Empty for bundles with an unsupported signature. Listing never fails
    /// once the bundle has been opened.
    pub fn nodes(&self) -> &[BundleNode] {
        &self.nodes
    }

    /// Reconstructs the full byte content of the node with the given path.
    ///
    /// Returns [`BundleError::FileNotFound`] when no node has that exact
    /// path; when paths are duplicated the first match wins. Failures are
    /// scoped to this call and leave the bundle usable.
    ///
    /// The walk skips blocks entirely before the node without decompressing
    /// them, then decompresses each covering block once and keeps only the
    /// covered slice, so memory is bounded by one block plus the output. The
    /// returned buffer's length always equals the node's recorded size; a
    /// blocks table that cannot cover the node is an error, never a short
    /// buffer.
    pub fn open_asset(&mut self, path: &str) -> Result<Vec<u8>, BundleError> {
        let reader = self.reader.as_mut().ok_or(BundleError::Closed)?;
        let node = self
            .nodes
            .iter()
            .find(|n| n.path == path)
            .ok_or_else(|| BundleError::FileNotFound(path.to_string()))?;

        if node.offset < 0 || node.size < 0 {
            return Err(BundleError::DecodeFailure(format!(
                "node {path} has negative extent: offset {}, size {}",
                node.offset, node.size
            )));
        }
        let offset = node.offset as u64;
        let size = node.size as u64;

        let mut buffer = Vec::new();
        let mut opened = false;
        // Logical bytes covered by all blocks walked so far, skipped or not.
        let mut consumed = 0u64;
        let mut written = 0u64;

        for block in &self.blocks {
            let block_size = u64::from(block.uncompressed_size);
            if !opened {
                if consumed + block_size < offset {
                    // Entirely before the node; skip without decompressing.
                    consumed += block_size;
                    continue;
                }
                buffer.reserve(size as usize);
                opened = true;
            }

            reader.seek(SeekFrom::Start(self.data_offset + block.compressed_offset))?;
            let compressed = reader.read_bytes(block.compressed_size as usize)?;
            let decompressed = self
                .compression
                .decompress(&compressed, block.uncompressed_size as usize)?;

            let begin = offset.saturating_sub(consumed) as usize;
            let available = decompressed.len().saturating_sub(begin);
            let take = available.min((size - written) as usize);
            let slice = decompressed.get(begin..begin + take).ok_or_else(|| {
                BundleError::DecodeFailure(format!(
                    "block at offset {} shorter than its recorded size",
                    block.compressed_offset
                ))
            })?;
            buffer.extend_from_slice(slice);
            written += take as u64;
            consumed += block_size;

            if written >= size {
                break;
            }
        }

        if written < size {
            return Err(BundleError::TruncatedData(format!(
                "blocks cover only {written} of {size} bytes for {path}"
            )));
        }

        debug!(path, bytes = buffer.len(), "reconstructed asset");
        Ok(buffer)
    }

    /// Releases the underlying reader and drops the parsed tables.
    ///
    /// Safe to call more than once. Subsequent [`BundleFile::open_asset`]
    /// calls fail with [`BundleError::Closed`]. Dropping the bundle has the
    /// same effect.
    pub fn close(&mut self) {
        self.reader = None;
        self.blocks = Vec::new();
        self.nodes = Vec::new();
    }
}

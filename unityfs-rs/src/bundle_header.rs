use crate::error::BundleError;
use crate::ext::io_ext::ReadExt;
use bitflags::bitflags;
use byteorder::{BigEndian, ReadBytesExt};
use std::io::Read;

/// The container signature this crate supports. Any other signature yields a
/// degenerate bundle with no blocks table and no directory.
pub const UNITY_FS_SIGNATURE: &str = "UnityFS";

bitflags! {
    /// Archive-level flags from the bundle header.
    ///
    /// The low six bits are not flags but a compression code; use
    /// [`ArchiveFlags::compression_code`] to extract it. Unknown bits are
    /// retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ArchiveFlags: u32 {
        /// The blocks table and directory are stored as one combined section.
        const BLOCKS_AND_DIRECTORY_COMBINED = 0x40;
        /// The combined blocks/directory section sits at the end of the file
        /// instead of inline after the header.
        const BLOCKS_INFO_AT_END = 0x80;
    }
}

impl ArchiveFlags {
    /// Mask for the compression code carried in the low six bits.
    pub const COMPRESSION_MASK: u32 = 0x3F;

    /// The compression code selecting how the blocks info section (and, in
    /// this design, the storage blocks) are compressed.
    pub fn compression_code(self) -> u32 {
        self.bits() & Self::COMPRESSION_MASK
    }
}

/// Represents the fixed-format header at the start of a bundle file.
///
/// Populated once when the bundle is opened and immutable thereafter. The
/// size and blocks info fields are only present in the file when the
/// signature matches [`UNITY_FS_SIGNATURE`]; for any other signature they are
/// left at zero.
#[derive(Debug, Clone)]
pub struct BundleHeader {
    /// The container signature string.
    pub signature: String,
    /// The container format version.
    pub version: u32,
    /// The engine version string that produced the bundle.
    pub unity_version: String,
    /// The engine revision string that produced the bundle.
    pub unity_revision: String,
    /// The total file size recorded in the header.
    pub size: i64,
    /// The stored (possibly compressed) size of the blocks info section.
    pub compressed_blocks_info_size: u32,
    /// The decompressed size of the blocks info section.
    pub uncompressed_blocks_info_size: u32,
    /// Archive flags, including the compression code in the low six bits.
    pub flags: ArchiveFlags,
}

impl BundleHeader {
    /// Reads the header from a reader positioned at the start of the file.
    ///
    /// All multi-byte integers are big-endian and all strings are
    /// null-terminated. No side effects beyond advancing the reader.
    pub(crate) fn read<R: Read>(reader: &mut R) -> Result<Self, BundleError> {
        let signature = reader.read_cstring()?;
        let version = reader.read_u32::<BigEndian>()?;
        let unity_version = reader.read_cstring()?;
        let unity_revision = reader.read_cstring()?;

        let mut header = BundleHeader {
            signature,
            version,
            unity_version,
            unity_revision,
            size: 0,
            compressed_blocks_info_size: 0,
            uncompressed_blocks_info_size: 0,
            flags: ArchiveFlags::empty(),
        };

        if header.is_unity_fs() {
            header.size = reader.read_i64::<BigEndian>()?;
            header.compressed_blocks_info_size = reader.read_u32::<BigEndian>()?;
            header.uncompressed_blocks_info_size = reader.read_u32::<BigEndian>()?;
            header.flags = ArchiveFlags::from_bits_retain(reader.read_u32::<BigEndian>()?);
        }

        Ok(header)
    }

    /// Whether the signature is the supported "UnityFS" container signature.
    pub fn is_unity_fs(&self) -> bool {
        self.signature == UNITY_FS_SIGNATURE
    }
}

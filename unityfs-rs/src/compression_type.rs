use crate::error::BundleError;

/// Represents the compression applied to the blocks info section and the
/// storage blocks.
///
/// Resolved once from the low six bits of the archive flags when the tables
/// are decoded; this crate treats the codec as file-global rather than
/// re-deriving it per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// Stored as-is, no compression.
    None,
    /// LZ4 block format.
    Lz4,
    /// LZ4HC. Same block format as LZ4, produced by a stronger encoder.
    Lz4hc,
    /// Unknown or unsupported code, stores the raw value.
    Unsupported(u32),
}

impl From<u32> for CompressionType {
    fn from(code: u32) -> Self {
        match code {
            0 | 1 => CompressionType::None,
            2 => CompressionType::Lz4,
            3 => CompressionType::Lz4hc,
            other => CompressionType::Unsupported(other),
        }
    }
}

impl CompressionType {
    /// Decompresses `data` into exactly `uncompressed_size` bytes.
    ///
    /// An unsupported code fails here rather than silently being treated as
    /// uncompressed, so a misparsed table can never be returned.
    pub(crate) fn decompress(
        self,
        data: &[u8],
        uncompressed_size: usize,
    ) -> Result<Vec<u8>, BundleError> {
        match self {
            CompressionType::None => Ok(data.to_vec()),
            CompressionType::Lz4 | CompressionType::Lz4hc => {
                let decoded = lz4_flex::block::decompress(data, uncompressed_size)
                    .map_err(|e| BundleError::DecodeFailure(format!("LZ4: {e}")))?;
                if decoded.len() != uncompressed_size {
                    return Err(BundleError::DecodeFailure(format!(
                        "LZ4 produced {} bytes, expected {uncompressed_size}",
                        decoded.len()
                    )));
                }
                Ok(decoded)
            }
            CompressionType::Unsupported(code) => Err(BundleError::UnsupportedCompression(code)),
        }
    }
}

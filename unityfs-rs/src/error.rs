/// Represents all possible errors that can occur while reading a bundle.
///
/// This enum is used throughout the crate to provide detailed error information for
/// operations that may fail, such as header decoding, table parsing, and entry
/// reconstruction.
#[derive(Debug)]
pub enum BundleError {
    /// Represents an error that occurs when a path is not present in the bundle directory.
    FileNotFound(String),
    /// Represents an error that occurs when the reader runs out of bytes mid-field.
    TruncatedData(String),
    /// Represents an error that occurs when decompression rejects its input or
    /// produces output of the wrong length.
    DecodeFailure(String),
    /// Represents an error that occurs when the archive flags carry a compression
    /// code this crate does not support. The raw code is stored.
    UnsupportedCompression(u32),
    /// Represents an error that occurs when an operation is attempted on a closed bundle.
    Closed,
    /// Represents an error that occurs during I/O operations.
    Io(std::io::Error),
}

/// Provides a user-friendly string representation for each error variant in `BundleError`.
impl std::fmt::Display for BundleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundleError::FileNotFound(path) => write!(f, "File not found in bundle: {path}"),
            BundleError::TruncatedData(what) => write!(f, "Truncated data: {what}"),
            BundleError::DecodeFailure(what) => write!(f, "Decode failure: {what}"),
            BundleError::UnsupportedCompression(code) => {
                write!(f, "Unsupported compression code: {code}")
            }
            BundleError::Closed => write!(f, "Bundle is closed"),
            BundleError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

/// Implements the standard error trait for `BundleError`, allowing it to be used with
/// error chaining and other error handling utilities.
impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BundleError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Allows automatic conversion from `std::io::Error` to `BundleError`.
///
/// Reads that hit end-of-stream mid-field map to `TruncatedData`; everything
/// else stays an `Io` error.
impl From<std::io::Error> for BundleError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::UnexpectedEof => BundleError::TruncatedData(error.to_string()),
            _ => BundleError::Io(error),
        }
    }
}

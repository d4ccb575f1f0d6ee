//! # unityfs-rs
//!
//! `unityfs-rs` is a pure Rust reader for Unity's "UnityFS" asset bundle
//! container format. It parses the bundle header and directory, and
//! reconstructs the exact bytes of any named entry even though entry
//! boundaries rarely align with the compressed storage blocks.
//!
//! ## Features
//! - Parse UnityFS headers and the (possibly compressed) blocks/directory tables
//! - List entries and their metadata
//! - Extract entry contents by path, decompressing only the blocks touched
//! - Supports uncompressed and LZ4/LZ4HC bundles
//!
//! ## Usage
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! unityfs-rs = "0.1"
//! ```
//!
//! ### Example: Listing and Extracting Entries
//! ```no_run
//! use unityfs_rs::bundle_file::BundleFile;
//!
//! // Open a bundle file
//! let mut bundle = BundleFile::open("path/to/bundle.unity3d").unwrap();
//!
//! // List all entries
//! for node in bundle.nodes() {
//!     println!("Entry: {} ({} bytes)", node.path, node.size);
//! }
//!
//! // Extract an entry by path
//! let bytes = bundle.open_asset("CAB-1234567890abcdef").unwrap();
//! std::fs::write("output.bin", bytes).unwrap();
//! ```

mod blocks_info;
pub mod bundle_file;
pub mod bundle_header;
pub mod bundle_node;
pub mod compression_type;
pub mod error;
mod ext;
pub mod storage_block;

//! blockrs
//!
//! Streaming fixed-size blocking for Rust.
//!
//! `blockrs` reslices a byte stream that arrives in chunks of any size into
//! blocks of exactly `block_size` bytes. A block is emitted as soon as enough
//! bytes have accumulated; at end of stream the short remainder is either
//! zero-padded to a full block or emitted as-is. No byte is ever dropped. It
//! is a small, composable primitive for:
//!
//! - block devices and block-oriented archive writers
//! - fixed-record transports
//! - feeding block ciphers or hashes that want aligned input
//!
//! The crate intentionally:
//! - does NOT frame blocks (no headers, no checksums in the output bytes)
//! - does NOT manage concurrency
//! - does NOT apply backpressure (the caller throttles)
//!
//! It only does one thing: **Bytes in → fixed-size blocks out**
//!
//! # Sync
//!
//! ```
//! use blockrs::{Blockifier, BlockConfig, BlockError};
//! use bytes::Bytes;
//!
//! fn main() -> Result<(), BlockError> {
//!     let mut blockifier = Blockifier::new(BlockConfig::new(16));
//!
//!     for chunk in [&b"seven b"[..], &b"thirteen byte"[..], &b"and twenty more byte"[..]] {
//!         for block in blockifier.push(Bytes::copy_from_slice(chunk))? {
//!             println!("block {} bytes @ {}", block.len(), block.offset);
//!         }
//!     }
//!     if let Some(last) = blockifier.finish()? {
//!         println!("final block, {} padding bytes", last.padding);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use blockrs::{block_async, BlockConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), blockrs::BlockError> {
//!     let mut stream = block_async(reader, BlockConfig::new(4096));
//!
//!     while let Some(block) = stream.next().await {
//!         let block = block?;
//!         println!("block {}", block.data.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod blockifier;
mod config;
mod error;

mod util; // internal fragment joining

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use block::{Block, BlockHash};
pub use blockifier::{BlockIter, BlockWriter, Blockifier, READ_SIZE};
pub use config::{BlockConfig, DEFAULT_BLOCK_SIZE, HashConfig};
pub use error::BlockError;

#[cfg(feature = "async-io")]
pub use async_stream::{BlockStream, block_async};

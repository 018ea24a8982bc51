//! Core blocking engine - Blockifier with streaming API.
//!
//! This module implements the synchronous blocking API. It provides a pure
//! streaming interface:
//!
//! - [`Blockifier`] - Stateful engine that reslices streaming bytes
//! - `push()` - Feed data in any size (1 byte, 8KB, 1MB, etc.)
//! - `finish()` - Flush the final, possibly padded, block when the stream ends
//!
//! # Example
//!
//! ```
//! use blockrs::{Blockifier, BlockConfig};
//! use bytes::Bytes;
//!
//! let mut blockifier = Blockifier::new(BlockConfig::new(16));
//!
//! // Feed data in any size
//! let blocks = blockifier.push(Bytes::from(vec![1u8; 20]))?;
//! assert_eq!(blocks.len(), 1);
//!
//! // When the stream ends, get the final block
//! let last = blockifier.finish()?.expect("four bytes were pending");
//! assert_eq!(last.len(), 16);
//! assert_eq!(last.padding, 12);
//! # Ok::<(), blockrs::BlockError>(())
//! ```

use std::collections::VecDeque;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::block::{Block, BlockHash};
use crate::config::BlockConfig;
use crate::error::BlockError;
use crate::util::concat_fragments;

/// A blockifier that reslices streaming byte data into fixed-size blocks.
///
/// `Blockifier` accepts bytes via `push()` and emits a block every time
/// `block_size` bytes have accumulated. Input is held as a queue of
/// fragments; a fragment that straddles a block boundary is split and its
/// tail stays at the front of the queue for the next block.
///
/// # Streaming API
///
/// - Call `push()` with data in any size (1 byte to megabytes)
/// - Each call returns every block completed by that data, in order
/// - Call `finish()` exactly once when the stream ends
///
/// # Determinism
///
/// Identical byte streams produce identical blocks, regardless of how many
/// bytes are pushed at once or how many `push()` calls are made.
///
/// # Zero-Copy
///
/// A block that lies inside a single pushed `Bytes` is a slice of it. Only
/// blocks that span several pushes are copied into a new buffer.
///
/// # Lifecycle
///
/// After `finish()` the instance is inert: a further `push()` returns
/// [`BlockError::PushAfterFinish`] and a further `finish()` returns
/// [`BlockError::AlreadyFinished`]. Neither alters state. Call `reset()` to
/// start a new stream.
#[derive(Debug)]
pub struct Blockifier {
    pending: VecDeque<Bytes>,
    buffered: usize,
    offset: u64,
    finished: bool,
    config: BlockConfig,
}

impl Blockifier {
    /// Creates a new blockifier with the given configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use blockrs::{Blockifier, BlockConfig};
    ///
    /// let blockifier = Blockifier::new(BlockConfig::default());
    /// assert_eq!(blockifier.config().block_size(), 512);
    /// ```
    pub fn new(config: BlockConfig) -> Self {
        Self {
            pending: VecDeque::new(),
            buffered: 0,
            offset: 0,
            finished: false,
            config,
        }
    }

    /// Computes hash for the given data if hashing is enabled.
    fn compute_hash(&self, data: &[u8]) -> Option<BlockHash> {
        if !self.config.hash_config().enabled {
            return None;
        }
        #[cfg(feature = "hash-blake3")]
        return Some(BlockHash::of(data));
        #[cfg(not(feature = "hash-blake3"))]
        {
            let _ = data;
            None
        }
    }

    /// Wraps `data` as the next block and advances the output offset.
    fn emit_block(&mut self, data: Bytes, padding: usize) -> Block {
        let hash = self.compute_hash(&data);
        let block = Block {
            offset: self.offset,
            padding,
            hash,
            data,
        };
        self.offset += block.len() as u64;
        block
    }

    /// Pushes data into the blockifier and returns the completed blocks.
    ///
    /// Empty input is a no-op. Blocks are returned in stream order; bytes
    /// that do not yet fill a block stay buffered.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::PushAfterFinish`] if the stream was already
    /// finished. The data is not buffered in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use blockrs::{Blockifier, BlockConfig};
    /// use bytes::Bytes;
    ///
    /// let mut blockifier = Blockifier::new(BlockConfig::new(4));
    ///
    /// let blocks = blockifier.push(Bytes::from_static(b"abc"))?;
    /// assert!(blocks.is_empty());
    ///
    /// let blocks = blockifier.push(Bytes::from_static(b"defghi"))?;
    /// assert_eq!(blocks.len(), 2);
    /// assert_eq!(&blocks[0].data[..], b"abcd");
    /// assert_eq!(&blocks[1].data[..], b"efgh");
    /// assert_eq!(blockifier.buffered_len(), 1);
    /// # Ok::<(), blockrs::BlockError>(())
    /// ```
    pub fn push(&mut self, data: Bytes) -> Result<Vec<Block>, BlockError> {
        let mut blocks = Vec::new();
        self.push_with(data, |block| blocks.push(block))?;
        Ok(blocks)
    }

    /// Pushes data and hands each completed block to `emit`.
    ///
    /// Same semantics as [`Blockifier::push`] without collecting the blocks
    /// into a `Vec`.
    pub fn push_with<F>(&mut self, data: Bytes, mut emit: F) -> Result<(), BlockError>
    where
        F: FnMut(Block),
    {
        if self.finished {
            warn!(len = data.len(), "push after finish rejected");
            return Err(BlockError::PushAfterFinish);
        }
        if data.is_empty() {
            return Ok(());
        }

        self.buffered += data.len();
        self.pending.push_back(data);

        let block_size = self.config.block_size();
        while self.buffered >= block_size {
            let data = self.take_block(block_size);
            self.buffered -= block_size;

            let block = self.emit_block(data, 0);
            trace!(offset = block.offset, len = block_size, "block emitted");
            emit(block);
        }

        Ok(())
    }

    /// Removes exactly `block_size` bytes from the front of the queue.
    ///
    /// Callers guarantee at least `block_size` bytes are buffered.
    fn take_block(&mut self, block_size: usize) -> Bytes {
        if let Some(front) = self.pending.front_mut() {
            if front.len() >= block_size {
                let block = front.split_to(block_size);
                if front.is_empty() {
                    self.pending.pop_front();
                }
                return block;
            }
        }

        let mut parts = Vec::new();
        let mut taken = 0;
        while taken < block_size {
            let Some(mut fragment) = self.pending.pop_front() else {
                break;
            };
            let needed = block_size - taken;
            if fragment.len() > needed {
                trace!(
                    needed,
                    remainder = fragment.len() - needed,
                    "splitting fragment at block boundary"
                );
                parts.push(fragment.split_to(needed));
                self.pending.push_front(fragment);
                taken += needed;
            } else {
                taken += fragment.len();
                parts.push(fragment);
            }
        }
        debug_assert_eq!(taken, block_size);

        concat_fragments(parts, block_size, 0)
    }

    /// Finalizes the stream and returns the final block if any.
    ///
    /// Call this method exactly once, when the input stream ends.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Block))` - Remaining bytes, zero-padded to `block_size`
    ///   when padding is enabled, otherwise as a short block
    /// - `Ok(None)` - No bytes were pending
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::AlreadyFinished`] on a second call.
    ///
    /// # Example
    ///
    /// ```
    /// use blockrs::{Blockifier, BlockConfig};
    /// use bytes::Bytes;
    ///
    /// let config = BlockConfig::new(8).with_zero_pad(false);
    /// let mut blockifier = Blockifier::new(config);
    ///
    /// blockifier.push(Bytes::from_static(b"abc"))?;
    /// let last = blockifier.finish()?.expect("three bytes were pending");
    /// assert_eq!(&last.data[..], b"abc");
    ///
    /// assert!(blockifier.finish().is_err());
    /// # Ok::<(), blockrs::BlockError>(())
    /// ```
    pub fn finish(&mut self) -> Result<Option<Block>, BlockError> {
        if self.finished {
            warn!("finish called on a finished stream");
            return Err(BlockError::AlreadyFinished);
        }
        self.finished = true;

        if self.buffered == 0 {
            debug!(total = self.offset, "stream finished on a block boundary");
            return Ok(None);
        }

        let len = self.buffered;
        let padding = if self.config.zero_pad() {
            self.config.block_size() - len
        } else {
            0
        };
        let data = concat_fragments(self.pending.drain(..), len, padding);
        self.buffered = 0;

        let block = self.emit_block(data, padding);
        debug!(
            offset = block.offset,
            len = block.len(),
            padding,
            total = self.offset,
            "final block emitted"
        );
        Ok(Some(block))
    }

    /// Resets the blockifier state for a new stream.
    ///
    /// Drops any pending bytes and clears the offset and finished flag.
    ///
    /// # Example
    ///
    /// ```
    /// use blockrs::{Blockifier, BlockConfig};
    /// use bytes::Bytes;
    ///
    /// let mut blockifier = Blockifier::new(BlockConfig::new(4));
    /// blockifier.push(Bytes::from_static(b"first"))?;
    /// blockifier.finish()?;
    ///
    /// blockifier.reset();
    /// let blocks = blockifier.push(Bytes::from_static(b"second"))?;
    /// assert_eq!(blocks[0].offset, 0);
    /// # Ok::<(), blockrs::BlockError>(())
    /// ```
    pub fn reset(&mut self) {
        debug!(
            dropped = self.buffered,
            emitted = self.offset,
            "blockifier reset"
        );
        self.pending.clear();
        self.buffered = 0;
        self.offset = 0;
        self.finished = false;
    }

    /// Returns the number of bytes emitted so far, padding included.
    ///
    /// This is the offset of the next block to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes buffered and not yet emitted.
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// Returns true once `finish()` has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the configuration used by this blockifier.
    pub fn config(&self) -> &BlockConfig {
        &self.config
    }
}

impl Default for Blockifier {
    fn default() -> Self {
        Self::new(BlockConfig::default())
    }
}

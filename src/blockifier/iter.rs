//! Pull adapter - BlockIter over a [`std::io::Read`] source.
//!
//! # Example
//!
//! ```no_run
//! use blockrs::{Blockifier, BlockConfig};
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let blockifier = Blockifier::new(BlockConfig::new(4096));
//!
//! for block in blockifier.blocks(file) {
//!     let block = block?;
//!     println!("Block: {} bytes @ {}", block.len(), block.offset);
//! }
//! # Ok::<(), blockrs::BlockError>(())
//! ```

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use bytes::Bytes;

use super::Blockifier;
use crate::block::Block;
use crate::error::BlockError;

/// Size of each read issued against the source.
pub const READ_SIZE: usize = 8 * 1024;

impl Blockifier {
    /// Creates a blocking iterator from a reader.
    ///
    /// The iterator lazily reads from the reader, pushes every read into this
    /// blockifier, and finishes the stream at end-of-file.
    ///
    /// # Example
    ///
    /// ```
    /// use blockrs::{Blockifier, BlockConfig};
    /// use std::io::Cursor;
    ///
    /// let data = vec![1u8; 40];
    /// let blockifier = Blockifier::new(BlockConfig::new(16));
    /// let blocks: Vec<_> = blockifier
    ///     .blocks(Cursor::new(data))
    ///     .collect::<Result<_, _>>()?;
    ///
    /// assert_eq!(blocks.len(), 3);
    /// assert!(blocks.iter().all(|b| b.len() == 16));
    /// # Ok::<(), blockrs::BlockError>(())
    /// ```
    pub fn blocks<R: Read>(self, reader: R) -> BlockIter<R> {
        BlockIter::new(reader, self)
    }
}

/// An iterator that yields blocks from a reader.
///
/// Reads are issued [`READ_SIZE`] bytes at a time. Blocks produced by one
/// read are queued and handed out one per `next()` call. An I/O error is
/// yielded once and ends the iteration.
pub struct BlockIter<R> {
    reader: R,
    blockifier: Blockifier,
    ready: VecDeque<Block>,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: Read> BlockIter<R> {
    fn new(reader: R, blockifier: Blockifier) -> Self {
        Self {
            reader,
            blockifier,
            ready: VecDeque::new(),
            buffer: vec![0u8; READ_SIZE],
            done: false,
        }
    }

    /// Reads once from the source and pushes the bytes, or finishes the
    /// stream on end-of-file.
    fn fill(&mut self) -> Result<(), BlockError> {
        let n = loop {
            match self.reader.read(&mut self.buffer) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if n == 0 {
            self.done = true;
            self.ready.extend(self.blockifier.finish()?);
            return Ok(());
        }

        let ready = &mut self.ready;
        self.blockifier
            .push_with(Bytes::copy_from_slice(&self.buffer[..n]), |block| {
                ready.push_back(block)
            })
    }

    /// Returns the blockifier driving this iterator.
    pub fn blockifier(&self) -> &Blockifier {
        &self.blockifier
    }
}

impl<R: Read> Iterator for BlockIter<R> {
    type Item = Result<Block, BlockError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(block) = self.ready.pop_front() {
                return Some(Ok(block));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fill() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

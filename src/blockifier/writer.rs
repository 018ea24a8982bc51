//! Push adapter - BlockWriter in front of a [`std::io::Write`] sink.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Write};

use bytes::{Buf, Bytes};
use tracing::{debug, warn};

use super::Blockifier;
use crate::config::BlockConfig;
use crate::error::BlockError;

/// A writer that reblocks everything written to it.
///
/// Bytes written to a `BlockWriter` reach the inner writer only as whole
/// blocks, in order. Bytes short of a block stay buffered until more data
/// arrives or [`BlockWriter::finish`] is called. `flush()` flushes the inner
/// writer but never emits a partial block.
///
/// Blocks that the inner writer has not yet accepted are queued and retried
/// first by the next `write`, `flush` or `finish`, so a failing inner writer
/// never loses bytes. An `Err` from `write` means none of that call's bytes
/// were accepted.
///
/// # Example
///
/// ```
/// use blockrs::{BlockConfig, BlockWriter};
/// use std::io::Write;
///
/// let mut writer = BlockWriter::new(Vec::new(), BlockConfig::new(4));
/// writer.write_all(b"hello")?;
/// assert_eq!(writer.get_ref().as_slice(), b"hell");
///
/// let out = writer.finish()?;
/// assert_eq!(out, b"hello\0\0\0");
/// # Ok::<(), blockrs::BlockError>(())
/// ```
#[derive(Debug)]
pub struct BlockWriter<W: Write> {
    inner: W,
    blockifier: Blockifier,
    unwritten: VecDeque<Bytes>,
    blocks_written: u64,
}

impl<W: Write> BlockWriter<W> {
    /// Creates a block writer in front of `inner`.
    pub fn new(inner: W, config: BlockConfig) -> Self {
        Self {
            inner,
            blockifier: Blockifier::new(config),
            unwritten: VecDeque::new(),
            blocks_written: 0,
        }
    }

    /// Writes queued blocks to the inner writer, front first.
    ///
    /// A short write advances the front block, so a retry resumes where the
    /// inner writer stopped.
    fn write_unwritten(&mut self) -> io::Result<()> {
        while let Some(front) = self.unwritten.front_mut() {
            match self.inner.write(front) {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::WriteZero,
                        "inner writer accepted no bytes of a block",
                    ));
                }
                Ok(n) => {
                    front.advance(n);
                    if front.is_empty() {
                        self.unwritten.pop_front();
                        self.blocks_written += 1;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Writes the final block, flushes, and returns the inner writer.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Io`] if the inner writer fails.
    pub fn finish(mut self) -> Result<W, BlockError> {
        self.write_unwritten()?;
        if let Some(block) = self.blockifier.finish()? {
            self.unwritten.push_back(block.into_data());
            self.write_unwritten()?;
        }
        self.inner.flush()?;
        debug!(
            blocks = self.blocks_written,
            bytes = self.blockifier.offset(),
            "block writer finished"
        );
        Ok(self.inner)
    }

    /// Returns the number of blocks fully written to the inner writer.
    pub fn blocks_written(&self) -> u64 {
        self.blocks_written
    }

    /// Returns the number of accepted bytes not yet written to the inner
    /// writer: bytes waiting for a full block plus queued blocks.
    pub fn buffered_len(&self) -> usize {
        let queued: usize = self.unwritten.iter().map(Bytes::len).sum();
        self.blockifier.buffered_len() + queued
    }

    /// Returns a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

impl<W: Write> Write for BlockWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Earlier blocks go first; failing here rejects `buf` untouched
        self.write_unwritten()?;

        let unwritten = &mut self.unwritten;
        self.blockifier
            .push_with(Bytes::copy_from_slice(buf), |block| {
                unwritten.push_back(block.into_data())
            })?;

        // `buf` is accepted now; a failure stays queued for the next call
        if let Err(e) = self.write_unwritten() {
            warn!(
                %e,
                queued = self.unwritten.len(),
                "inner writer failed, blocks queued for retry"
            );
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_unwritten()?;
        self.inner.flush()
    }
}

//! Async stream adapter for blocking.
//!
//! # Example
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
//!         println!("Block: {} bytes", block.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::block::Block;
use crate::blockifier::{Blockifier, READ_SIZE};
use crate::config::BlockConfig;
use crate::error::BlockError;

pin_project! {
    /// A stream that yields blocks from an async reader.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic.
    /// Works with tokio, async-std, smol, or any futures-compatible runtime.
    pub struct BlockStream<R> {
        #[pin]
        reader: R,
        blockifier: Blockifier,
        ready: VecDeque<Block>,
        buffer: Vec<u8>,
        done: bool,
    }
}

impl<R> BlockStream<R> {
    /// Creates a new block stream from an async reader.
    pub fn new(reader: R, config: BlockConfig) -> Self {
        Self {
            reader,
            blockifier: Blockifier::new(config),
            ready: VecDeque::new(),
            buffer: vec![0u8; READ_SIZE],
            done: false,
        }
    }
}

impl<R: AsyncRead> Stream for BlockStream<R> {
    type Item = Result<Block, BlockError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(block) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(block)));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            let n = match this.reader.as_mut().poll_read(cx, &mut this.buffer[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(BlockError::Io(e))));
                }
                Poll::Ready(Ok(n)) => n,
            };

            let pushed = if n == 0 {
                *this.done = true;
                this.blockifier.finish().map(|last| this.ready.extend(last))
            } else {
                let ready = &mut *this.ready;
                this.blockifier
                    .push_with(Bytes::copy_from_slice(&this.buffer[..n]), |block| {
                        ready.push_back(block)
                    })
            };

            if let Err(e) = pushed {
                *this.done = true;
                return Poll::Ready(Some(Err(e)));
            }
        }
    }
}

/// Creates a block stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use blockrs::{block_async, BlockConfig};
///
/// let tokio_reader = tokio::fs::File::open("file").await?;
/// let stream = block_async(tokio_reader.compat(), BlockConfig::default());
/// ```
pub fn block_async<R: AsyncRead>(reader: R, config: BlockConfig) -> BlockStream<R> {
    BlockStream::new(reader, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use std::io;

    /// Async reader that fails with `Interrupted` on every other poll.
    struct Stuttering {
        data: Vec<u8>,
        pos: usize,
        interrupt: bool,
    }

    impl AsyncRead for Stuttering {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut [u8],
        ) -> Poll<io::Result<usize>> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Poll::Ready(Err(io::Error::new(io::ErrorKind::Interrupted, "signal")));
            }
            let n = 7.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Poll::Ready(Ok(n))
        }
    }

    #[tokio::test]
    async fn test_block_stream_empty() {
        let reader: &[u8] = &[];
        let blocks: Vec<_> = block_async(reader, BlockConfig::new(16)).collect().await;
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn test_block_stream_pads_final_block() {
        let data: Vec<u8> = (0..40).collect();
        let reader: &[u8] = &data;

        let blocks: Vec<_> = block_async(reader, BlockConfig::new(16)).collect().await;
        let blocks = blocks.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(&blocks[2].data[..8], &data[32..]);
        assert_eq!(&blocks[2].data[8..], &[0u8; 8]);
        assert_eq!(blocks[2].offset, 32);
    }

    #[tokio::test]
    async fn test_block_stream_no_padding() {
        let data = vec![0xEEu8; 100];
        let reader: &[u8] = &data;
        let config = BlockConfig::new(32).with_zero_pad(false);

        let blocks: Vec<_> = block_async(reader, config).collect().await;
        let blocks = blocks.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        let total: usize = blocks.iter().map(Block::len).sum();
        assert_eq!(total, 100);
        assert_eq!(blocks.last().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_block_stream_retries_interrupted() {
        let data: Vec<u8> = (0..90).collect();
        let config = BlockConfig::new(16);

        let plain: &[u8] = &data;
        let expected: Vec<_> = block_async(plain, config).collect().await;
        let expected = expected.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        let reader = Stuttering {
            data: data.clone(),
            pos: 0,
            interrupt: false,
        };
        let got: Vec<_> = block_async(reader, config).collect().await;
        assert!(got.iter().all(Result::is_ok), "Interrupted must be retried");
        let got = got.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(got, expected);
        assert_eq!(got.len(), 6);
        assert_eq!(got[5].padding, 6);
    }
}

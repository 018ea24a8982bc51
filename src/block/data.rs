//! The Block type - one fixed-size unit of output.

use bytes::Bytes;
use std::fmt;
use std::ops::Range;

use super::BlockHash;

/// A block emitted by a [`Blockifier`](crate::Blockifier).
///
/// Every block is exactly `block_size` bytes long, except a final block
/// emitted without zero-padding, which holds the short remainder of the
/// stream.
///
/// # Example
///
/// ```
/// use blockrs::{Blockifier, BlockConfig};
/// use bytes::Bytes;
///
/// let mut blockifier = Blockifier::new(BlockConfig::new(4));
/// blockifier.push(Bytes::from_static(b"abcdef"))?;
///
/// let last = blockifier.finish()?.expect("two bytes were buffered");
/// assert_eq!(&last.data[..], b"ef\0\0");
/// assert_eq!(last.offset, 4);
/// assert_eq!(last.padding, 2);
/// assert_eq!(&last.payload()[..], b"ef");
/// # Ok::<(), blockrs::BlockError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block bytes, padding included.
    pub data: Bytes,

    /// Offset of the first byte of this block in the output stream.
    pub offset: u64,

    /// Number of trailing zero bytes added by padding. Only the final block
    /// of a zero-padded stream can have a non-zero value.
    pub padding: usize,

    /// The content hash of this block (if computed).
    pub hash: Option<BlockHash>,
}

impl Block {
    /// Returns the length of the block, padding included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the block ends with padding bytes.
    pub fn is_padded(&self) -> bool {
        self.padding > 0
    }

    /// Returns the bytes that came from the input, without padding.
    ///
    /// A `padding` larger than the block yields an empty payload.
    pub fn payload(&self) -> Bytes {
        self.data.slice(..self.data.len().saturating_sub(self.padding))
    }

    /// Returns the byte range this block occupies in the output stream.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.offset + self.data.len() as u64
    }

    /// Consumes the block and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({} bytes @ {}", self.len(), self.offset)?;
        if self.padding > 0 {
            write!(f, ", {} padding", self.padding)?;
        }
        if let Some(hash) = self.hash {
            write!(f, ", hash={}", hash)?;
        }
        write!(f, ")")
    }
}

//! Configuration for blocking behavior.
//!
//! This module provides types to configure how a stream is cut into blocks:
//!
//! - [`BlockConfig`] - Controls block size, final-block padding, and hashing
//! - [`HashConfig`] - Specifies whether to compute per-block content hashes
//!
//! # Example
//!
//! ```
//! use blockrs::{BlockConfig, HashConfig};
//!
//! // 4 KiB blocks, keep a short final block as-is
//! let config = BlockConfig::new(4096).with_zero_pad(false);
//!
//! // Strict construction rejects a zero block size
//! assert!(BlockConfig::try_new(0).is_err());
//!
//! // Attach a BLAKE3 digest to every block
//! let config = BlockConfig::default()
//!     .with_hash_config(HashConfig::enabled());
//! ```

use crate::error::BlockError;

/// Default block size (512 bytes).
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Configuration for fixed-size blocking.
///
/// `BlockConfig` is fixed for the lifetime of one
/// [`Blockifier`](crate::Blockifier):
///
/// - Block size (`block_size`) - Bytes per emitted block, always non-zero
/// - Zero-padding (`zero_pad`) - Whether a short final block is padded with
///   zero bytes up to `block_size`
/// - Hashing (`hash_config`) - Whether each block carries a content digest
///
/// A block size of zero is normalized to [`DEFAULT_BLOCK_SIZE`] by
/// [`BlockConfig::new`] and [`BlockConfig::with_block_size`]. Use
/// [`BlockConfig::try_new`] to reject it instead.
///
/// # Example
///
/// ```
/// use blockrs::BlockConfig;
///
/// let config = BlockConfig::default();
/// assert_eq!(config.block_size(), 512);
/// assert!(config.zero_pad());
///
/// let config = BlockConfig::new(0);
/// assert_eq!(config.block_size(), 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockConfig {
    /// Bytes per block, never zero.
    block_size: usize,

    /// Pad a short final block with zeros.
    zero_pad: bool,

    /// Configuration for hashing behavior.
    hash_config: HashConfig,
}

impl BlockConfig {
    /// Creates a configuration with the given block size and zero-padding
    /// enabled.
    ///
    /// A `block_size` of zero is normalized to [`DEFAULT_BLOCK_SIZE`].
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: normalize(block_size),
            zero_pad: true,
            hash_config: HashConfig::default(),
        }
    }

    /// Creates a configuration, rejecting a zero block size.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::InvalidConfig`] if `block_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use blockrs::BlockConfig;
    ///
    /// let config = BlockConfig::try_new(16)?;
    /// assert_eq!(config.block_size(), 16);
    /// # Ok::<(), blockrs::BlockError>(())
    /// ```
    pub fn try_new(block_size: usize) -> Result<Self, BlockError> {
        if block_size == 0 {
            return Err(BlockError::InvalidConfig {
                message: "block size must be non-zero",
            });
        }
        Ok(Self::new(block_size))
    }

    /// Sets the block size. Zero is normalized to [`DEFAULT_BLOCK_SIZE`].
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = normalize(size);
        self
    }

    /// Sets whether a short final block is zero-padded.
    ///
    /// # Example
    ///
    /// ```
    /// use blockrs::BlockConfig;
    ///
    /// let config = BlockConfig::new(16).with_zero_pad(false);
    /// assert!(!config.zero_pad());
    /// ```
    pub fn with_zero_pad(mut self, zero_pad: bool) -> Self {
        self.zero_pad = zero_pad;
        self
    }

    /// Sets the hash configuration.
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the block size in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns whether a short final block is zero-padded.
    pub fn zero_pad(&self) -> bool {
        self.zero_pad
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

fn normalize(block_size: usize) -> usize {
    if block_size == 0 {
        DEFAULT_BLOCK_SIZE
    } else {
        block_size
    }
}

/// Configuration for block hashing behavior.
///
/// `HashConfig` controls whether a BLAKE3 digest is computed for each block.
/// The digest is metadata on [`Block`](crate::Block); it is never written
/// into the block bytes. Hashing is disabled by default and has no effect
/// unless the `hash-blake3` feature is enabled.
///
/// # Example
///
/// ```
/// use blockrs::HashConfig;
///
/// let config = HashConfig::enabled();
/// assert!(config.enabled);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HashConfig {
    /// Whether to compute BLAKE3 hashes for blocks.
    pub enabled: bool,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables hashing.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}

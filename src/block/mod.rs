//! Block types.
//!
//! - [`Block`] - Fixed-size output unit with data, offset, padding, hash
//! - [`BlockHash`] - 32-byte content digest

mod data;
mod hash;

pub use data::Block;
pub use hash::BlockHash;

//! Blocking engine for processing byte streams.
//!
//! - [`Blockifier`] - Stateful engine with `push()`/`finish()` API
//! - [`BlockIter`] - Iterator over blocks read from a [`std::io::Read`]
//! - [`BlockWriter`] - [`std::io::Write`] adapter that writes whole blocks

mod engine;
mod iter;
mod writer;

pub use engine::Blockifier;
pub use iter::{BlockIter, READ_SIZE};
pub use writer::BlockWriter;

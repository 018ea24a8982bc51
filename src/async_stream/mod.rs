//! Async streaming support for blocking.
//!
//! This module provides asynchronous blocking using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - [`block_async`] - Creates an async stream of blocks from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{BlockStream, block_async};

//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

use bytes::{BufMut, Bytes, BytesMut};

/// Joins fragments in order and appends `padding` zero bytes.
///
/// A single fragment with no padding is returned as-is, so a block cut from
/// one input chunk stays a zero-copy slice of it.
pub(crate) fn concat_fragments<I>(fragments: I, len: usize, padding: usize) -> Bytes
where
    I: IntoIterator<Item = Bytes>,
{
    let mut fragments = fragments.into_iter();
    let Some(first) = fragments.next() else {
        return Bytes::from(vec![0u8; padding]);
    };

    let mut fragments = fragments.peekable();
    if fragments.peek().is_none() && padding == 0 {
        return first;
    }

    let mut combined = BytesMut::with_capacity(len + padding);
    combined.extend_from_slice(&first);
    for fragment in fragments {
        combined.extend_from_slice(&fragment);
    }
    combined.put_bytes(0, padding);
    combined.freeze()
}

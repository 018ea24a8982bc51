// Integration tests for the Blockifier streaming API
// Tests cover: push/finish semantics, padding policy, offsets, misuse, edge cases

use bytes::Bytes;
use blockrs::{Block, BlockConfig, BlockError, Blockifier};

fn sequential(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Pushes `data` split at the given chunk sizes, then finishes.
fn run(config: BlockConfig, data: &[u8], sizes: &[usize]) -> (Vec<Block>, Option<Block>) {
    let mut blockifier = Blockifier::new(config);
    let mut blocks = Vec::new();
    let mut rest = data;
    for &size in sizes {
        let (head, tail) = rest.split_at(size);
        blocks.extend(blockifier.push(Bytes::copy_from_slice(head)).unwrap());
        rest = tail;
    }
    assert!(rest.is_empty(), "chunk sizes must cover the input");
    let last = blockifier.finish().unwrap();
    (blocks, last)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_padded_scenario_7_13_20() {
    let data = sequential(40);
    let (blocks, last) = run(BlockConfig::new(16), &data, &[7, 13, 20]);

    assert_eq!(blocks.len(), 2, "two full blocks during push");
    assert_eq!(&blocks[0].data[..], &data[0..16]);
    assert_eq!(&blocks[1].data[..], &data[16..32]);

    let last = last.expect("finish should emit the padded remainder");
    assert_eq!(last.len(), 16);
    assert_eq!(&last.data[..8], &data[32..40]);
    assert_eq!(&last.data[8..], &[0u8; 8]);
    assert_eq!(last.padding, 8);
    assert_eq!(last.offset, 32);
}

#[test]
fn test_unpadded_scenario_7_13_20() {
    let data = sequential(40);
    let config = BlockConfig::new(16).with_zero_pad(false);
    let (blocks, last) = run(config, &data, &[7, 13, 20]);

    assert_eq!(blocks.len(), 2);
    let last = last.expect("finish should emit the short remainder");
    assert_eq!(&last.data[..], &data[32..40]);
    assert_eq!(last.padding, 0);
}

#[test]
fn test_exact_multiple_emits_nothing_on_finish() {
    let data = sequential(32);
    for zero_pad in [true, false] {
        let config = BlockConfig::new(16).with_zero_pad(zero_pad);
        let (blocks, last) = run(config, &data, &[10, 22]);

        assert_eq!(blocks.len(), 2);
        assert!(last.is_none(), "zero_pad={} should emit no final block", zero_pad);
    }
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_empty_input() {
    let mut blockifier = Blockifier::default();
    let blocks = blockifier.push(Bytes::new()).unwrap();

    assert!(blocks.is_empty(), "Empty input should produce no blocks");
    assert_eq!(blockifier.buffered_len(), 0);
    assert!(
        blockifier.finish().unwrap().is_none(),
        "finish() with nothing buffered should return None"
    );
}

#[test]
fn test_single_chunk_equal_to_block_size() {
    let mut blockifier = Blockifier::new(BlockConfig::new(16));
    let blocks = blockifier.push(Bytes::from(sequential(16))).unwrap();

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].len(), 16);
    assert_eq!(blockifier.buffered_len(), 0);
}

#[test]
fn test_one_chunk_many_blocks() {
    let mut blockifier = Blockifier::new(BlockConfig::new(16));
    let blocks = blockifier.push(Bytes::from(sequential(16 * 5 + 3))).unwrap();

    assert_eq!(blocks.len(), 5);
    assert_eq!(blockifier.buffered_len(), 3);
}

#[test]
fn test_block_size_one() {
    let data = b"abc";
    let (blocks, last) = run(BlockConfig::new(1), data, &[3]);
    assert_eq!(blocks.len(), 3);
    assert!(last.is_none());
}

#[test]
fn test_default_block_size_is_512() {
    let mut blockifier = Blockifier::new(BlockConfig::new(0));
    blockifier.push(Bytes::from(vec![1u8; 100])).unwrap();

    let last = blockifier.finish().unwrap().unwrap();
    assert_eq!(last.len(), 512);
    assert_eq!(last.padding, 412);
}

// ============================================================================
// Offsets
// ============================================================================

#[test]
fn test_block_offsets_are_contiguous() {
    let data = sequential(1000);
    let (blocks, last) = run(BlockConfig::new(64), &data, &[1, 99, 400, 500]);

    let mut expected_offset = 0u64;
    for block in blocks.iter().chain(last.iter()) {
        assert_eq!(block.offset, expected_offset);
        expected_offset += block.len() as u64;
    }
    assert_eq!(expected_offset, 1024, "1000 bytes padded to 16 blocks of 64");
}

#[test]
fn test_offset_restarts_after_reset() {
    let mut blockifier = Blockifier::new(BlockConfig::new(4));
    blockifier.push(Bytes::from_static(b"abcdef")).unwrap();
    blockifier.finish().unwrap();
    assert_eq!(blockifier.offset(), 8);

    blockifier.reset();
    assert!(!blockifier.is_finished());
    let blocks = blockifier.push(Bytes::from_static(b"wxyz")).unwrap();
    assert_eq!(blocks[0].offset, 0);
}

// ============================================================================
// Misuse
// ============================================================================

#[test]
fn test_push_after_finish_is_rejected() {
    let mut blockifier = Blockifier::new(BlockConfig::new(8));
    blockifier.push(Bytes::from_static(b"abc")).unwrap();
    blockifier.finish().unwrap();

    let err = blockifier.push(Bytes::from_static(b"more")).unwrap_err();
    assert!(matches!(err, BlockError::PushAfterFinish));
    assert!(err.is_misuse());
    assert_eq!(blockifier.buffered_len(), 0);
}

#[test]
fn test_empty_push_after_finish_is_rejected() {
    let mut blockifier = Blockifier::new(BlockConfig::new(8));
    blockifier.finish().unwrap();
    assert!(blockifier.push(Bytes::new()).is_err());
}

#[test]
fn test_double_finish_is_rejected() {
    let mut blockifier = Blockifier::new(BlockConfig::new(8));
    blockifier.push(Bytes::from_static(b"abc")).unwrap();

    assert!(blockifier.finish().unwrap().is_some());
    let err = blockifier.finish().unwrap_err();
    assert!(matches!(err, BlockError::AlreadyFinished));
    assert_eq!(blockifier.offset(), 8, "rejected finish must not emit");
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_giant_chunk_matches_single_bytes() {
    let data = sequential(333);
    let config = BlockConfig::new(32);

    let (bulk, bulk_last) = run(config, &data, &[333]);
    let ones = vec![1usize; 333];
    let (bytewise, bytewise_last) = run(config, &data, &ones);

    assert_eq!(bulk, bytewise);
    assert_eq!(bulk_last, bytewise_last);
}

#[test]
fn test_output_concatenation_preserves_input() {
    let data = sequential(250);
    let config = BlockConfig::new(24).with_zero_pad(false);
    let (blocks, last) = run(config, &data, &[5, 50, 1, 94, 100]);

    let combined: Vec<u8> = blocks
        .iter()
        .chain(last.iter())
        .flat_map(|b| b.data.to_vec())
        .collect();
    assert_eq!(combined, data, "Data content must be preserved");
}

// ============================================================================
// Hashing
// ============================================================================

#[cfg(feature = "hash-blake3")]
mod hashing_tests {
    use super::*;
    use blockrs::{BlockHash, HashConfig};

    #[test]
    fn test_hashing_disabled_by_default() {
        let (blocks, last) = run(BlockConfig::new(8), &sequential(20), &[20]);
        assert!(blocks.iter().chain(last.iter()).all(|b| b.hash.is_none()));
    }

    #[test]
    fn test_hash_covers_padding() {
        let config = BlockConfig::new(8).with_hash_config(HashConfig::enabled());
        let (blocks, last) = run(config, &sequential(12), &[12]);

        assert_eq!(blocks[0].hash, Some(BlockHash::of(&sequential(8))));
        let last = last.unwrap();
        assert_eq!(last.hash, Some(BlockHash::of(&last.data)));
    }

    #[test]
    fn test_hash_independent_of_segmentation() {
        let config = BlockConfig::new(16).with_hash_config(HashConfig::enabled());
        let data = sequential(100);
        let (a, a_last) = run(config, &data, &[100]);
        let (b, b_last) = run(config, &data, &[3, 30, 67]);

        let hashes = |blocks: &[Block], last: &Option<Block>| -> Vec<_> {
            blocks.iter().chain(last.iter()).map(|b| b.hash).collect()
        };
        assert_eq!(hashes(&a, &a_last), hashes(&b, &b_last));
    }
}

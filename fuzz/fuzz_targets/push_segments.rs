#![no_main]

use blockrs::{BlockConfig, Blockifier};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u16, bool, Vec<u8>, Vec<u8>)| {
    let (block_size, zero_pad, cuts, data) = input;
    let config = BlockConfig::new(block_size as usize).with_zero_pad(zero_pad);
    let block_size = config.block_size();

    // Segment the input at fuzzer-chosen lengths
    let mut blockifier = Blockifier::new(config);
    let mut blocks = Vec::new();
    let mut rest = &data[..];
    for cut in cuts {
        let n = (cut as usize).min(rest.len());
        let (head, tail) = rest.split_at(n);
        blocks.extend(blockifier.push(Bytes::copy_from_slice(head)).unwrap());
        rest = tail;
    }
    blocks.extend(blockifier.push(Bytes::copy_from_slice(rest)).unwrap());
    blocks.extend(blockifier.finish().unwrap());

    // Verify: every block but an unpadded last one is full size
    for (i, block) in blocks.iter().enumerate() {
        if i + 1 < blocks.len() || zero_pad {
            assert_eq!(block.len(), block_size);
        } else {
            assert!(block.len() <= block_size);
        }
    }

    // Verify: output is the input followed by zeros
    let output: Vec<u8> = blocks.iter().flat_map(|b| b.data.to_vec()).collect();
    assert_eq!(&output[..data.len()], &data[..]);
    assert!(output[data.len()..].iter().all(|&b| b == 0));
    if !zero_pad {
        assert_eq!(output.len(), data.len());
    }

    // Verify: offsets are contiguous
    let mut expected_offset = 0u64;
    for block in &blocks {
        assert_eq!(block.offset, expected_offset);
        expected_offset += block.len() as u64;
    }

    // Verify: determinism against a single push
    let mut whole = Blockifier::new(config);
    let mut blocks2 = whole.push(Bytes::from(data.clone())).unwrap();
    blocks2.extend(whole.finish().unwrap());
    assert_eq!(blocks, blocks2);

    // Verify: misuse after finish is rejected
    assert!(whole.finish().is_err());
    assert!(whole.push(Bytes::from(data)).is_err());
});

#![no_main]

use std::io::Write;

use blockrs::{BlockConfig, BlockWriter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, Vec<Vec<u8>>)| {
    let (block_size, writes) = input;
    let config = BlockConfig::new(block_size as usize);
    let block_size = config.block_size();

    let mut writer = BlockWriter::new(Vec::new(), config);
    let mut expected = Vec::new();
    for buf in &writes {
        writer.write_all(buf).unwrap();
        expected.extend_from_slice(buf);

        // Verify: only whole blocks reach the inner writer
        assert_eq!(writer.get_ref().len() % block_size, 0);
        assert_eq!(writer.get_ref().len() + writer.buffered_len(), expected.len());
    }

    let out = writer.finish().unwrap();
    assert_eq!(out.len() % block_size, 0);
    assert_eq!(&out[..expected.len()], &expected[..]);
});

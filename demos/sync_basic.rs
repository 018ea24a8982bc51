//! Basic synchronous blocking example with the streaming API.
//!
//! Run with:
//!     cargo run --example sync_basic

use bytes::Bytes;
use blockrs::{BlockConfig, Blockifier};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 40 bytes of sequential values, arriving in uneven pieces
    let data: Vec<u8> = (0..40).collect();
    let pieces = [7usize, 13, 20];

    for zero_pad in [true, false] {
        let config = BlockConfig::new(16).with_zero_pad(zero_pad);
        let mut blockifier = Blockifier::new(config);

        println!("block_size=16, zero_pad={}", zero_pad);

        let mut start = 0;
        for len in pieces {
            let piece = Bytes::copy_from_slice(&data[start..start + len]);
            start += len;

            for block in blockifier.push(piece)? {
                println!("  {}: {:?}", block, &block.data[..]);
            }
        }

        // Finalize stream
        match blockifier.finish()? {
            Some(block) => println!("  {} (final): {:?}", block, &block.data[..]),
            None => println!("  no final block"),
        }
        println!();
    }

    Ok(())
}

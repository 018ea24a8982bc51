//! File blocking example.
//!
//! Reads a file, cuts it into blocks, and writes the zero-padded blocks to
//! `<path>.blk`.
//!
//! Run with:
//!     RUST_LOG=blockrs=debug cargo run --example sync_file -- /path/to/file [block_size]

use std::env;
use std::fs::File;
use std::io::BufWriter;

use blockrs::{BlockConfig, BlockWriter, Blockifier, HashConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());
    let block_size = match env::args().nth(2) {
        Some(arg) => arg.parse()?,
        None => 512,
    };
    let config = BlockConfig::try_new(block_size)?.with_hash_config(HashConfig::enabled());

    println!("Blocking file: {} ({} byte blocks)\n", path, config.block_size());

    // Pull side: iterate blocks straight from the file
    let file = File::open(&path)?;
    let mut total_blocks = 0;
    for block in Blockifier::new(config).blocks(file) {
        let block = block?;
        total_blocks += 1;
        println!("{}", block);
    }

    // Push side: copy the file through a BlockWriter
    let out_path = format!("{}.blk", path);
    let mut writer = BlockWriter::new(BufWriter::new(File::create(&out_path)?), config);
    std::io::copy(&mut File::open(&path)?, &mut writer)?;
    writer.finish()?;

    println!("\nTotal: {} blocks, written to {}", total_blocks, out_path);

    Ok(())
}

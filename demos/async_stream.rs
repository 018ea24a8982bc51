//! Async blocking example.
//!
//! Simulates a network source that delivers data in irregular bursts and
//! reblocks it with `block_async`.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use std::time::Duration;

use blockrs::{BlockConfig, block_async};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let data: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();
    println!("Async blocking {} bytes of data...\n", data.len());

    let (client, mut server) = tokio::io::duplex(16 * 1024);

    // Producer: bursts of varying size with small delays
    let producer = tokio::spawn(async move {
        let mut offset = 0;
        let mut burst = 1000;
        while offset < data.len() {
            let end = (offset + burst).min(data.len());
            server.write_all(&data[offset..end]).await?;
            offset = end;
            burst = burst * 3 % 7919 + 1;
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        Ok::<_, std::io::Error>(())
    });

    let config = BlockConfig::new(4096).with_zero_pad(false);
    let mut stream = block_async(client.compat(), config);

    let mut total_blocks = 0;
    let mut total_bytes = 0;
    while let Some(block) = stream.next().await {
        let block = block?;
        total_blocks += 1;
        total_bytes += block.len();
        println!("  Block {}: offset={:>8}, len={:>5}", total_blocks, block.offset, block.len());
    }

    producer.await??;
    println!("\nTotal: {} blocks, {} bytes", total_blocks, total_bytes);

    Ok(())
}

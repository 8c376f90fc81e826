//! `ressa ingest`: read and chunk documents without indexing them.
//!
//! Useful for checking chunking settings before a `--docs` run.

use ressa_config::AppConfig;
use ressa_memory::{chunk_text, read_document};
use std::path::PathBuf;

pub async fn run(config: &AppConfig, files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let chunking = &config.chunking;
    println!(
        "Chunking with size={} overlap={} (max {} chunks)",
        chunking.chunk_size, chunking.overlap, chunking.max_chunks
    );

    let mut total = 0;
    for path in files {
        match read_document(path).await {
            Ok((text, name)) => {
                let chunks = chunk_text(&text, chunking.chunk_size, chunking.overlap, chunking.max_chunks);
                println!("  {name}: {} chars, {} chunks", text.chars().count(), chunks.len());
                total += chunks.len();
            }
            Err(e) => eprintln!("  {}: {e}", path.display()),
        }
    }

    println!("Total: {total} chunks");
    Ok(())
}

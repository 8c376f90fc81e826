//! `ressa ask`: one question through the reasoning loop.

use ressa_config::AppConfig;
use std::path::PathBuf;

pub async fn run(
    config: &AppConfig,
    query: &str,
    memory: bool,
    docs: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut agent = super::build_agent(config, docs).await?;
    let use_memory = memory && config.agent.use_memory;

    let answer = agent.run(query, use_memory).await;
    println!("{answer}");
    Ok(())
}

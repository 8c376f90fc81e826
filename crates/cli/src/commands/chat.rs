//! `ressa chat`: interactive session over stdin.

use ressa_config::AppConfig;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn run(
    config: &AppConfig,
    docs: &[PathBuf],
    simple: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut agent = super::build_agent(config, docs).await?;

    println!();
    println!("  Ressa ({} / {})", config.default_provider, config.model());
    println!("  Type 'exit' to quit, '/reset' to clear memory, '/tools' to list tools.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "exit" | "quit" => break,
            "/reset" => {
                agent.reset_memory();
                println!("  Memory cleared.");
                continue;
            }
            "/tools" => {
                for tool in agent.tool_info() {
                    println!("  {:<20} {}", tool.name, tool.description);
                }
                continue;
            }
            _ => {}
        }

        let answer = if simple {
            agent.chat(input).await
        } else {
            agent.run(input, true).await
        };
        println!("\n{answer}\n");
    }

    Ok(())
}

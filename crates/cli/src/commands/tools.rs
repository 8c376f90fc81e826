//! `ressa tools`: list the default tool set.

use ressa_config::AppConfig;

pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ressa_tools::default_registry(None, None, config)?;

    println!("Available tools ({}):", registry.len());
    for tool in registry.descriptors() {
        println!("  {:<20} {}", tool.name, tool.description);
    }
    Ok(())
}

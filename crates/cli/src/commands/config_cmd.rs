//! `ressa config`: show the effective configuration.

use ressa_config::AppConfig;

pub fn show(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let toml_str = config.to_toml()?;
    println!("# {}", config_path().display());
    println!("{toml_str}");
    Ok(())
}

pub fn path() {
    println!("{}", config_path().display());
}

fn config_path() -> std::path::PathBuf {
    AppConfig::config_dir().join("config.toml")
}

//! Config command - Show the resolved settings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use debate_chat::{DebateSettings, DebateStyle, DEFAULT_SETTINGS_FILE};

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the settings as TOML only
    #[arg(long)]
    raw: bool,
}

pub async fn execute(args: ConfigArgs, config: Option<PathBuf>) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let settings = DebateSettings::load(config.as_deref(), &current_dir)?;
    info!("Resolved settings for provider {}", settings.provider.as_str());

    let rendered = toml::to_string_pretty(&settings).context("Failed to serialize settings")?;
    if args.raw {
        print!("{}", rendered);
        return Ok(());
    }

    let source = match config {
        Some(path) => path.display().to_string(),
        None if current_dir.join(DEFAULT_SETTINGS_FILE).exists() => DEFAULT_SETTINGS_FILE.to_string(),
        None => "built-in defaults".to_string(),
    };

    let key_env = settings.provider.api_key_env();
    let key_status = std::env::var(key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .map(|k| format!("set ({})", mask_key(&k)))
        .unwrap_or_else(|| "missing".to_string());

    println!("⚙️  Settings source: {}", source);
    println!("   Model: {}", settings.resolved_model());
    println!("   {}: {}", key_env, key_status);
    println!(
        "   Styles: {}",
        DebateStyle::ALL
            .iter()
            .map(DebateStyle::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();
    print!("{}", rendered);

    Ok(())
}

/// Keep the first four characters of a key
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}****", visible)
}

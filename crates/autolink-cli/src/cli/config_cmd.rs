use crate::cli::{ConfigCommands, ConfigSetArgs};
use crate::config::open_linker;
use anyhow::Result;
use autolink_core::{JsonFileStore, SettingsStore};
use std::path::Path;

pub async fn run(cmd: ConfigCommands, settings_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Validate => validate(settings_path),
        ConfigCommands::Show => show(settings_path),
        ConfigCommands::Set(args) => set(args, settings_path),
    }
}

fn validate(settings_path: &Path) -> Result<()> {
    match JsonFileStore::new(settings_path).load() {
        Ok(Some(settings)) => {
            let errors = settings.validate();
            if errors.is_empty() {
                println!("✅ {} is valid.", settings_path.display());
            } else {
                println!("❌ Validation errors in {}:", settings_path.display());
                for e in &errors {
                    println!("  - {}", e);
                }
                std::process::exit(1);
            }
        }
        Ok(None) => {
            println!(
                "✅ {} does not exist; defaults apply.",
                settings_path.display()
            );
        }
        Err(e) => {
            println!("❌ Failed to parse {}: {}", settings_path.display(), e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn show(settings_path: &Path) -> Result<()> {
    let linker = open_linker(settings_path)?;
    match toml::to_string_pretty(&linker.settings()) {
        Ok(s) => println!("{}", s),
        Err(e) => anyhow::bail!("Failed to serialize settings: {}", e),
    }
    Ok(())
}

fn set(args: ConfigSetArgs, settings_path: &Path) -> Result<()> {
    let mut linker = open_linker(settings_path)?;

    if let Some(active) = args.autoscan {
        linker.set_autoscan_active(active)?;
        println!("autoscan_active_document = {}", active);
    }
    if let Some(ignore) = args.ignore_headers {
        linker.set_ignore_headers(ignore)?;
        println!("ignore_headers = {}", ignore);
    }
    if let Some(interval) = args.interval {
        linker.set_check_interval_text(&interval)?;
        println!(
            "autoscan_check_interval = {}",
            linker.check_interval().as_millis()
        );
    }
    Ok(())
}

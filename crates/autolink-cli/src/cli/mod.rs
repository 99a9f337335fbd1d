pub mod alias;
pub mod config_cmd;
pub mod glossary;
pub mod scan;
pub mod watch;

use autolink_core::GlossaryEntry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autolink")]
#[command(version, about = "Turn glossary terms in markdown notes into [[target|alias]] links")]
pub struct Cli {
    /// Path to the settings record (JSON)
    #[arg(
        long,
        global = true,
        env = "AUTOLINK_SETTINGS",
        default_value = "autolink.json"
    )]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Autolink a whole note
    Scan(ScanArgs),
    /// Autolink a byte range of a note
    ScanSelection(ScanSelectionArgs),
    /// Add or remove an alias from a [[target|alias]] link
    #[command(subcommand)]
    Alias(AliasCommands),
    /// Glossary management
    #[command(subcommand)]
    Glossary(GlossaryCommands),
    /// Settings commands
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Autolink a note whenever it stops changing
    Watch(WatchArgs),
}

// --- Scan args ---

#[derive(Args, Debug)]
pub struct ScanArgs {
    pub file: PathBuf,
    /// Rewrite the file in place instead of printing
    #[arg(long, short = 'w')]
    pub write: bool,
}

#[derive(Args, Debug)]
pub struct ScanSelectionArgs {
    pub file: PathBuf,
    /// Selection start (byte offset)
    #[arg(long)]
    pub start: usize,
    /// Selection end (byte offset, exclusive)
    #[arg(long)]
    pub end: usize,
    /// Rewrite the file in place instead of printing
    #[arg(long, short = 'w')]
    pub write: bool,
}

// --- Alias args ---

#[derive(Subcommand, Debug)]
pub enum AliasCommands {
    /// Add the alias of a [[target|alias]] link to the glossary
    Add(AliasArgs),
    /// Remove the alias of a [[target|alias]] link from the glossary
    Remove(AliasArgs),
}

#[derive(Args, Debug)]
pub struct AliasArgs {
    /// Link text, e.g. "[[Target Page|display text]]"
    pub link: String,
}

// --- Glossary args ---

#[derive(Subcommand, Debug)]
pub enum GlossaryCommands {
    /// List glossary entries
    List(GlossaryListArgs),
    /// Add an entry (aliases merge into an existing one)
    Add(GlossaryEntryArgs),
    /// Replace an entry's aliases; an empty list removes the entry
    Set(GlossaryEntryArgs),
    /// Remove an entry
    Remove(GlossaryRemoveArgs),
}

#[derive(Args, Debug)]
pub struct GlossaryListArgs {
    /// Only entries whose link contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    pub search: String,
    /// Output format: table (default) | json
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct GlossaryEntryArgs {
    /// Link target, e.g. "page#section"
    pub target: String,
    /// Aliases as a JSON array, e.g. '["alias1", "alias2"]'
    pub aliases: String,
}

#[derive(Args, Debug)]
pub struct GlossaryRemoveArgs {
    pub target: String,
}

// --- Config args ---

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    Validate,
    Show,
    Set(ConfigSetArgs),
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Autolink the watched note automatically
    #[arg(long)]
    pub autoscan: Option<bool>,
    /// Ignore header lines when scanning
    #[arg(long)]
    pub ignore_headers: Option<bool>,
    /// Quiet period before an edited note is scanned (milliseconds)
    #[arg(long)]
    pub interval: Option<String>,
}

// --- Watch args ---

#[derive(Args, Debug)]
pub struct WatchArgs {
    pub file: PathBuf,
}

// --- Table printing helpers ---

pub fn print_glossary_table(entries: &[&GlossaryEntry]) {
    if entries.is_empty() {
        println!("(no links)");
        return;
    }
    println!("{:<32}  {}", "LINK", "ALIASES");
    println!("{}", "─".repeat(80));
    for entry in entries {
        println!(
            "{:<32}  {}",
            truncate(&entry.target, 32),
            truncate(&entry.aliases.join(", "), 46)
        );
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max - 1).collect::<String>())
    }
}

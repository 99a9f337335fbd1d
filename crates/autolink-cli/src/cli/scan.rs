use crate::cli::{ScanArgs, ScanSelectionArgs};
use crate::config::{open_linker, ConsoleNotifier};
use anyhow::{Context, Result};
use autolink_core::{commands, BufferEditor, CommandId, Editor};
use std::path::Path;
use tracing::info;

pub async fn run(args: ScanArgs, settings: &Path) -> Result<()> {
    let text = read_note(&args.file)?;
    let mut editor = BufferEditor::new(text.clone());
    apply(CommandId::ScanNote, &mut editor, settings)?;
    finish(&args.file, &text, editor.text(), args.write)
}

pub async fn run_selection(args: ScanSelectionArgs, settings: &Path) -> Result<()> {
    if args.start > args.end {
        anyhow::bail!("--start ({}) must not exceed --end ({})", args.start, args.end);
    }
    let text = read_note(&args.file)?;
    let mut editor = BufferEditor::new(text.clone()).with_selection(args.start..args.end);
    apply(CommandId::AutolinkSelection, &mut editor, settings)?;
    finish(&args.file, &text, editor.text(), args.write)
}

fn read_note(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn apply(command: CommandId, editor: &mut BufferEditor, settings: &Path) -> Result<()> {
    let mut linker = open_linker(settings)?;
    commands::run(command, &mut linker, editor, &ConsoleNotifier)?;
    Ok(())
}

fn finish(path: &Path, before: &str, after: String, write: bool) -> Result<()> {
    if !write {
        print!("{}", after);
        return Ok(());
    }
    if after == before {
        info!("{}: no new links", path.display());
        return Ok(());
    }
    std::fs::write(path, &after).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("{}: rewritten", path.display());
    Ok(())
}

use crate::cli::{AliasArgs, AliasCommands};
use crate::config::{open_linker, ConsoleNotifier};
use anyhow::Result;
use autolink_core::{commands, BufferEditor, CommandId};
use std::path::Path;

pub async fn run(cmd: AliasCommands, settings: &Path) -> Result<()> {
    match cmd {
        AliasCommands::Add(args) => apply(CommandId::AddAlias, args, settings),
        AliasCommands::Remove(args) => apply(CommandId::RemoveAlias, args, settings),
    }
}

/// The link text stands in for the editor selection.
fn apply(command: CommandId, args: AliasArgs, settings: &Path) -> Result<()> {
    let mut linker = open_linker(settings)?;
    let len = args.link.len();
    let mut editor = BufferEditor::new(args.link).with_selection(0..len);
    commands::run(command, &mut linker, &mut editor, &ConsoleNotifier)?;
    Ok(())
}

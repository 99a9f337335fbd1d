//! Command palette commands, driven against the host [`Editor`].

use crate::api::Autolinker;
use crate::error::Result;
use crate::glossary::{AddAliasOutcome, RemoveAliasOutcome};
use crate::host::{Cursor, Editor, Notifier};
use crate::storage::SettingsStore;
use log::{debug, warn};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const LINK_NOT_SELECTED: &str = "Link not selected";
pub const ALIAS_ALREADY_EXISTS: &str = "Alias already exists";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    ScanNote,
    AutolinkSelection,
    AddAlias,
    RemoveAlias,
}

impl CommandId {
    pub fn all() -> [CommandId; 4] {
        [
            Self::ScanNote,
            Self::AutolinkSelection,
            Self::AddAlias,
            Self::RemoveAlias,
        ]
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::ScanNote => "autolink-scan-note",
            Self::AutolinkSelection => "autolink-autolink-selection",
            Self::AddAlias => "autolink-add-alias",
            Self::RemoveAlias => "autolink-remove-alias",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ScanNote => "Autolink current note",
            Self::AutolinkSelection => "Autolink selection",
            Self::AddAlias => "Add autolink to glossary",
            Self::RemoveAlias => "Remove autolink from glossary",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `[[target|alias]]` link picked out of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSelection {
    pub target: String,
    pub alias: String,
}

fn link_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(r"(?R)\[\[(.*)\|(.*)\]\]") {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Link selection pattern failed to compile: {}", e);
                None
            }
        })
        .as_ref()
}

/// Find the first `[[target|alias]]` in `text`.
///
/// Both captures are greedy and confined to one line, so with several links
/// on a line the target runs up to the last `|`.
pub fn parse_link_selection(text: &str) -> Option<LinkSelection> {
    let caps = link_pattern()?.captures(text)?;
    Some(LinkSelection {
        target: caps.get(1)?.as_str().to_string(),
        alias: caps.get(2)?.as_str().to_string(),
    })
}

/// Run one palette command.
pub fn run<S: SettingsStore>(
    command: CommandId,
    linker: &mut Autolinker<S>,
    editor: &mut dyn Editor,
    notifier: &dyn Notifier,
) -> Result<()> {
    debug!("Running command {}", command.id());
    match command {
        CommandId::ScanNote => {
            scan_note(linker, editor);
            Ok(())
        }
        CommandId::AutolinkSelection => {
            autolink_selection(linker, editor);
            Ok(())
        }
        CommandId::AddAlias => add_alias(linker, editor, notifier),
        CommandId::RemoveAlias => remove_alias(linker, editor, notifier),
    }
}

fn scan_note<S: SettingsStore>(linker: &Autolinker<S>, editor: &mut dyn Editor) {
    let text = editor.text();
    let rewritten = linker.scan_full(&text);
    if rewritten != text {
        editor.set_text(rewritten);
    }
}

fn autolink_selection<S: SettingsStore>(linker: &Autolinker<S>, editor: &mut dyn Editor) {
    let selection = editor.selection();
    editor.replace_selection(&linker.scan_selection(&selection));

    let cursor = editor.cursor();
    if let Err(e) = editor.set_cursor(Cursor::new(cursor.line, cursor.ch + 1)) {
        warn!("Cursor not moved after selection rewrite: {}", e);
    }
}

/// Parse the selection into a link with a non-empty target and alias.
fn selected_link(editor: &dyn Editor, notifier: &dyn Notifier) -> Option<LinkSelection> {
    match parse_link_selection(&editor.selection()) {
        Some(link) if !link.target.is_empty() && !link.alias.is_empty() => Some(link),
        _ => {
            notifier.notify(LINK_NOT_SELECTED);
            None
        }
    }
}

fn add_alias<S: SettingsStore>(
    linker: &mut Autolinker<S>,
    editor: &mut dyn Editor,
    notifier: &dyn Notifier,
) -> Result<()> {
    let Some(LinkSelection { target, alias }) = selected_link(editor, notifier) else {
        return Ok(());
    };

    let message = match linker.add_alias(&target, &alias)? {
        AddAliasOutcome::AlreadyExists => ALIAS_ALREADY_EXISTS.to_string(),
        AddAliasOutcome::AppendedToEntry => {
            format!("Alias {} added to existing link {}", alias, target)
        }
        AddAliasOutcome::CreatedEntry => format!("Alias {} added to link {}", alias, target),
    };
    notifier.notify(&message);
    Ok(())
}

fn remove_alias<S: SettingsStore>(
    linker: &mut Autolinker<S>,
    editor: &mut dyn Editor,
    notifier: &dyn Notifier,
) -> Result<()> {
    let Some(LinkSelection { target, alias }) = selected_link(editor, notifier) else {
        return Ok(());
    };

    match linker.remove_alias(&target, &alias)? {
        RemoveAliasOutcome::Removed => {
            notifier.notify(&format!("Alias {} removed from link {}", alias, target));
        }
        RemoveAliasOutcome::EntryDeleted => {
            notifier.notify(&format!("Link {} removed due to 0 aliases", target));
        }
        RemoveAliasOutcome::NotFound => {
            debug!("Nothing to remove for [[{}|{}]]", target, alias);
        }
    }
    Ok(())
}

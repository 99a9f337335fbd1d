use crate::cli::{
    print_glossary_table, GlossaryCommands, GlossaryEntryArgs, GlossaryListArgs,
    GlossaryRemoveArgs,
};
use crate::config::open_linker;
use anyhow::Result;
use std::path::Path;

pub async fn run(cmd: GlossaryCommands, settings: &Path) -> Result<()> {
    match cmd {
        GlossaryCommands::List(args) => list(args, settings),
        GlossaryCommands::Add(args) => add(args, settings),
        GlossaryCommands::Set(args) => set(args, settings),
        GlossaryCommands::Remove(args) => remove(args, settings),
    }
}

fn list(args: GlossaryListArgs, settings: &Path) -> Result<()> {
    let linker = open_linker(settings)?;
    let entries = linker.search_entries(&args.search);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Links in list: {}", linker.index().glossary().len());
        print_glossary_table(&entries);
    }
    Ok(())
}

fn add(args: GlossaryEntryArgs, settings: &Path) -> Result<()> {
    let mut linker = open_linker(settings)?;
    let added = linker.add_entry(&args.target, &args.aliases)?;
    println!("Added {} aliases to link {}", added, args.target);
    Ok(())
}

fn set(args: GlossaryEntryArgs, settings: &Path) -> Result<()> {
    let mut linker = open_linker(settings)?;
    linker.replace_entry_aliases(&args.target, &args.aliases)?;
    match linker.index().glossary().get(&args.target) {
        Some(entry) => println!("Link {}: {}", entry.target, entry.aliases.join(", ")),
        None => println!("Link {} removed due to 0 aliases", args.target),
    }
    Ok(())
}

fn remove(args: GlossaryRemoveArgs, settings: &Path) -> Result<()> {
    let mut linker = open_linker(settings)?;
    let entry = linker.remove_entry(&args.target)?;
    println!("Removed link {} ({} aliases)", entry.target, entry.aliases.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autolink_core::{JsonFileStore, SettingsStore};
    use tempfile::TempDir;

    fn entry_args(target: &str, aliases: &str) -> GlossaryEntryArgs {
        GlossaryEntryArgs {
            target: target.into(),
            aliases: aliases.into(),
        }
    }

    #[tokio::test]
    async fn test_entry_lifecycle() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("autolink.json");
        let load = || JsonFileStore::new(&settings).load().unwrap().unwrap();

        run(GlossaryCommands::Add(entry_args("Cats", r#"["cat"]"#)), &settings)
            .await
            .unwrap();
        run(GlossaryCommands::Set(entry_args("Cats", r#"["cat", "cats"]"#)), &settings)
            .await
            .unwrap();
        assert_eq!(load().links[0].aliases, vec!["cat", "cats"]);

        run(
            GlossaryCommands::Remove(GlossaryRemoveArgs {
                target: "Cats".into(),
            }),
            &settings,
        )
        .await
        .unwrap();
        assert!(load().links.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_aliases_leave_file_untouched() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("autolink.json");

        run(GlossaryCommands::Add(entry_args("Cats", r#"["cat"]"#)), &settings)
            .await
            .unwrap();
        let before = std::fs::read_to_string(&settings).unwrap();

        assert!(run(GlossaryCommands::Set(entry_args("Cats", "[cat")), &settings)
            .await
            .is_err());
        assert!(run(GlossaryCommands::Add(entry_args("Dogs", "dog")), &settings)
            .await
            .is_err());
        assert_eq!(std::fs::read_to_string(&settings).unwrap(), before);
    }
}

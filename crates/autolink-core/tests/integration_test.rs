use autolink_core::commands::run;
use autolink_core::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

/// Route core `log` output through the test harness; `RUST_LOG=debug` shows it.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cats_settings() -> Settings {
    Settings::default().with_links(vec![GlossaryEntry::new(
        "Cats",
        vec!["cat".to_string(), "cats".to_string()],
    )])
}

// ── End to End ───────────────────────────────────────────────────────────────

#[test]
fn test_end_to_end_scan() {
    init_logging();
    let linker = Autolinker::open(MemoryStore::with_settings(cats_settings())).unwrap();

    let output = linker.scan_full("# cat facts\nI have a cat.");
    assert_eq!(output, "# cat facts\nI have a [[Cats|cat]].");
}

#[test]
fn test_plural_alias_takes_precedence() {
    init_logging();
    let linker = Autolinker::open(MemoryStore::with_settings(cats_settings())).unwrap();
    assert_eq!(linker.scan_full("two cats"), "two [[Cats|cats]]");
}

#[test]
fn test_scan_is_idempotent() {
    init_logging();
    let linker = Autolinker::open(MemoryStore::with_settings(cats_settings())).unwrap();
    let text = "cat, cats and more cat\n| cat | table |\n# cats\ncats love cat";
    let once = linker.scan_full(text);
    assert_eq!(linker.scan_full(&once), once);
}

// ── Persistence ──────────────────────────────────────────────────────────────

#[test]
fn test_mutations_survive_reopen() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("autolink.json");

    {
        let mut linker = Autolinker::open(JsonFileStore::new(&path)).unwrap();
        linker.add_alias("pageA", "foo").unwrap();
        linker.add_entry("pageB", r#"["bar", "baz"]"#).unwrap();
        linker.set_ignore_headers(false).unwrap();
        linker.set_check_interval(750).unwrap();
    }

    let linker = Autolinker::open(JsonFileStore::new(&path)).unwrap();
    let settings = linker.settings();
    assert!(!settings.ignore_headers);
    assert_eq!(settings.autoscan_check_interval, 750);
    assert_eq!(settings.links.len(), 2);
    assert_eq!(
        linker.scan_full("# foo baz"),
        "# [[pageA|foo]] [[pageB|baz]]"
    );
}

#[test]
fn test_persisted_record_format() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("autolink.json");

    let mut linker = Autolinker::open(JsonFileStore::new(&path)).unwrap();
    linker.add_alias("Cats", "cat").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({
            "autoscan_check_interval": 2000,
            "autoscan_active_document": true,
            "ignore_headers": true,
            "links": [{ "link": "Cats", "aliases": ["cat"] }]
        })
    );
}

#[test]
fn test_open_skips_entry_with_empty_target() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("autolink.json");
    std::fs::write(
        &path,
        r#"{"links": [{"link": "", "aliases": ["x"]}, {"link": "Cats", "aliases": ["cat"]}]}"#,
    )
    .unwrap();

    let linker = Autolinker::open(JsonFileStore::new(&path)).unwrap();
    assert_eq!(linker.settings().links.len(), 1);
    assert_eq!(linker.scan_full("x and a cat"), "x and a [[Cats|cat]]");
}

#[test]
fn test_shared_store_sees_every_save() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let mut linker = Autolinker::open(store.clone()).unwrap();

    linker.add_alias("pageA", "foo").unwrap();
    linker.add_alias("pageA", "foo").unwrap();
    linker.remove_alias("pageA", "missing").unwrap();
    assert_eq!(store.save_count(), 1);

    linker.remove_alias("pageA", "foo").unwrap();
    assert_eq!(store.save_count(), 2);
    assert!(store.snapshot().unwrap().links.is_empty());
}

// ── Commands ─────────────────────────────────────────────────────────────────

#[test]
fn test_add_then_scan_through_commands() {
    init_logging();
    let mut linker = Autolinker::open(MemoryStore::new()).unwrap();
    let notifier = RecordingNotifier::new();

    let mut selection = BufferEditor::new("[[Target Page|display text]]").with_selection(0..28);
    run(CommandId::AddAlias, &mut linker, &mut selection, &notifier).unwrap();

    let mut note = BufferEditor::new("Some display text here.");
    run(CommandId::ScanNote, &mut linker, &mut note, &notifier).unwrap();
    assert_eq!(note.text(), "Some [[Target Page|display text]] here.");

    run(CommandId::RemoveAlias, &mut linker, &mut selection, &notifier).unwrap();
    assert_eq!(
        notifier.messages(),
        vec![
            "Alias display text added to link Target Page",
            "Link Target Page removed due to 0 aliases",
        ]
    );
}

// ── Autoscan ─────────────────────────────────────────────────────────────────

#[test]
fn test_autoscan_loop_rewrites_once_quiet() {
    init_logging();
    let linker = Autolinker::open(MemoryStore::with_settings(cats_settings())).unwrap();
    let start = Instant::now();
    let tick = Duration::from_millis(1000);
    let mut detector = ChangeDetector::new(linker.check_interval(), start);
    let mut document = String::from("a cat");
    let mut scans = 0;

    for i in 0..6 {
        let now = start + tick * i;
        if detector.observe(document.len(), now) {
            document = linker.scan_full(&document);
            detector.mark_scanned(document.len());
            scans += 1;
        }
    }

    assert_eq!(scans, 1);
    assert_eq!(document, "a [[Cats|cat]]");
}

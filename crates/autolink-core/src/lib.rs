pub mod api;
pub mod autoscan;
pub mod commands;
pub mod error;
pub mod glossary;
pub mod host;
pub mod linker;
pub mod settings;
pub mod storage;
pub mod types;

pub use api::Autolinker;
pub use autoscan::ChangeDetector;
pub use commands::{parse_link_selection, CommandId, LinkSelection};
pub use error::{AutolinkError, Result};
pub use glossary::{AddAliasOutcome, AliasCache, Glossary, GlossaryIndex, RemoveAliasOutcome};
pub use host::{BufferEditor, Cursor, CursorError, Editor, Notifier, RecordingNotifier, SilentNotifier};
pub use linker::{rewrite, LinkRewriter, RewriteOptions, RewriteStats};
pub use settings::{parse_alias_list, parse_interval, Settings};
pub use storage::{JsonFileStore, MemoryStore, SettingsStore};
pub use types::{AliasLink, GlossaryEntry};

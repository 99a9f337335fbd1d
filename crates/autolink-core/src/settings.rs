use crate::error::{AutolinkError, Result};
use crate::linker::RewriteOptions;
use crate::types::GlossaryEntry;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Persisted settings record: options plus the glossary.
///
/// Fields missing from a stored record fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quiet period, in milliseconds, before an edited document is scanned. Default: 2000.
    pub autoscan_check_interval: u64,

    /// Whether the periodic scan of the active document runs at all. Default: true.
    pub autoscan_active_document: bool,

    /// Leave `#` header lines untouched. Default: true.
    pub ignore_headers: bool,

    /// The glossary.
    pub links: Vec<GlossaryEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autoscan_check_interval: 2000,
            autoscan_active_document: true,
            ignore_headers: true,
            links: Vec::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_interval(mut self, millis: u64) -> Self {
        self.autoscan_check_interval = millis;
        self
    }

    pub fn with_autoscan(mut self, active: bool) -> Self {
        self.autoscan_active_document = active;
        self
    }

    pub fn with_ignore_headers(mut self, ignore: bool) -> Self {
        self.ignore_headers = ignore;
        self
    }

    pub fn with_links(mut self, links: Vec<GlossaryEntry>) -> Self {
        self.links = links;
        self
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.autoscan_check_interval)
    }

    /// Period of the host timer: half the quiet period, never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis((self.autoscan_check_interval / 2).max(1))
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions::new().with_skip_headers(self.ignore_headers)
    }

    /// Every problem with this record, empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.autoscan_check_interval == 0 {
            errors.push("autoscan_check_interval must be > 0".to_string());
        }

        let mut seen: Vec<&str> = Vec::new();
        for (i, entry) in self.links.iter().enumerate() {
            if let Err(e) = entry.validate() {
                errors.push(format!("links[{}]: {}", i, e));
            }
            if seen.contains(&entry.target.as_str()) {
                errors.push(format!("links[{}]: duplicate link '{}'", i, entry.target));
            }
            seen.push(&entry.target);
        }

        errors
    }
}

/// Parse the interval text from the settings surface: a positive integer of milliseconds.
pub fn parse_interval(text: &str) -> Result<u64> {
    match text.trim().parse::<u64>() {
        Ok(0) => Err(AutolinkError::Validation(
            "autoscan_check_interval must be > 0".into(),
        )),
        Ok(millis) => Ok(millis),
        Err(_) => Err(AutolinkError::Validation(format!(
            "'{}' is not a number of milliseconds",
            text.trim()
        ))),
    }
}

/// Parse an alias list typed as a JSON array of strings, e.g. `["alias1", "alias2"]`.
///
/// Duplicates collapse to their first occurrence.
pub fn parse_alias_list(text: &str) -> Result<Vec<String>> {
    let parsed: Vec<String> = serde_json::from_str(text)
        .map_err(|e| AutolinkError::MalformedAliases(e.to_string()))?;

    let mut aliases: Vec<String> = Vec::with_capacity(parsed.len());
    for alias in parsed {
        if alias.is_empty() {
            return Err(AutolinkError::MalformedAliases(
                "aliases must not be empty strings".into(),
            ));
        }
        if !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }
    Ok(aliases)
}

use crate::error::{AutolinkError, Result};
use serde::{Deserialize, Serialize};

/// One glossary entry: a link target and the display terms that resolve to it.
///
/// Persisted as `{ "link": ..., "aliases": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Link destination, e.g. `page#section`.
    #[serde(rename = "link")]
    pub target: String,

    /// Display terms. Unique within the entry, never empty.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl GlossaryEntry {
    pub fn new(target: impl Into<String>, aliases: Vec<String>) -> Self {
        Self {
            target: target.into(),
            aliases,
        }
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    /// Check the entry invariants: non-empty target, non-empty and unique aliases.
    pub fn validate(&self) -> Result<()> {
        validate_target(&self.target)?;
        for (i, alias) in self.aliases.iter().enumerate() {
            validate_alias(alias)?;
            if self.aliases[..i].contains(alias) {
                return Err(AutolinkError::Validation(format!(
                    "duplicate alias '{}' under link '{}'",
                    alias, self.target
                )));
            }
        }
        if self.aliases.is_empty() {
            return Err(AutolinkError::Validation(format!(
                "link '{}' has no aliases",
                self.target
            )));
        }
        Ok(())
    }
}

/// A single (alias, target) pair from the flattened, priority-ordered alias list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasLink {
    pub alias: String,
    pub target: String,
}

impl AliasLink {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }

    /// Ordering key: alias length in characters.
    pub fn len(&self) -> usize {
        self.alias.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.alias.is_empty()
    }

    /// The `[[target|display]]` form this alias produces.
    pub fn render(&self, display: &str) -> String {
        format!("[[{}|{}]]", self.target, display)
    }
}

pub(crate) fn validate_target(target: &str) -> Result<()> {
    if target.is_empty() {
        return Err(AutolinkError::Validation("link target must not be empty".into()));
    }
    Ok(())
}

pub(crate) fn validate_alias(alias: &str) -> Result<()> {
    if alias.is_empty() {
        return Err(AutolinkError::Validation("alias must not be empty".into()));
    }
    Ok(())
}

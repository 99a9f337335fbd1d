//! Link rewriter: wraps unlinked alias mentions into `[[target|alias]]` links.
//!
//! Aliases are applied one at a time, longest first, each pass seeing the
//! output of the previous one. Within a pass every line gets at most one new
//! link: the right-most occurrence of the alias that
//! - is not directly preceded by `[[`, and
//! - has no `|` and no `]]` anywhere after it on the same line.
//!
//! The second rule is a line-level heuristic. It also skips mentions that sit
//! before an unrelated `|` (a markdown table cell, for instance).

mod config;
mod line;
mod rewriter;

pub use config::RewriteOptions;
pub use line::{split_lines, Line};
pub use rewriter::{rewrite, LinkRewriter, RewriteStats};

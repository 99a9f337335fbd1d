use crate::linker::line::split_lines;
use crate::linker::RewriteOptions;
use crate::types::AliasLink;
use log::debug;

/// Counters for one rewrite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Links inserted across all alias passes.
    pub links_created: usize,
    /// Aliases that produced at least one link.
    pub aliases_matched: usize,
}

/// Applies an ordered alias list to a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkRewriter {
    options: RewriteOptions,
}

impl LinkRewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RewriteOptions {
        self.options
    }

    pub fn rewrite(&self, text: &str, aliases: &[AliasLink]) -> String {
        self.rewrite_with_stats(text, aliases).0
    }

    /// Rewrite `text`, applying `aliases` in the given order (longest first).
    pub fn rewrite_with_stats(&self, text: &str, aliases: &[AliasLink]) -> (String, RewriteStats) {
        let mut document = text.to_string();
        let mut stats = RewriteStats::default();

        for link in aliases {
            if link.is_empty() {
                continue;
            }
            let (next, created) = self.apply_alias(&document, link);
            if created > 0 {
                stats.links_created += created;
                stats.aliases_matched += 1;
                document = next;
            }
        }

        if stats.links_created > 0 {
            debug!(
                "Rewrite created {} links from {} aliases",
                stats.links_created, stats.aliases_matched
            );
        }
        (document, stats)
    }

    /// One alias pass: at most one new link per line.
    fn apply_alias(&self, text: &str, link: &AliasLink) -> (String, usize) {
        let alias = link.alias.as_str();
        let mut out = String::with_capacity(text.len());
        let mut created = 0;

        for line in split_lines(text) {
            let hit = if self.options.skip_headers && line.is_header() {
                None
            } else {
                line.last_unlinked_occurrence(alias)
            };

            match hit {
                Some(start) => {
                    let end = start + alias.len();
                    out.push_str(&line.content[..start]);
                    out.push_str(&link.render(&line.content[start..end]));
                    out.push_str(&line.content[end..]);
                    created += 1;
                }
                None => out.push_str(line.content),
            }
            out.push_str(line.terminator);
        }

        (out, created)
    }
}

/// Rewrite `text` with `aliases` (already ordered longest first).
pub fn rewrite(text: &str, aliases: &[AliasLink], options: RewriteOptions) -> String {
    LinkRewriter::new(options).rewrite(text, aliases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::GlossaryIndex;

    fn links(pairs: &[(&str, &str)]) -> Vec<AliasLink> {
        pairs.iter().map(|(a, t)| AliasLink::new(*a, *t)).collect()
    }

    fn skip_headers() -> RewriteOptions {
        RewriteOptions::new().with_skip_headers(true)
    }

    fn keep_headers() -> RewriteOptions {
        RewriteOptions::new().with_skip_headers(false)
    }

    #[test]
    fn test_end_to_end_example() {
        let mut index = GlossaryIndex::default();
        index.add_alias("Cats", "cat").unwrap();
        index.add_alias("Cats", "cats").unwrap();

        let input = "# cat facts\nI have a cat.";
        let output = rewrite(input, &index.ordered_aliases(), skip_headers());
        assert_eq!(output, "# cat facts\nI have a [[Cats|cat]].");
    }

    #[test]
    fn test_longest_alias_wins() {
        let aliases = links(&[("category", "B"), ("cat", "A")]);
        assert_eq!(rewrite("category", &aliases, skip_headers()), "[[B|category]]");
    }

    #[test]
    fn test_header_lines() {
        let aliases = links(&[("category", "B")]);
        assert_eq!(
            rewrite("# category theory", &aliases, skip_headers()),
            "# category theory"
        );
        assert_eq!(
            rewrite("# category theory", &aliases, keep_headers()),
            "# [[B|category]] theory"
        );
    }

    #[test]
    fn test_existing_link_not_relinked() {
        let aliases = links(&[("category", "B")]);
        let text = "see [[B|category]]";
        assert_eq!(rewrite(text, &aliases, skip_headers()), text);

        let target_only = "see [[category]]";
        assert_eq!(rewrite(target_only, &aliases, skip_headers()), target_only);
    }

    #[test]
    fn test_one_link_per_line_per_alias() {
        let aliases = links(&[("cat", "Cats")]);
        let output = rewrite("cat and cat\ncat", &aliases, skip_headers());
        assert_eq!(output, "cat and [[Cats|cat]]\n[[Cats|cat]]");
    }

    #[test]
    fn test_rewrite_is_idempotent_on_repeated_mentions() {
        let aliases = links(&[("category", "B"), ("cat", "A")]);
        let once = rewrite("cat category cat\ncategory cat", &aliases, skip_headers());
        let twice = rewrite(&once, &aliases, skip_headers());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_shorter_alias_links_after_longer_one() {
        let aliases = links(&[("category", "B"), ("cat", "A")]);
        assert_eq!(
            rewrite("category and cat", &aliases, skip_headers()),
            "[[B|category]] and [[A|cat]]"
        );
    }

    #[test]
    fn test_pipe_later_on_line_suppresses_match() {
        let aliases = links(&[("cat", "Cats")]);
        let table = "| cat | dog |";
        assert_eq!(rewrite(table, &aliases, skip_headers()), table);
    }

    #[test]
    fn test_special_characters_match_literally() {
        let aliases = links(&[("C++ (lang)", "Cpp"), ("a.b", "Dot")]);
        assert_eq!(
            rewrite("I like C++ (lang) and axb", &aliases, skip_headers()),
            "I like [[Cpp|C++ (lang)]] and axb"
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let aliases = links(&[("cat", "Cats")]);
        assert_eq!(rewrite("Cat", &aliases, skip_headers()), "Cat");
    }

    #[test]
    fn test_preserves_line_terminators() {
        let aliases = links(&[("cat", "Cats")]);
        assert_eq!(
            rewrite("a cat\r\nno\r\n", &aliases, skip_headers()),
            "a [[Cats|cat]]\r\nno\r\n"
        );
    }

    #[test]
    fn test_stats_count_links() {
        let aliases = links(&[("dog", "Dogs"), ("cat", "Cats"), ("eel", "Eels")]);
        let rewriter = LinkRewriter::new(skip_headers());
        let (_, stats) = rewriter.rewrite_with_stats("cat\ndog cat", &aliases);
        assert_eq!(
            stats,
            RewriteStats {
                links_created: 3,
                aliases_matched: 2
            }
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(rewrite("", &links(&[("cat", "Cats")]), skip_headers()), "");
        assert_eq!(rewrite("cat", &[], skip_headers()), "cat");
    }
}

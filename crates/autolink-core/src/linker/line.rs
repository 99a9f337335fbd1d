pub(crate) const LINK_OPEN: &str = "[[";
pub(crate) const LINK_CLOSE: &str = "]]";
pub(crate) const LINK_PIPE: char = '|';

/// One line of a document: its content and the terminator that ended it
/// (`"\n"`, `"\r\n"`, `"\r"`, or `""` for the last line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub content: &'a str,
    pub terminator: &'a str,
}

impl Line<'_> {
    pub fn is_header(&self) -> bool {
        self.content.starts_with('#')
    }

    /// Byte offset of the right-most occurrence of `alias` that is not
    /// already part of a link.
    ///
    /// Occurrences may overlap ("aa" in "aaa" is found at 0 and 1).
    pub fn last_unlinked_occurrence(&self, alias: &str) -> Option<usize> {
        if alias.is_empty() {
            return None;
        }
        let content = self.content;
        let mut found = None;
        let mut from = 0;

        while let Some(offset) = content[from..].find(alias) {
            let start = from + offset;
            let end = start + alias.len();
            if !content[..start].ends_with(LINK_OPEN) && !closes_link(&content[end..]) {
                found = Some(start);
            }
            from = start + content[start..].chars().next().map_or(1, char::len_utf8);
            if from >= content.len() {
                break;
            }
        }
        found
    }
}

/// Whether the rest of a line is, or contains, the display part or the end of a link.
fn closes_link(rest: &str) -> bool {
    rest.contains(LINK_PIPE) || rest.contains(LINK_CLOSE)
}

/// Split `text` into lines, keeping each line's terminator so the document can
/// be reassembled byte for byte.
pub fn split_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut rest = text;
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                let term_len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                let line = Line {
                    content: &rest[..idx],
                    terminator: &rest[idx..idx + term_len],
                };
                rest = &rest[idx + term_len..];
                Some(line)
            }
            None => {
                done = true;
                Some(Line {
                    content: rest,
                    terminator: "",
                })
            }
        }
    })
}

/// Options for a rewrite pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Leave lines starting with `#` untouched. Default: true.
    pub skip_headers: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self { skip_headers: true }
    }
}

impl RewriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_headers(mut self, skip: bool) -> Self {
        self.skip_headers = skip;
        self
    }
}

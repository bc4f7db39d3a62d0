/// What `hearth_cli version` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub commit: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    /// Label/value pairs in display order.
    pub fn rows(&self) -> [(&'static str, &'static str); 3] {
        [
            ("Version", self.version),
            ("Commit", self.commit),
            ("Profile", self.profile),
        ]
    }
}

/// Metadata baked in at compile time; builds outside a git checkout report `unknown`.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("HEARTH_COMMIT").unwrap_or("unknown"),
        profile: option_env!("HEARTH_PROFILE").unwrap_or("unknown"),
    }
}

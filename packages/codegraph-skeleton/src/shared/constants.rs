//! Tuning constants and default ignore patterns, grouped by the subsystem that
//! consumes them.

/// Directory/path substrings excluded from project file discovery. Matched as
/// plain substrings, not globs — adequate for the standard exclusion list and
/// simpler than a glob engine.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "node_modules",
    ".pytest_cache",
    ".mypy_cache",
    "build",
    "dist",
    ".egg-info",
    ".tox",
];

pub mod symtab {
    /// Initial capacity hint for the id -> SymbolEntry map, sized for a
    /// medium project; growth beyond this is just a few reallocations.
    pub const INITIAL_SYMBOL_CAPACITY: usize = 1024;
    pub const INITIAL_FILE_CAPACITY: usize = 256;
}

pub mod hashing {
    /// blake3 digest length in bytes (256 bits).
    pub const HASH_LENGTH: usize = 32;
}

pub mod pipeline {
    /// Progress log emitted every N files during Pass 2.
    pub const PROGRESS_LOG_INTERVAL: usize = 50;
}

//! Upward directory search for the configuration root.
//!
//! Responsibilities:
//! - Find the first ancestor directory (inclusive) containing the config
//!   subdirectory.
//!
//! Does NOT handle:
//! - Reading or parsing anything inside the resolved directory (see loader).
//! - Choosing the subdirectory name (callers pass it in).
//!
//! Invariants:
//! - Side effects are limited to filesystem existence checks.
//! - The search terminates at the filesystem root, or after
//!   `MAX_UPWARD_STEPS` ascensions as a defensive fallback.

use std::path::{Path, PathBuf};

use crate::constants::MAX_UPWARD_STEPS;

/// Searches `start` and its ancestors for a directory containing `subdir`.
///
/// Returns the full path to `{ancestor}/{subdir}` for the nearest ancestor
/// (starting with `start` itself) where it exists, or `None` when the
/// filesystem root is reached without a match. `start` should be an absolute
/// path; the process typically passes its working directory here, which lets
/// a process started from any subdirectory of a project still find the
/// project's configuration root.
pub fn find_config_dir(start: &Path, subdir: &str) -> Option<PathBuf> {
    let mut base = start.to_path_buf();

    for _ in 0..MAX_UPWARD_STEPS {
        let candidate = base.join(subdir);
        if candidate.exists() {
            return Some(candidate);
        }
        match base.parent() {
            Some(parent) if parent != base => base = parent.to_path_buf(),
            _ => return None,
        }
    }

    None
}

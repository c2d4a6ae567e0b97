use std::path::{Path, PathBuf};

use tally_config::PROJECT_DIR;

/// Walk upwards from `start` until a `.tally` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

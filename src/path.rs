use std::path::{Path, PathBuf};

use crate::error::NotFound;

/// Map a request target onto an absolute path under the document root.
///
/// Targets ending in `/` (including the bare `/`) are pointed at that
/// directory's `index.html`. The target is then joined to the root and
/// normalized lexically: empty and `.` segments are dropped, `..` pops a
/// component and may walk above the root. The result is accepted only if
/// it is still inside the root after normalization; the containment
/// check runs on the normalized path, never the raw input.
///
/// Purely lexical; whether the path names an existing regular file is
/// checked later in the serving pipeline. Query strings get no special
/// treatment, so a target carrying `?` simply fails the file lookup.
pub fn resolve_target(root: &Path, target: &str) -> Result<PathBuf, NotFound> {
    let mut target = target.to_string();
    if target.ends_with('/') {
        target.push_str("index.html");
    }

    let mut resolved = root.to_path_buf();
    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            _ => resolved.push(part),
        }
    }

    if resolved.starts_with(root) {
        Ok(resolved)
    } else {
        Err(NotFound)
    }
}

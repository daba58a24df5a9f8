// Symlink expansion: every alias of a cursor role resolves to the same
// built artifact.

use std::fs;
use std::os::unix::fs as unix_fs;
use std::path::Path;

use crate::error::CursorResult;

/// Creates a relative symlink in `target_dir` for every alias other
/// than `resolved` itself, each pointing at the built cursor named
/// `resolved`. Existing entries win and are left untouched, so repeat
/// runs are safe. Returns the number of links created.
pub fn expand<S: AsRef<str>>(resolved: &str, aliases: &[S], target_dir: &Path) -> CursorResult<usize> {
    let mut created = 0;

    for alias in aliases {
        let alias = alias.as_ref();
        if alias == resolved {
            continue;
        }

        let link_path = target_dir.join(alias);
        // symlink_metadata also catches dangling links
        if fs::symlink_metadata(&link_path).is_ok() {
            continue;
        }

        unix_fs::symlink(resolved, &link_path)?;
        created += 1;
    }

    Ok(created)
}

use crate::errors::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically overwrites `path` with `content`.
///
/// Writes to a temp file in the target's parent directory, carries the
/// original permissions over, and persists it over the original. The file on
/// disk is therefore always either the old content or the new content in
/// full; an interrupted run never leaves a half-written file. Callers invoke
/// this only for files where at least one substitution actually happened.
pub fn commit(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| format!("Could not get parent directory for {}", path.display()))?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;

    // Preserve file permissions
    let perms = fs::metadata(path)?.permissions();
    fs::set_permissions(temp_file.path(), perms)?;

    temp_file.persist(path)?;
    Ok(())
}

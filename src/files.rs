use std::fs;
use std::io::Write;
use std::path;

use crate::error::*;

pub fn copy_file(src_file: &path::Path, dest_file: &path::Path) -> Result<()> {
    // create target directories if any exist
    if let Some(parent) = dest_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    log::debug!("Copying {} to {}", src_file.display(), dest_file.display());
    fs::copy(src_file, dest_file).with_context(|| {
        format!(
            "Could not copy {} into {}",
            src_file.display(),
            dest_file.display()
        )
    })?;
    Ok(())
}

/// Copy every file under `src_dir` into `dest_dir`, keeping the relative layout
///
/// Returns the number of files copied.
pub fn copy_dir(src_dir: &path::Path, dest_dir: &path::Path) -> Result<usize> {
    let mut count = 0;
    for entry in walkdir::WalkDir::new(src_dir)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to walk {}", src_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel_path = entry
            .path()
            .strip_prefix(src_dir)
            .expect("file was found under the root");
        copy_file(entry.path(), &dest_dir.join(rel_path))?;
        count += 1;
    }
    Ok(count)
}

pub fn write_document_file<S: AsRef<str>, P: AsRef<path::Path>>(
    content: S,
    dest_file: P,
) -> Result<()> {
    write_document_file_internal(content.as_ref(), dest_file.as_ref())
}

fn write_document_file_internal(content: &str, dest_file: &path::Path) -> Result<()> {
    // create target directories if any exist
    if let Some(parent) = dest_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    let mut file = fs::File::create(dest_file)
        .with_context(|| format!("Could not create {}", dest_file.display()))?;

    file.write_all(content.as_bytes())?;
    log::trace!("Wrote {}", dest_file.display());
    Ok(())
}

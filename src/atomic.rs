use camino::Utf8Path;
use std::fs::{self, File};
use std::io::{self, Write};

/// Writes `bytes` to `path` so that readers only ever see the old or the new
/// contents.
///
/// The data goes to a sibling `.tmp` file first, is synced, and then renamed
/// over the target. Missing parent directories are created.
pub(crate) fn write_atomic(path: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path.parent().filter(|p| !p.as_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir)?;
    }

    let tmp = path.with_extension("tmp");
    let result = (|| -> io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        // The target is untouched; only the scratch file needs to go.
        let _ = fs::remove_file(&tmp);
    }
    result?;

    // Persist the rename itself. Not every platform can open a directory.
    #[cfg(unix)]
    if let Some(dir) = parent {
        File::open(dir)?.sync_all()?;
    }

    Ok(())
}

use crate::error::Result;
use crate::log_debug;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn ensure_directory(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Reads a file as UTF-8, replacing invalid byte sequences with U+FFFD.
pub fn read_lossy(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Writes `content` to `dir/file_name`, creating `dir` first.
pub fn save_text(dir: impl AsRef<Path>, file_name: &str, content: &str) -> Result<PathBuf> {
    ensure_directory(&dir)?;

    let path = dir.as_ref().join(file_name);
    let mut file = File::create(&path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    log_debug!("[utils] Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}

/// Last run of digits in the file stem, e.g. `page-12.html` -> 12.
pub fn page_number(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    stem.split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .last()?
        .parse()
        .ok()
}

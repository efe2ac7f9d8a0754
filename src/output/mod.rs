//! Writing rendered output to files or stdout.

use crate::error::OutputError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write `content` to `path`, or to stdout when no path is given.
/// Missing parent directories are created.
pub fn emit(path: Option<&Path>, content: &str) -> Result<(), OutputError> {
    match path {
        Some(path) => write_file(path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| OutputError::Write {
                    path: "<stdout>".into(),
                    source,
                })
        }
    }
}

/// Like [`emit`] to a file, but refuses to replace an existing file unless
/// `force` is set.
pub fn create(path: &Path, content: &str, force: bool) -> Result<(), OutputError> {
    if path.exists() && !force {
        return Err(OutputError::Exists(path.to_path_buf()));
    }
    write_file(path, content)
}

fn write_file(path: &Path, content: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(OutputError::CreateDir)?;
    }
    fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

//! Directory skeleton and default configuration document.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use tracing::info;

use crate::domain::{
    AssistantConfig, ConfigOutcome, ConfigStatus, DirectoryOutcome, DirectoryStatus, Layout,
};
use crate::error::{Result, WorkspaceError};
use crate::port::{Event, Progress};

/// Create every working directory that does not exist yet.
///
/// Existing directories and their contents are left untouched. A path that
/// exists but is not a directory is an error.
pub fn ensure_directories<P: Progress + ?Sized>(
    layout: &Layout,
    progress: &P,
) -> Result<Vec<DirectoryOutcome>> {
    let mut outcomes = Vec::new();

    for path in layout.directories() {
        let status = if path.is_dir() {
            DirectoryStatus::Existing
        } else if path.exists() {
            return Err(WorkspaceError::NotADirectory { path }.into());
        } else {
            fs::create_dir_all(&path).map_err(|source| WorkspaceError::Create {
                path: path.clone(),
                source,
            })?;
            DirectoryStatus::Created
        };

        progress.notify(Event::Directory {
            path: path.clone(),
            status,
        });
        outcomes.push(DirectoryOutcome { path, status });
    }

    Ok(outcomes)
}

/// Write `document` to the configuration path unless a file is already there.
///
/// The document is written to a temporary file next to the target and then
/// linked into place without clobbering, so an existing (possibly edited)
/// document is never truncated and a failed write leaves nothing behind.
pub fn ensure_default_config<P: Progress + ?Sized>(
    layout: &Layout,
    document: &AssistantConfig,
    progress: &P,
) -> Result<ConfigOutcome> {
    let path = layout.config_file();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| WorkspaceError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let status = if path.exists() {
        ConfigStatus::AlreadyExists
    } else {
        let contents = document.to_pretty_json()?;
        let created = create_new_atomically(&path, |file| file.write_all(contents.as_bytes()))
            .map_err(|source| WorkspaceError::Create {
                path: path.clone(),
                source,
            })?;
        if created {
            info!(path = %path.display(), "Default configuration written");
            ConfigStatus::Created
        } else {
            ConfigStatus::AlreadyExists
        }
    };

    progress.notify(Event::Config {
        path: path.clone(),
        status,
    });
    Ok(ConfigOutcome { path, status })
}

/// Create `path` with the bytes produced by `write`, or return `false` if it
/// already exists.
///
/// The file only appears once it is complete and synced. On error the
/// temporary file is removed and `path` is left as it was.
fn create_new_atomically<F>(path: &Path, write: F) -> io::Result<bool>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::Builder::new()
        .prefix(".config-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;

    match temp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error),
    }
}

//! Backup-then-overwrite commit sequence

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::error::{Error, Result};
use crate::path::ConfigPath;
use crate::perms::{FileCapability, Permissions};

/// Read a rules file, normalizing CR characters out of the content.
///
/// Editors on some hosts leave `^M` behind; every downstream offset
/// computation assumes plain `\n` line endings.
pub fn read_config(path: &ConfigPath) -> Result<String> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path.as_path(), e))?;
    Ok(raw.replace('\r', ""))
}

/// Overwrite a file under an exclusive lock, truncating in place.
///
/// Creates the file when it does not exist. The byte count on disk is
/// verified afterwards; a short write on non-empty content is an error.
pub fn write_locked(path: &ConfigPath, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path.as_path(), e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.as_path().to_path_buf(),
    })?;

    let outcome = file
        .write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(path.as_path(), e));
    let _ = FileExt::unlock(&file);
    outcome?;

    let written = fs::metadata(path)
        .map_err(|e| Error::io(path.as_path(), e))?
        .len();
    let expected = content.len() as u64;
    if written < expected {
        return Err(Error::ShortWrite {
            path: path.as_path().to_path_buf(),
            written,
            expected,
        });
    }
    Ok(())
}

/// Commit new content to a rules file.
///
/// Requires read+write capability and copies the live file to its backup
/// path first; the overwrite never proceeds without a fresh backup. With
/// `cleanup` set, surrounding whitespace and form-layer backslash escapes
/// are stripped from `content` before writing.
///
/// There is no rollback from the backup on a failed write; the error
/// carries the backup path so the admin can restore by hand.
pub fn commit(
    path: &ConfigPath,
    capability: FileCapability,
    content: &str,
    cleanup: bool,
) -> Result<()> {
    if !capability.is_able(Permissions::READABLE) {
        return Err(Error::NotReadable {
            path: path.as_path().to_path_buf(),
        });
    }
    if !capability.is_able(Permissions::WRITABLE) {
        return Err(Error::NotWritable {
            path: path.as_path().to_path_buf(),
        });
    }

    let backup = path.backup_path();
    fs::copy(path, &backup).map_err(|source| Error::BackupFailed {
        path: path.as_path().to_path_buf(),
        backup: backup.clone(),
        source,
    })?;
    tracing::debug!(path = %path, backup = %backup.display(), "Backed up rules file");

    let content = if cleanup {
        cleanup_input(content)
    } else {
        content.to_string()
    };
    write_locked(path, &content)
}

/// Trim surrounding whitespace and undo backslash escaping added by the
/// form layer.
pub fn cleanup_input(input: &str) -> String {
    strip_slashes(input.trim())
}

/// Remove one level of backslash escaping: `\x` becomes `x`.
fn strip_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

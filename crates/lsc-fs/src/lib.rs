//! Filesystem layer for the LSCache admin module
//!
//! Provides rules-file path resolution, the per-request permission
//! capability probe, and the backup-then-overwrite commit sequence used
//! by the rules editor and the report writer.

pub mod commit;
pub mod error;
pub mod path;
pub mod perms;

pub use commit::{cleanup_input, commit, read_config, write_locked};
pub use error::{Error, Result};
pub use path::{BACKUP_SUFFIX, ConfigPath, RULES_FILE_NAME, SitePaths};
pub use perms::{FileCapability, Permissions};

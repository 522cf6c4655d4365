//! Guarded report persistence

use std::path::Path;

use lsc_fs::{ConfigPath, write_locked};

/// File the report is written to inside the plugin directory.
pub const REPORT_FILE_NAME: &str = "environment_report.php";

/// Guard header that stops the report from executing when fetched as PHP.
const EXECUTION_GUARD: &str = "<?php die();?>\n\n";

/// Persist the report under its execution guard.
///
/// The report is best-effort diagnostics: a host that refuses the write
/// gets a log line, not an admin-facing error.
pub fn write_report(plugin_dir: &Path, report: &str) {
    let path = ConfigPath::new(plugin_dir.join(REPORT_FILE_NAME));
    let guarded = format!("{EXECUTION_GUARD}{report}");
    if let Err(e) = write_locked(&path, &guarded) {
        tracing::warn!(path = %path, "Could not write the environment report: {e}");
    }
}

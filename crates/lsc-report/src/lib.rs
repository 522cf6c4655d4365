//! Environment report generation for the LSCache admin module
//!
//! Assembles a plain-text diagnostic report from server variables,
//! plugin options, and CMS metadata, with the verbatim contents of the
//! installation's rules files attached, and persists it behind an
//! execution guard inside the plugin directory.

pub mod report;
pub mod writer;

pub use report::{ReportEntry, SERVER_VAR_KEYS, build_report, generate};
pub use writer::{REPORT_FILE_NAME, write_report};

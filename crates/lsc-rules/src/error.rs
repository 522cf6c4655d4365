//! Error types for lsc-rules

use std::path::PathBuf;

/// Result type for lsc-rules operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or editing the rules file.
///
/// Every variant renders as a sentence suitable for verbatim display in
/// an admin notice; nothing here is meant to be caught and matched on by
/// message text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Section opened but never closed
    #[error("Could not find IfModule close.")]
    UnclosedSection,

    /// Rule block opened but never closed
    #[error("Could not find wrapper end for {wrapper}.")]
    UnclosedWrapper { wrapper: String },

    /// End marker precedes the start marker
    #[error("Wrapper start for {wrapper} was found after its end.")]
    MarkersOutOfOrder { wrapper: String },

    /// Block present but its rule line does not match the grammar
    #[error("Did not find a rule match in {wrapper}.")]
    RuleSyntax { wrapper: String },

    /// Login cookie may only contain alphanumerics, `-`, and `_`
    #[error("Invalid login cookie. Invalid characters found.")]
    InvalidLoginCookie,

    /// Site rules file committed but the home file overwrite failed
    #[error(
        "Failed to overwrite {path} after its counterpart was already updated; \
         restore both files from their _lscachebak backups."
    )]
    PartialCommit { path: PathBuf },

    /// Filesystem failure from the layer below
    #[error(transparent)]
    Fs(#[from] lsc_fs::Error),
}

//! Site metadata and notice collaborators for the LSCache admin module
//!
//! The admin module does not talk to the CMS directly: it sees plugin
//! options, theme/plugin metadata, and the notice display only through
//! the seams defined here.

pub mod error;
pub mod notice;
pub mod options;
pub mod site;

pub use error::{Error, Result};
pub use notice::{CollectedNotices, NoticeSink, Severity};
pub use options::{OptionValue, PluginOptions, opt};
pub use site::{SiteMetadata, StaticSite};

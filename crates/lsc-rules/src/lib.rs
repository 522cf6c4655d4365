//! Rewrite-rules file editing for the LSCache admin module
//!
//! The rules file (`.htaccess`) is shared with the site admin: the plugin
//! owns exactly one `<IfModule LiteSpeed>` section and, inside it, a set
//! of named rule blocks bounded by `###LSCACHE START ...###` markers.
//! Everything in this crate is about locating, replacing, and reinserting
//! those spans without disturbing the surrounding hand-written content.

pub mod apply;
pub mod editor;
pub mod error;
pub mod markers;
pub mod reader;
pub mod section;
pub mod splice;

pub use apply::{ApplyOutcome, CommonRewrites, apply_common_rules};
pub use editor::RulesEditor;
pub use error::{Error, Result};
pub use reader::{RewriteParts, read_condition, read_rewrite};
pub use section::{SectionScan, find_section};
pub use splice::{Rule, SpliceResult, set_rule};

//! Admin orchestration for the LSCache rewrite-rules module
//!
//! Sits above the layer crates and wires them together per admin
//! request:
//!
//! ```text
//!            admin request (form post / options save)
//!                             |
//!                         lsc-admin
//!                             |
//!          +---------+--------+--------+----------+
//!          |         |                 |          |
//!       lsc-fs   lsc-rules         lsc-site   lsc-report
//! ```

pub mod form;
pub mod report;
pub mod settings;

pub use form::{EditSubmission, SAVE_ACTION, handle_edit_submission};
pub use report::refresh_environment_report;
pub use settings::{common_rewrites_of, update_rewrite_options};

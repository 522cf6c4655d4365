//! Edit-form submission handling

use lsc_rules::RulesEditor;
use lsc_site::{NoticeSink, Severity};

/// Literal action name the save form must carry.
pub const SAVE_ACTION: &str = "save_htaccess";

/// A parsed admin form submission.
///
/// The nonce/referer check happens in the request layer; only its
/// verdict travels here.
#[derive(Debug, Clone)]
pub struct EditSubmission {
    /// Action name from the form post.
    pub action: String,
    /// Whether the nonce/referer check passed upstream.
    pub verified: bool,
    /// Raw editor text to persist verbatim.
    pub editor_text: String,
}

/// Handle the rules-file edit form.
///
/// The submission is ignored, with no notice and no write, unless the
/// action name matches literally, the nonce check passed, and the editor
/// carried text. An attempted save emits exactly one notice either way.
pub fn handle_edit_submission(
    editor: &RulesEditor,
    submission: &EditSubmission,
    notices: &mut dyn NoticeSink,
) {
    if submission.action != SAVE_ACTION
        || !submission.verified
        || submission.editor_text.is_empty()
    {
        return;
    }

    match editor.save_raw(&submission.editor_text) {
        Ok(()) => notices.notify(Severity::Success, "File saved."),
        Err(e) => {
            tracing::warn!("Rules-file save from the edit form failed: {e}");
            notices.notify(Severity::Error, &e.to_string());
        }
    }
}

//! Rules-file editor
//!
//! Owns the paths and the probed capability for one admin request and
//! exposes the read, save, apply, and clear operations over them.

use lsc_fs::{FileCapability, Permissions, SitePaths, commit, read_config};

use crate::apply::{ApplyOutcome, CommonRewrites, apply_common_rules};
use crate::error::{Error, Result};
use crate::markers::wrapper;
use crate::reader::{self, RewriteParts};
use crate::section::{SectionScan, find_section};
use crate::splice::{Rule, set_rule};

/// Editor over an installation's rules file(s).
pub struct RulesEditor {
    paths: SitePaths,
    capability: FileCapability,
}

impl RulesEditor {
    /// Probe capabilities for the given paths once and build an editor.
    pub fn new(paths: SitePaths) -> Self {
        let capability = FileCapability::probe(&paths);
        Self { paths, capability }
    }

    /// Build an editor with a pre-computed capability.
    pub fn with_capability(paths: SitePaths, capability: FileCapability) -> Self {
        Self { paths, capability }
    }

    pub fn paths(&self) -> &SitePaths {
        &self.paths
    }

    pub fn capability(&self) -> FileCapability {
        self.capability
    }

    /// Contents of the home rules file, CR-normalized.
    pub fn contents(&self) -> Result<String> {
        if !self.capability.is_able(Permissions::READABLE) {
            return Err(Error::Fs(lsc_fs::Error::NotReadable {
                path: self.paths.home().as_path().to_path_buf(),
            }));
        }
        Ok(read_config(self.paths.home())?)
    }

    /// Persist admin-authored text verbatim, modulo trim/unslash cleanup.
    ///
    /// This is the edit-form path: it bypasses the rule-block machinery
    /// entirely and trusts the admin's text.
    pub fn save_raw(&self, text: &str) -> Result<()> {
        commit(self.paths.home(), self.capability, text, true)?;
        tracing::debug!(path = %self.paths.home(), "Saved admin-authored rules file");
        Ok(())
    }

    /// Apply the admin's rewrite settings; see [`apply_common_rules`].
    pub fn apply(&self, input: &CommonRewrites, current: &CommonRewrites) -> ApplyOutcome {
        apply_common_rules(self, input, current)
    }

    /// Read back the condition pattern of a named condition block.
    pub fn condition_value(&self, wrapper: &str, server_var: &str) -> Result<Option<String>> {
        let content = self.contents()?;
        reader::read_condition(&content, wrapper, server_var)
    }

    /// Read back the match/substitution/environment triple of a named
    /// direct rule block.
    pub fn rewrite_rule(&self, wrapper: &str) -> Result<Option<RewriteParts>> {
        let content = self.contents()?;
        reader::read_rewrite(&content, wrapper)
    }

    /// Strip the common managed blocks and rewrite the file.
    ///
    /// This is the deactivation path: a file without our section, or one
    /// we cannot touch, is already "clear", so those cases return quietly.
    pub fn clear(&self) -> Result<()> {
        if !self.capability.is_able(Permissions::RW) {
            return Ok(());
        }
        let Ok(content) = read_config(self.paths.home()) else {
            return Ok(());
        };
        let Ok(SectionScan::Found {
            preamble,
            body,
            resume_at,
        }) = find_section(&content)
        else {
            return Ok(());
        };

        let mut body = Some(body);
        let mut output = preamble;
        for name in [wrapper::MOBILE_VIEW, wrapper::COOKIE, wrapper::USER_AGENT] {
            let delete = Rule::condition(name, "", "", "");
            // A malformed block stays in place; the others are still removed.
            if let Ok(result) = set_rule(body.as_deref(), &delete) {
                result.adopt(&mut body, &mut output);
            }
        }

        let new_content = format!(
            "{output}{}{}",
            body.unwrap_or_default(),
            &content[resume_at..]
        );
        commit(self.paths.home(), self.capability, &new_content, true)?;
        Ok(())
    }
}

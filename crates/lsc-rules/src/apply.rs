//! Batch application of the admin-configured rewrite rules

use lsc_fs::{ConfigPath, Permissions, commit, read_config};

use crate::editor::RulesEditor;
use crate::error::{Error, Result};
use crate::markers::{SECTION_CLOSE, wrapper};
use crate::section::{SectionScan, find_section};
use crate::splice::{Rule, set_rule};

/// Environment tag applied when the mobile user-agent condition matches.
pub const ENV_VARY_MOBILE: &str = "E=Cache-Control:vary=ismobile";

/// Environment tag that excludes a request from the cache.
pub const ENV_NO_CACHE: &str = "E=Cache-Control:no-cache";

/// The rewrite-managed settings, as the admin configures them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonRewrites {
    pub mobile_view_enabled: bool,
    /// User-agent alternation for the mobile-view condition.
    pub mobile_view_agents: String,
    /// Newline-separated cookie names that must bypass the cache.
    pub nocache_cookies: String,
    /// User-agent alternation that must bypass the cache.
    pub nocache_useragents: String,
    /// Cookie name the cache varies on for logged-in users.
    pub login_cookie: String,
}

/// Result of a batch rule application.
///
/// Per-block failures do not stop the batch; they accumulate here while
/// the remaining blocks are still processed and committed.
#[derive(Debug)]
pub struct ApplyOutcome {
    /// Settings as actually persisted; steps that failed keep their
    /// previous value.
    pub applied: CommonRewrites,
    /// Errors collected along the way, for verbatim display to the admin.
    pub errors: Vec<Error>,
}

impl ApplyOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Apply the admin's rewrite settings to the rules file(s).
///
/// Short-circuits without touching the filesystem when nothing under
/// rewrite management changed. Fatal preconditions (unreadable file,
/// no write capability, malformed section) abort the whole batch; a
/// failure in one rule block is recorded and the rest still commit.
pub fn apply_common_rules(
    editor: &RulesEditor,
    input: &CommonRewrites,
    current: &CommonRewrites,
) -> ApplyOutcome {
    if !input.mobile_view_enabled
        && !current.mobile_view_enabled
        && input.nocache_cookies == current.nocache_cookies
        && input.nocache_useragents == current.nocache_useragents
    {
        return ApplyOutcome {
            applied: current.clone(),
            errors: Vec::new(),
        };
    }

    let mut errors = Vec::new();
    match apply_inner(editor, input, current, &mut errors) {
        Ok(applied) => ApplyOutcome { applied, errors },
        Err(fatal) => {
            errors.push(fatal);
            ApplyOutcome {
                applied: current.clone(),
                errors,
            }
        }
    }
}

fn apply_inner(
    editor: &RulesEditor,
    input: &CommonRewrites,
    current: &CommonRewrites,
    errors: &mut Vec<Error>,
) -> Result<CommonRewrites> {
    let content = editor.contents()?;
    if !editor.capability().is_able(Permissions::WRITABLE) {
        return Err(Error::Fs(lsc_fs::Error::NotWritable {
            path: editor.paths().home().as_path().to_path_buf(),
        }));
    }

    let (mut output, mut body, resume_at) = match find_section(&content)? {
        SectionScan::Missing { preamble } => (preamble, None, None),
        SectionScan::Found {
            preamble,
            body,
            resume_at,
        } => (preamble, Some(body), Some(resume_at)),
    };

    let mut applied = current.clone();

    // Mobile view: enable rewrites the block, disable deletes it.
    if input.mobile_view_enabled {
        applied.mobile_view_enabled = true;
        applied.mobile_view_agents = input.mobile_view_agents.clone();
        let rule = Rule::condition_with_flags(
            wrapper::MOBILE_VIEW,
            "HTTP_USER_AGENT",
            &input.mobile_view_agents,
            ENV_VARY_MOBILE,
            "NC",
        );
        stage(&mut body, &mut output, &rule, errors);
    } else if current.mobile_view_enabled {
        applied.mobile_view_enabled = false;
        let rule = Rule::condition(wrapper::MOBILE_VIEW, "HTTP_USER_AGENT", "", "");
        stage(&mut body, &mut output, &rule, errors);
    }

    // No-cache cookies: the admin types one per line, the condition
    // wants a single alternation.
    applied.nocache_cookies = input.nocache_cookies.clone();
    let cookie_rule = Rule::condition(
        wrapper::COOKIE,
        "HTTP_COOKIE",
        join_lines(&input.nocache_cookies),
        ENV_NO_CACHE,
    );
    stage(&mut body, &mut output, &cookie_rule, errors);

    // No-cache user agents.
    applied.nocache_useragents = input.nocache_useragents.clone();
    let agent_rule = Rule::condition(
        wrapper::USER_AGENT,
        "HTTP_USER_AGENT",
        &input.nocache_useragents,
        ENV_NO_CACHE,
    );
    stage(&mut body, &mut output, &agent_rule, errors);

    // Login cookie: staged against scratch copies so a failure anywhere
    // in its multi-file logic leaves the home-file batch untouched.
    let mut secondary: SecondaryStage = None;
    let before_login = (body.clone(), output.clone());
    match stage_login_cookie(
        editor,
        &mut body,
        &mut output,
        &input.login_cookie,
        &current.login_cookie,
    ) {
        Ok(staged) => {
            if staged.is_some() {
                applied.login_cookie = input.login_cookie.clone();
            }
            secondary = staged.flatten();
        }
        Err(e) => errors.push(e),
    }

    let new_content = reassemble(&output, body.as_deref(), &content, resume_at);

    // Two-phase commit: the site copy goes first; the home file is only
    // written once it has landed. A home-file failure after that point
    // is a partial commit and is reported as such.
    if let Some((path, staged_content)) = &secondary {
        if let Err(e) = commit(path, editor.capability(), staged_content, false) {
            // Abandon the login-cookie update but keep the rest of the
            // batch: rebuild the home content without it.
            applied.login_cookie = current.login_cookie.clone();
            errors.push(Error::Fs(e));
            let (body, output) = before_login;
            let fallback = reassemble(&output, body.as_deref(), &content, resume_at);
            return commit_home(editor, &fallback, false).map(|()| applied);
        }
    }

    commit_home(editor, &new_content, secondary.is_some()).map(|()| applied)
}

/// Join output, remaining body, and the tail beyond the section, or,
/// when no section existed, close the freshly synthesized one above the
/// original content.
fn reassemble(output: &str, body: Option<&str>, content: &str, resume_at: Option<usize>) -> String {
    match (body, resume_at) {
        (Some(body), Some(at)) => format!("{output}{body}{}", &content[at..]),
        _ => format!("{output}{SECTION_CLOSE}\n\n{content}"),
    }
}

fn commit_home(editor: &RulesEditor, content: &str, site_committed: bool) -> Result<()> {
    commit(editor.paths().home(), editor.capability(), content, false).map_err(|e| {
        if site_committed {
            tracing::warn!(
                home = %editor.paths().home(),
                "Home rules file failed after the site copy was updated: {e}"
            );
            Error::PartialCommit {
                path: editor.paths().home().as_path().to_path_buf(),
            }
        } else {
            Error::Fs(e)
        }
    })
}

/// Splice one rule into the running (body, output) pair, recording a
/// failure without stopping the batch.
fn stage(body: &mut Option<String>, output: &mut String, rule: &Rule, errors: &mut Vec<Error>) {
    match set_rule(body.as_deref(), rule) {
        Ok(result) => result.adopt(body, output),
        Err(e) => errors.push(e),
    }
}

/// Staged content for the secondary rules file of a subdirectory install.
type SecondaryStage = Option<(ConfigPath, String)>;

/// Splice the login-cookie block into the home body and, on subdirectory
/// installs, stage the mirrored block for the site rules file.
///
/// Returns `Ok(None)` when there is nothing to do (no cookie configured
/// before or now). `Ok(Some(None))` means the home splice happened with
/// no secondary file involved.
fn stage_login_cookie(
    editor: &RulesEditor,
    body: &mut Option<String>,
    output: &mut String,
    input: &str,
    current: &str,
) -> Result<Option<SecondaryStage>> {
    if input.is_empty() && current.is_empty() {
        return Ok(None);
    }
    if !input.is_empty() && !is_valid_cookie_name(input) {
        return Err(Error::InvalidLoginCookie);
    }

    let rule = if input.is_empty() {
        // Deletion: empty pattern strips the block everywhere.
        Rule::direct(wrapper::LOGIN_COOKIE, "", "", "")
    } else {
        Rule::direct(
            wrapper::LOGIN_COOKIE,
            ".*",
            "-",
            format!("E=Cache-Vary:{input}"),
        )
    };

    // Home-file splice, on scratch copies until the whole staging holds.
    let mut staged_body = body.clone();
    let mut staged_output = output.clone();
    set_rule(staged_body.as_deref(), &rule)?.adopt(&mut staged_body, &mut staged_output);

    let secondary = if editor.paths().is_subdir_install() {
        Some(stage_site_copy(editor.paths().site(), &rule)?)
    } else {
        None
    };

    *body = staged_body;
    *output = staged_output;
    Ok(Some(secondary))
}

/// Build the full new content of the site rules file with the mirrored
/// login-cookie block spliced into its own, independently located,
/// managed section.
fn stage_site_copy(path: &ConfigPath, rule: &Rule) -> Result<(ConfigPath, String)> {
    let content = read_config(path)?;

    let (mut output, mut body, resume_at) = match find_section(&content)? {
        SectionScan::Missing { preamble } => (preamble, None, None),
        SectionScan::Found {
            preamble,
            body,
            resume_at,
        } => (preamble, Some(body), Some(resume_at)),
    };
    set_rule(body.as_deref(), rule)?.adopt(&mut body, &mut output);

    let staged = reassemble(&output, body.as_deref(), &content, resume_at);
    Ok((path.clone(), staged))
}

/// Cookie names are restricted to alphanumerics plus `-` and `_`.
fn is_valid_cookie_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Collapse newline-separated admin input into a `|` alternation.
fn join_lines(input: &str) -> String {
    input
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}

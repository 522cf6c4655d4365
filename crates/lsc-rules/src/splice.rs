//! Rule rendering and block splicing

use crate::error::{Error, Result};
use crate::markers::{wrapper_end, wrapper_start};

/// A managed rewrite rule, rendered between its wrapper markers.
///
/// Both variants share the locate/replace/no-op splice semantics of
/// [`set_rule`]; they differ only in the directive lines rendered inside
/// the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `RewriteCond %{VAR} pattern [flags]` guarding an environment tag.
    Condition {
        wrapper: String,
        server_var: String,
        pattern: String,
        env: String,
        flags: String,
    },
    /// Direct `RewriteRule pattern substitution [env]`.
    Direct {
        wrapper: String,
        pattern: String,
        substitution: String,
        env: String,
    },
}

impl Rule {
    pub fn condition(
        wrapper: impl Into<String>,
        server_var: impl Into<String>,
        pattern: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        Self::condition_with_flags(wrapper, server_var, pattern, env, "")
    }

    pub fn condition_with_flags(
        wrapper: impl Into<String>,
        server_var: impl Into<String>,
        pattern: impl Into<String>,
        env: impl Into<String>,
        flags: impl Into<String>,
    ) -> Self {
        Self::Condition {
            wrapper: wrapper.into(),
            server_var: server_var.into(),
            pattern: pattern.into(),
            env: env.into(),
            flags: flags.into(),
        }
    }

    pub fn direct(
        wrapper: impl Into<String>,
        pattern: impl Into<String>,
        substitution: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        Self::Direct {
            wrapper: wrapper.into(),
            pattern: pattern.into(),
            substitution: substitution.into(),
            env: env.into(),
        }
    }

    pub fn wrapper(&self) -> &str {
        match self {
            Self::Condition { wrapper, .. } | Self::Direct { wrapper, .. } => wrapper,
        }
    }

    /// The match pattern; an empty pattern turns a splice into a delete.
    pub fn pattern(&self) -> &str {
        match self {
            Self::Condition { pattern, .. } | Self::Direct { pattern, .. } => pattern,
        }
    }

    /// Render the block, wrapper markers included, with a trailing newline.
    pub fn render(&self) -> String {
        let begin = wrapper_start(self.wrapper());
        let end = wrapper_end(self.wrapper());
        match self {
            Self::Condition {
                server_var,
                pattern,
                env,
                flags,
                ..
            } => {
                let mut cond = format!("RewriteCond %{{{server_var}}} {pattern}");
                if !flags.is_empty() {
                    cond.push_str(" [");
                    cond.push_str(flags);
                    cond.push(']');
                }
                format!("{begin}\n{cond}\nRewriteRule .* - [{env}]\n{end}\n")
            }
            Self::Direct {
                pattern,
                substitution,
                env,
                ..
            } => {
                format!("{begin}\nRewriteRule {pattern} {substitution} [{env}]\n{end}\n")
            }
        }
    }
}

/// Outcome of a splice against a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceResult {
    /// No wrapper markers were present; nothing was removed from the body.
    Absent {
        /// The freshly rendered block, or `None` for a no-op delete.
        rendered: Option<String>,
    },
    /// The old block was cut out of the body.
    Removed {
        /// Body with the old block removed and surrounding whitespace
        /// trimmed.
        remainder: String,
        /// The freshly rendered replacement, or `None` for a delete.
        rendered: Option<String>,
    },
}

impl SpliceResult {
    /// Fold the result into a running `(body, output)` pair: append the
    /// rendered block (if any) to `output` and adopt the reduced body.
    pub fn adopt(self, body: &mut Option<String>, output: &mut String) {
        match self {
            Self::Absent { rendered } => {
                if let Some(block) = rendered {
                    output.push_str(&block);
                }
            }
            Self::Removed {
                remainder,
                rendered,
            } => {
                if let Some(block) = rendered {
                    output.push_str(&block);
                }
                *body = Some(remainder);
            }
        }
    }
}

/// Replace, insert, or delete one managed rule block.
///
/// `body` is the current section body, or `None` when the section is
/// being created from scratch. The old block is always cut out in full,
/// marker to marker, so that re-appending the rendered replacement can
/// never duplicate it. An empty rule pattern deletes the block instead
/// of re-rendering it; deleting a block that was never written is a
/// no-op, not an error.
pub fn set_rule(body: Option<&str>, rule: &Rule) -> Result<SpliceResult> {
    let rendered = (!rule.pattern().is_empty()).then(|| rule.render());

    let Some(body) = body else {
        return Ok(SpliceResult::Absent { rendered });
    };
    let begin = wrapper_start(rule.wrapper());
    let Some(begin_at) = body.find(&begin) else {
        return Ok(SpliceResult::Absent { rendered });
    };

    let end = wrapper_end(rule.wrapper());
    let after_begin = begin_at + begin.len();
    let end_at = body[after_begin..]
        .find(&end)
        .map(|i| after_begin + i)
        .ok_or_else(|| Error::UnclosedWrapper {
            wrapper: rule.wrapper().to_string(),
        })?;

    let mut remainder = String::with_capacity(body.len());
    remainder.push_str(&body[..begin_at]);
    remainder.push_str(&body[end_at + end.len()..]);

    Ok(SpliceResult::Removed {
        remainder: remainder.trim().to_string(),
        rendered,
    })
}

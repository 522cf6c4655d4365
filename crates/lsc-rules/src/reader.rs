//! Rule-block readers
//!
//! Pattern extraction against the fixed rule grammar lives here, behind
//! its own contract, so grammar changes do not ripple into the splicing
//! logic.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::markers::{wrapper_end, wrapper_start};

/// `RewriteRule <pattern> <substitution> [E=tag]` extractor; the
/// environment group is optional.
static REWRITE_RULE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RewriteRule\s+(\S+)\s+(\S+)(?:\s+\[E=([^\]\s]*)\])?").unwrap()
});

/// Fields of a direct rewrite rule read back from its block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteParts {
    pub pattern: String,
    pub substitution: String,
    /// Environment tag without the `E=` prefix; empty when absent.
    pub env: String,
}

/// Read back the condition pattern of a named condition block.
///
/// Returns `Ok(None)` when the block has not been written yet; an
/// unconfigured rule is not an error.
pub fn read_condition(content: &str, wrapper: &str, server_var: &str) -> Result<Option<String>> {
    let Some(block) = wrapper_slice(content, wrapper)? else {
        return Ok(None);
    };
    let pattern = format!(
        r"RewriteCond\s%\{{{}\}}\s+([^\[\n]*)\s+\[?",
        regex::escape(server_var)
    );
    let re = Regex::new(&pattern).map_err(|_| Error::RuleSyntax {
        wrapper: wrapper.to_string(),
    })?;
    let caps = re.captures(block).ok_or_else(|| Error::RuleSyntax {
        wrapper: wrapper.to_string(),
    })?;
    let value = caps
        .get(1)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Ok(Some(value))
}

/// Read back the match/substitution/environment triple of a named direct
/// rule block. `Ok(None)` when the block has not been written yet.
pub fn read_rewrite(content: &str, wrapper: &str) -> Result<Option<RewriteParts>> {
    let Some(block) = wrapper_slice(content, wrapper)? else {
        return Ok(None);
    };
    let caps = REWRITE_RULE_PATTERN
        .captures(block)
        .ok_or_else(|| Error::RuleSyntax {
            wrapper: wrapper.to_string(),
        })?;
    Ok(Some(RewriteParts {
        pattern: caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        substitution: caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        env: caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    }))
}

/// The text strictly between a block's markers, or `None` when the start
/// marker is absent. A start marker without an end, or markers in the
/// wrong order, is a parse error.
fn wrapper_slice<'a>(content: &'a str, wrapper: &str) -> Result<Option<&'a str>> {
    let begin = wrapper_start(wrapper);
    let Some(begin_at) = content.find(&begin) else {
        return Ok(None);
    };
    let end = wrapper_end(wrapper);
    let end_at = content.find(&end).ok_or_else(|| Error::UnclosedWrapper {
        wrapper: wrapper.to_string(),
    })?;

    let inner_start = begin_at + begin.len();
    if inner_start >= end_at {
        return Err(Error::MarkersOutOfOrder {
            wrapper: wrapper.to_string(),
        });
    }
    Ok(Some(&content[inner_start..end_at]))
}

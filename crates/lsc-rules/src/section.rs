//! Outer-section locator

use crate::error::{Error, Result};
use crate::markers::{ENGINE_DIRECTIVE, SECTION_CLOSE, SECTION_OPEN};

/// Result of scanning content for the plugin-managed section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionScan {
    /// No section yet; `preamble` is the synthesized header to start one.
    Missing {
        preamble: String,
    },
    Found {
        /// Everything up to and including the engine-directive line, ready
        /// for freshly rendered blocks to be appended.
        preamble: String,
        /// Raw text between the insertion point and the line before the
        /// close marker.
        body: String,
        /// Offset at which the content beyond the section body resumes;
        /// reassembly re-emits `content[resume_at..]` after the new body.
        resume_at: usize,
    },
}

/// Locate the plugin-managed section in `content`.
///
/// A missing open marker is not an error: the section has simply never
/// been written, and a minimal header is synthesized for the caller to
/// build on. An open marker without a matching close is a parse error.
/// The engine directive is matched case-insensitively inside the section;
/// when absent it is injected into the preamble right after the open
/// marker.
pub fn find_section(content: &str) -> Result<SectionScan> {
    let Some(open_at) = content.find(SECTION_OPEN) else {
        return Ok(SectionScan::Missing {
            preamble: format!("{SECTION_OPEN}\n{ENGINE_DIRECTIVE}\n"),
        });
    };
    let after_open = open_at + SECTION_OPEN.len();

    let close_at = content[after_open..]
        .find(SECTION_CLOSE)
        .map(|i| after_open + i)
        .ok_or(Error::UnclosedSection)?;
    // Step back over the newline preceding the close marker so that
    // reassembly re-emits it together with the marker.
    let resume_at = prev_char_boundary(content, close_at).max(after_open);

    let section = &content[after_open..resume_at];
    let (preamble, body_start) = match find_ignore_ascii_case(section, ENGINE_DIRECTIVE) {
        Some(rel) => {
            let directive_end = after_open + rel + ENGINE_DIRECTIVE.len();
            let insert_at = if content[directive_end..].starts_with('\n') {
                directive_end + 1
            } else {
                directive_end
            };
            (content[..insert_at].to_string(), insert_at)
        }
        None => (
            format!("{}\n{ENGINE_DIRECTIVE}\n", &content[..after_open]),
            after_open,
        ),
    };

    // With the directive as the section's last line the insertion point
    // lands past `resume_at`; the body is simply empty then.
    Ok(SectionScan::Found {
        preamble,
        body: content[body_start.min(resume_at)..resume_at].to_string(),
        resume_at,
    })
}

/// Byte offset of the last char boundary strictly before `idx`.
fn prev_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.saturating_sub(1);
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// ASCII case-insensitive `find`; offsets stay valid because ASCII
/// lowercasing never changes byte lengths.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_section_synthesizes_header() {
        let scan = find_section("# hand-written rules\n").unwrap();
        assert_eq!(
            scan,
            SectionScan::Missing {
                preamble: "<IfModule LiteSpeed>\nRewriteEngine on\n".to_string(),
            }
        );
    }

    #[test]
    fn synthesized_header_is_deterministic() {
        let a = find_section("").unwrap();
        let b = find_section("anything at all\n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn found_section_splits_body_and_tail() {
        let content = "<IfModule LiteSpeed>\nRewriteEngine on\nbody line\n</IfModule>\ntail\n";
        let SectionScan::Found {
            preamble,
            body,
            resume_at,
        } = find_section(content).unwrap()
        else {
            panic!("section should be found");
        };
        assert_eq!(preamble, "<IfModule LiteSpeed>\nRewriteEngine on\n");
        assert_eq!(body, "body line");
        assert_eq!(&content[resume_at..], "\n</IfModule>\ntail\n");
    }

    #[test]
    fn engine_directive_is_matched_case_insensitively() {
        let content = "<IfModule LiteSpeed>\nrewriteengine ON\nbody\n</IfModule>\n";
        let SectionScan::Found { preamble, body, .. } = find_section(content).unwrap() else {
            panic!("section should be found");
        };
        assert_eq!(preamble, "<IfModule LiteSpeed>\nrewriteengine ON\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn missing_engine_directive_is_injected_into_preamble() {
        let content = "<IfModule LiteSpeed>\nbody\n</IfModule>\n";
        let SectionScan::Found { preamble, body, .. } = find_section(content).unwrap() else {
            panic!("section should be found");
        };
        assert_eq!(preamble, "<IfModule LiteSpeed>\nRewriteEngine on\n");
        // Insertion point stays at the section start; the raw body keeps
        // the original first line.
        assert_eq!(body, "\nbody");
    }

    #[test]
    fn unterminated_section_is_a_parse_error() {
        let err = find_section("<IfModule LiteSpeed>\nRewriteEngine on\n").unwrap_err();
        assert!(err.to_string().contains("IfModule close"));
    }

    #[test]
    fn directive_as_last_section_line_yields_empty_body() {
        let content = "<IfModule LiteSpeed>\nRewriteEngine on\n</IfModule>\n";
        let SectionScan::Found {
            preamble,
            body,
            resume_at,
        } = find_section(content).unwrap()
        else {
            panic!("section should be found");
        };
        assert_eq!(preamble, "<IfModule LiteSpeed>\nRewriteEngine on\n");
        assert_eq!(body, "");
        assert_eq!(&content[resume_at..], "\n</IfModule>\n");
    }

    #[test]
    fn back_to_back_markers_do_not_panic() {
        let scan = find_section("<IfModule LiteSpeed></IfModule>").unwrap();
        assert!(matches!(scan, SectionScan::Found { .. }));
    }

    #[test]
    fn directive_after_section_close_is_not_an_insertion_point() {
        let content = "<IfModule LiteSpeed>\nbody\n</IfModule>\nRewriteEngine on\n";
        let SectionScan::Found { preamble, .. } = find_section(content).unwrap() else {
            panic!("section should be found");
        };
        assert_eq!(preamble, "<IfModule LiteSpeed>\nRewriteEngine on\n");
    }
}

//! Environment report assembly

use std::collections::BTreeMap;
use std::fs;

use chrono::Utc;

use lsc_fs::SitePaths;
use lsc_site::{PluginOptions, SiteMetadata, opt};

/// Server variables worth reporting; everything else is dropped.
pub const SERVER_VAR_KEYS: [&str; 4] = [
    "DOCUMENT_ROOT",
    "SERVER_SOFTWARE",
    "X-LSCACHE",
    "HTTP_X_LSCACHE",
];

/// One line of a report section: an optional label and a value.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub label: Option<String>,
    pub value: String,
}

impl ReportEntry {
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
        }
    }

    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
        }
    }
}

/// Gather site metadata and build the full report.
///
/// `options` overrides the site's stored options when given; the
/// refresh hook passes the freshly saved set before it is re-readable.
pub fn generate(
    site: &dyn SiteMetadata,
    server: &BTreeMap<String, String>,
    paths: &SitePaths,
    options: Option<&PluginOptions>,
) -> String {
    let mut options = options.cloned().unwrap_or_else(|| site.options());

    // On multi-site networks each blog's cache-enable selection is
    // appended under a synthetic option ID.
    for blog_id in site.network_blog_ids() {
        if let Some(value) = site.blog_option(blog_id, opt::CACHE_ENABLED_RADIO) {
            options.set(format!("blog {blog_id} radio select"), value);
        }
    }

    let extras = vec![
        ReportEntry::labeled("wordpress version", site.cms_version()),
        ReportEntry::labeled("locale", site.locale()),
        ReportEntry::labeled("active theme", site.active_theme()),
        ReportEntry::labeled(
            "active plugins",
            format!("[{}]", site.active_plugins().join(", ")),
        ),
    ];

    build_report(server, &options, &extras, paths)
}

/// Build the report body from its pieces.
pub fn build_report(
    server: &BTreeMap<String, String>,
    options: &PluginOptions,
    extras: &[ReportEntry],
    paths: &SitePaths,
) -> String {
    let server_vars: Vec<ReportEntry> = SERVER_VAR_KEYS
        .iter()
        .filter_map(|key| {
            server
                .get(*key)
                .map(|value| ReportEntry::labeled(*key, value))
        })
        .collect();

    let option_entries: Vec<ReportEntry> = options
        .iter()
        .map(|(id, value)| ReportEntry::labeled(id, value.to_string()))
        .collect();

    let mut buf = format!("Report date: {}\n\n", Utc::now().to_rfc2822());
    buf.push_str(&format_section("Server Variables", &server_vars));
    buf.push_str(&format_section("LSCache Plugin Options", &option_entries));
    buf.push_str(&format_section("Wordpress Specific Extras", extras));
    append_rules_files(&mut buf, paths);
    buf
}

/// One report section: a heading with four-space-indented entries, or a
/// placeholder line when there is nothing to show.
fn format_section(header: &str, entries: &[ReportEntry]) -> String {
    if entries.is_empty() {
        return format!("No matching {header}\n\n");
    }
    let mut buf = String::from(header);
    for entry in entries {
        buf.push_str("\n    ");
        if let Some(label) = &entry.label {
            buf.push_str(label);
            buf.push_str(" = ");
        }
        buf.push_str(&entry.value);
    }
    buf.push_str("\n\n");
    buf
}

/// Attach the verbatim contents of the one or two rules files. An
/// unreadable file is noted inline and does not stop the report.
fn append_rules_files(buf: &mut String, paths: &SitePaths) {
    let mut files = vec![paths.home()];
    if paths.is_subdir_install() {
        files.push(paths.site());
    }

    for path in files {
        if !path.exists() {
            buf.push_str(&format!("{path} does not exist or is not readable.\n"));
            continue;
        }
        match fs::read_to_string(path) {
            Ok(content) => {
                buf.push_str(&format!("{path} contents:\n{content}\n\n"));
            }
            Err(_) => {
                buf.push_str(&format!("{path} does not exist or is not readable.\n"));
            }
        }
    }
}

//! Report refresh hook

use std::collections::BTreeMap;
use std::path::Path;

use lsc_fs::SitePaths;
use lsc_site::{PluginOptions, SiteMetadata};

/// Regenerate the environment report after an options update.
///
/// Mirrors the options-saved hook: whenever the plugin's options change,
/// the persisted report is rebuilt with the freshly saved set so support
/// always sees the current state.
pub fn refresh_environment_report(
    site: &dyn SiteMetadata,
    server: &BTreeMap<String, String>,
    paths: &SitePaths,
    plugin_dir: &Path,
    options: &PluginOptions,
) -> String {
    let report = lsc_report::generate(site, server, paths, Some(options));
    lsc_report::write_report(plugin_dir, &report);
    report
}

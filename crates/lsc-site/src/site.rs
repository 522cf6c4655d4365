//! Site metadata collaborator

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::options::{OptionValue, PluginOptions};

/// Read-only view of the CMS the plugin is installed in.
pub trait SiteMetadata {
    fn cms_version(&self) -> &str;
    fn locale(&self) -> &str;
    fn active_theme(&self) -> &str;
    fn active_plugins(&self) -> Vec<String>;
    fn options(&self) -> PluginOptions;

    /// Blog IDs of a multi-site network; empty on single-site installs.
    fn network_blog_ids(&self) -> Vec<u64> {
        Vec::new()
    }

    /// Per-blog option lookup on multi-site networks.
    fn blog_option(&self, _blog_id: u64, _id: &str) -> Option<OptionValue> {
        None
    }
}

/// Static, file-loadable metadata for tests and offline report runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticSite {
    #[serde(default)]
    pub cms_version: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub active_theme: String,
    #[serde(default)]
    pub active_plugins: Vec<String>,
    #[serde(default)]
    pub options: PluginOptions,
    /// Per-blog options keyed by blog ID; non-empty means multi-site.
    #[serde(default)]
    pub blogs: BTreeMap<String, PluginOptions>,
}

impl StaticSite {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

impl SiteMetadata for StaticSite {
    fn cms_version(&self) -> &str {
        &self.cms_version
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn active_theme(&self) -> &str {
        &self.active_theme
    }

    fn active_plugins(&self) -> Vec<String> {
        self.active_plugins.clone()
    }

    fn options(&self) -> PluginOptions {
        self.options.clone()
    }

    fn network_blog_ids(&self) -> Vec<u64> {
        self.blogs.keys().filter_map(|id| id.parse().ok()).collect()
    }

    fn blog_option(&self, blog_id: u64, id: &str) -> Option<OptionValue> {
        self.blogs
            .get(&blog_id.to_string())
            .and_then(|options| options.get(id))
            .cloned()
    }
}

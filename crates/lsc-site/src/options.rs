//! Plugin option model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Option identifiers shared with the persistence layer.
pub mod opt {
    /// Per-blog cache-enable radio selection.
    pub const CACHE_ENABLED_RADIO: &str = "radio_select";
    pub const MOBILE_VIEW_ENABLED: &str = "mobileview_enabled";
    pub const MOBILE_VIEW_LIST: &str = "mobileview_list";
    pub const NOCACHE_COOKIES: &str = "nocache_cookies";
    pub const NOCACHE_USERAGENTS: &str = "nocache_useragents";
    pub const LOGIN_COOKIE: &str = "login_cookie";
}

/// A single option value: scalar or list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl OptionValue {
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// The plugin's named options.
///
/// Stored sorted by ID so report output and serialized forms are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginOptions {
    values: BTreeMap<String, OptionValue>,
}

impl PluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&OptionValue> {
        self.values.get(id)
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(id.into(), value.into());
    }

    /// Boolean option; unset reads as `false`.
    pub fn bool_opt(&self, id: &str) -> bool {
        self.get(id).is_some_and(OptionValue::as_bool)
    }

    /// String option; unset reads as the empty string.
    pub fn str_opt(&self, id: &str) -> &str {
        self.get(id).and_then(OptionValue::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, OptionValue)> for PluginOptions {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

//! Marker grammar for the managed section and rule blocks

/// Opening marker of the plugin-managed section.
pub const SECTION_OPEN: &str = "<IfModule LiteSpeed>";

/// Closing marker of the plugin-managed section.
pub const SECTION_CLOSE: &str = "</IfModule>";

/// Directive that must lead the section body.
pub const ENGINE_DIRECTIVE: &str = "RewriteEngine on";

/// Wrapper names of the rule blocks this module manages.
pub mod wrapper {
    pub const MOBILE_VIEW: &str = "MOBILE VIEW";
    pub const COOKIE: &str = "COOKIE";
    pub const USER_AGENT: &str = "USER AGENT";
    pub const LOGIN_COOKIE: &str = "LOGIN COOKIE";
}

/// Format the start marker for a named rule block.
pub fn wrapper_start(name: &str) -> String {
    format!("###LSCACHE START {name}###")
}

/// Format the end marker for a named rule block.
pub fn wrapper_end(name: &str) -> String {
    format!("###LSCACHE END {name}###")
}

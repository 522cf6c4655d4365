//! Option validation flow for the rewrite-managed settings

use lsc_rules::{CommonRewrites, RulesEditor};
use lsc_site::{NoticeSink, PluginOptions, Severity, opt};

/// Project the rewrite-managed settings out of the full option set.
pub fn common_rewrites_of(options: &PluginOptions) -> CommonRewrites {
    CommonRewrites {
        mobile_view_enabled: options.bool_opt(opt::MOBILE_VIEW_ENABLED),
        mobile_view_agents: options.str_opt(opt::MOBILE_VIEW_LIST).to_string(),
        nocache_cookies: options.str_opt(opt::NOCACHE_COOKIES).to_string(),
        nocache_useragents: options.str_opt(opt::NOCACHE_USERAGENTS).to_string(),
        login_cookie: options.str_opt(opt::LOGIN_COOKIE).to_string(),
    }
}

/// Validate and apply the admin's rewrite settings.
///
/// Returns the option set as actually persisted: settings whose block
/// update failed keep their previous value, and every collected error is
/// forwarded to the notice sink while the rest of the batch proceeds.
pub fn update_rewrite_options(
    editor: &RulesEditor,
    options: &PluginOptions,
    input: &CommonRewrites,
    notices: &mut dyn NoticeSink,
) -> PluginOptions {
    let current = common_rewrites_of(options);
    let outcome = editor.apply(input, &current);
    for error in &outcome.errors {
        notices.notify(Severity::Error, &error.to_string());
    }

    let mut updated = options.clone();
    let applied = &outcome.applied;
    updated.set(opt::MOBILE_VIEW_ENABLED, applied.mobile_view_enabled);
    updated.set(opt::MOBILE_VIEW_LIST, applied.mobile_view_agents.clone());
    updated.set(opt::NOCACHE_COOKIES, applied.nocache_cookies.clone());
    updated.set(opt::NOCACHE_USERAGENTS, applied.nocache_useragents.clone());
    updated.set(opt::LOGIN_COOKIE, applied.login_cookie.clone());
    updated
}

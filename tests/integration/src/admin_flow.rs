//! Admin request flows across the orchestration crate

use std::collections::BTreeMap;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use lsc_admin::{
    EditSubmission, SAVE_ACTION, handle_edit_submission, refresh_environment_report,
    update_rewrite_options,
};
use lsc_fs::SitePaths;
use lsc_report::REPORT_FILE_NAME;
use lsc_rules::{CommonRewrites, RulesEditor};
use lsc_site::{CollectedNotices, PluginOptions, Severity, StaticSite, opt};
use predicates::prelude::*;

#[test]
fn edit_form_save_then_options_update() {
    let root = TempDir::new().unwrap();
    root.child(".htaccess").write_str("# seeded\n").unwrap();
    let paths = SitePaths::single(root.path());
    let editor = RulesEditor::new(paths.clone());
    let mut notices = CollectedNotices::new();

    // The admin pastes a whole file into the edit form.
    handle_edit_submission(
        &editor,
        &EditSubmission {
            action: SAVE_ACTION.to_string(),
            verified: true,
            editor_text: "<IfModule LiteSpeed>\nRewriteEngine on\n</IfModule>\n".to_string(),
        },
        &mut notices,
    );
    assert_eq!(
        notices.entries(),
        &[(Severity::Success, "File saved.".to_string())]
    );
    root.child(".htaccess")
        .assert(predicate::str::contains("<IfModule LiteSpeed>"));
    root.child(".htaccess_lscachebak")
        .assert(predicate::str::contains("# seeded"));

    // Then saves rewrite settings on the options page.
    let input = CommonRewrites {
        nocache_cookies: "sess".to_string(),
        login_cookie: "wp_user".to_string(),
        ..CommonRewrites::default()
    };
    let updated = update_rewrite_options(&editor, &PluginOptions::new(), &input, &mut notices);
    assert!(!notices.has_errors());
    assert_eq!(updated.str_opt(opt::LOGIN_COOKIE), "wp_user");

    root.child(".htaccess").assert(
        predicate::str::contains("###LSCACHE START COOKIE###")
            .and(predicate::str::contains("E=Cache-Vary:wp_user")),
    );
}

#[test]
fn options_update_refreshes_the_environment_report() {
    let root = TempDir::new().unwrap();
    root.child(".htaccess")
        .write_str("<IfModule LiteSpeed>\nRewriteEngine on\n</IfModule>\n")
        .unwrap();
    let plugin_dir = root.child("wp-content/plugins/litespeed-cache");
    plugin_dir.create_dir_all().unwrap();
    let paths = SitePaths::single(root.path());
    let editor = RulesEditor::new(paths.clone());
    let mut notices = CollectedNotices::new();

    let input = CommonRewrites {
        nocache_useragents: "crawler".to_string(),
        ..CommonRewrites::default()
    };
    let updated = update_rewrite_options(&editor, &PluginOptions::new(), &input, &mut notices);
    assert!(!notices.has_errors());

    let server = BTreeMap::from([
        ("SERVER_SOFTWARE".to_string(), "LiteSpeed".to_string()),
        ("SECRET".to_string(), "do-not-leak".to_string()),
    ]);
    refresh_environment_report(
        &StaticSite::default(),
        &server,
        &paths,
        plugin_dir.path(),
        &updated,
    );

    plugin_dir.child(REPORT_FILE_NAME).assert(
        predicate::str::starts_with("<?php die();?>")
            .and(predicate::str::contains("SERVER_SOFTWARE = LiteSpeed"))
            .and(predicate::str::contains("nocache_useragents = crawler"))
            .and(predicate::str::contains("###LSCACHE START USER AGENT###"))
            .and(predicate::str::contains("do-not-leak").not()),
    );
}

#[test]
fn unverified_submission_changes_nothing_anywhere() {
    let root = TempDir::new().unwrap();
    root.child(".htaccess").write_str("# untouched\n").unwrap();
    let editor = RulesEditor::new(SitePaths::single(root.path()));
    let mut notices = CollectedNotices::new();

    handle_edit_submission(
        &editor,
        &EditSubmission {
            action: SAVE_ACTION.to_string(),
            verified: false,
            editor_text: "evil\n".to_string(),
        },
        &mut notices,
    );

    assert!(notices.entries().is_empty());
    root.child(".htaccess")
        .assert(predicate::str::contains("# untouched"));
    root.child(".htaccess_lscachebak")
        .assert(predicate::path::missing());
}

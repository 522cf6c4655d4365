//! End-to-end lifecycle of the managed rules file
//!
//! Drives the editor the way a sequence of admin requests would: enable
//! settings, change them, read them back, and finally clear everything,
//! checking the file after every step.

use lsc_rules::markers::wrapper;
use lsc_rules::{CommonRewrites, RulesEditor};
use lsc_test_utils::TempSite;
use regex::Regex;

fn apply(editor: &RulesEditor, input: &CommonRewrites, current: &CommonRewrites) -> CommonRewrites {
    let outcome = editor.apply(input, current);
    assert!(outcome.is_clean(), "{:?}", outcome.errors);
    outcome.applied
}

#[test]
fn full_lifecycle_preserves_the_admin_content() {
    let admin_header = "# Authored by the site admin\nDirectoryIndex index.php\n";
    let site = TempSite::single(admin_header);
    let editor = RulesEditor::new(site.paths().clone());

    // First save: section synthesized, three blocks written.
    let first = CommonRewrites {
        mobile_view_enabled: true,
        mobile_view_agents: "Mobile|Android".to_string(),
        nocache_cookies: "sess\ncart".to_string(),
        login_cookie: "wp_user".to_string(),
        ..CommonRewrites::default()
    };
    let current = apply(&editor, &first, &CommonRewrites::default());

    let contents = site.home_contents();
    assert!(contents.ends_with(admin_header));
    assert!(contents.contains("RewriteCond %{HTTP_COOKIE} sess|cart"));
    assert!(contents.contains("[E=Cache-Vary:wp_user]"));

    // Second save: change one list, drop the mobile view.
    let second = CommonRewrites {
        nocache_cookies: "sess".to_string(),
        login_cookie: "wp_user".to_string(),
        ..CommonRewrites::default()
    };
    let current = apply(&editor, &second, &current);

    let contents = site.home_contents();
    assert!(contents.ends_with(admin_header));
    assert_eq!(contents.matches("MOBILE VIEW").count(), 0);
    assert!(contents.contains("RewriteCond %{HTTP_COOKIE} sess\n"));
    // One block per wrapper, never duplicates.
    let starts = Regex::new(r"###LSCACHE START [A-Z ]+###").unwrap();
    assert_eq!(starts.find_iter(&contents).count(), 2);

    // Read back what was written.
    assert_eq!(
        editor
            .condition_value(wrapper::COOKIE, "HTTP_COOKIE")
            .unwrap()
            .as_deref(),
        Some("sess")
    );
    let login = editor.rewrite_rule(wrapper::LOGIN_COOKIE).unwrap().unwrap();
    assert_eq!(login.env, "Cache-Vary:wp_user");

    // Deactivation: common blocks go, login stays, admin content stays.
    editor.clear().unwrap();
    let contents = site.home_contents();
    assert_eq!(contents.matches("###LSCACHE START COOKIE###").count(), 0);
    assert!(contents.contains("LOGIN COOKIE"));
    assert!(contents.contains("# Authored by the site admin"));

    // Finally remove the login cookie as well.
    let third = CommonRewrites {
        nocache_cookies: "force-change".to_string(),
        ..CommonRewrites::default()
    };
    apply(&editor, &third, &current);
    assert_eq!(site.home_contents().matches("LOGIN COOKIE").count(), 0);
}

#[test]
fn repeated_applies_are_idempotent_on_the_file() {
    let site = TempSite::single(TempSite::empty_section());
    let editor = RulesEditor::new(site.paths().clone());

    let input = CommonRewrites {
        nocache_useragents: "crawler".to_string(),
        ..CommonRewrites::default()
    };
    apply(&editor, &input, &CommonRewrites::default());
    let after_first = site.home_contents();

    // Same settings again: short-circuited, file untouched.
    apply(&editor, &input, &input);
    assert_eq!(site.home_contents(), after_first);

    // Forced re-apply (different current) converges to the same bytes.
    let other = CommonRewrites {
        nocache_useragents: "old".to_string(),
        ..CommonRewrites::default()
    };
    apply(&editor, &input, &other);
    assert_eq!(site.home_contents(), after_first);
}

#[test]
fn subdir_install_keeps_both_files_in_sync() {
    let site = TempSite::subdir(TempSite::empty_section(), TempSite::empty_section());
    let editor = RulesEditor::new(site.paths().clone());

    let with_login = CommonRewrites {
        login_cookie: "wp_user".to_string(),
        nocache_cookies: "sess".to_string(),
        ..CommonRewrites::default()
    };
    let current = apply(&editor, &with_login, &CommonRewrites::default());
    assert!(site.home_contents().contains("E=Cache-Vary:wp_user"));
    assert!(site.site_contents().contains("E=Cache-Vary:wp_user"));

    // Renaming the cookie rewrites both copies without duplicating.
    let renamed = CommonRewrites {
        login_cookie: "wp_member".to_string(),
        nocache_cookies: "sess".to_string(),
        mobile_view_enabled: true,
        mobile_view_agents: "Mobile".to_string(),
        ..CommonRewrites::default()
    };
    apply(&editor, &renamed, &current);
    for contents in [site.home_contents(), site.site_contents()] {
        assert_eq!(contents.matches("###LSCACHE START LOGIN COOKIE###").count(), 1);
        assert!(contents.contains("E=Cache-Vary:wp_member"));
        assert!(!contents.contains("E=Cache-Vary:wp_user"));
    }
    // The other managed blocks never leak into the site file.
    assert!(!site.site_contents().contains("MOBILE VIEW"));
}

#[test]
fn commit_always_leaves_a_backup_of_the_previous_state() {
    let site = TempSite::single(TempSite::empty_section());
    let editor = RulesEditor::new(site.paths().clone());

    let input = CommonRewrites {
        nocache_cookies: "sess".to_string(),
        ..CommonRewrites::default()
    };
    apply(&editor, &input, &CommonRewrites::default());
    let backup = std::fs::read_to_string(site.paths().home().backup_path()).unwrap();
    assert_eq!(backup, TempSite::empty_section());

    // The next apply snapshots the state the first one produced.
    let next = CommonRewrites {
        nocache_cookies: "cart".to_string(),
        ..CommonRewrites::default()
    };
    let before_second = site.home_contents();
    apply(&editor, &next, &input);
    let backup = std::fs::read_to_string(site.paths().home().backup_path()).unwrap();
    assert_eq!(backup, before_second);
}

//! Shared test fixtures for the lscache-admin workspace

use std::fs;
use std::path::Path;

use lsc_fs::{RULES_FILE_NAME, SitePaths};
use tempfile::TempDir;

/// A scratch installation with one or two seeded document roots.
///
/// The temp directory lives as long as the fixture; dropping the
/// `TempSite` removes everything.
pub struct TempSite {
    root: TempDir,
    paths: SitePaths,
}

impl TempSite {
    /// Single-root install with the given rules-file contents.
    pub fn single(contents: &str) -> Self {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(RULES_FILE_NAME), contents).unwrap();
        let paths = SitePaths::single(root.path());
        Self { root, paths }
    }

    /// Single-root install with no rules file on disk.
    pub fn without_rules_file() -> Self {
        let root = TempDir::new().unwrap();
        let paths = SitePaths::single(root.path());
        Self { root, paths }
    }

    /// Subdirectory install: separate home and site roots, each seeded.
    pub fn subdir(home_contents: &str, site_contents: &str) -> Self {
        let root = TempDir::new().unwrap();
        let home = root.path().join("home");
        let site = root.path().join("site");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&site).unwrap();
        fs::write(home.join(RULES_FILE_NAME), home_contents).unwrap();
        fs::write(site.join(RULES_FILE_NAME), site_contents).unwrap();
        let paths = SitePaths::new(&home, &site);
        Self { root, paths }
    }

    pub fn paths(&self) -> &SitePaths {
        &self.paths
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn home_contents(&self) -> String {
        fs::read_to_string(self.paths.home()).unwrap()
    }

    pub fn site_contents(&self) -> String {
        fs::read_to_string(self.paths.site()).unwrap()
    }

    pub fn home_backup_exists(&self) -> bool {
        self.paths.home().backup_path().exists()
    }

    /// A minimal well-formed rules file with an empty managed section.
    pub fn empty_section() -> &'static str {
        "<IfModule LiteSpeed>\nRewriteEngine on\n</IfModule>\n"
    }
}

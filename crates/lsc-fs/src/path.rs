//! Rules-file path handling

use std::path::{Path, PathBuf};

/// File name of the rewrite-rules file at a document root.
pub const RULES_FILE_NAME: &str = ".htaccess";

/// Suffix appended to a rules-file path for its pre-overwrite backup copy.
pub const BACKUP_SUFFIX: &str = "_lscachebak";

/// Path to one rewrite-rules configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    inner: PathBuf,
}

impl ConfigPath {
    /// Rules file under the given document root.
    ///
    /// The root is canonicalized when it resolves so that two spellings of
    /// the same directory compare equal in [`SitePaths::is_subdir_install`].
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = dunce::canonicalize(root.as_ref())
            .unwrap_or_else(|_| root.as_ref().to_path_buf());
        Self {
            inner: root.join(RULES_FILE_NAME),
        }
    }

    /// Wrap an explicit file path without resolving it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { inner: path.into() }
    }

    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    /// Path the commit sequence copies the live file to before overwriting.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.inner.as_os_str().to_os_string();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    pub fn exists(&self) -> bool {
        self.inner.exists()
    }
}

impl AsRef<Path> for ConfigPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl std::fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}

/// The one or two rules files an installation manages.
///
/// A subdirectory install serves the site from a different document root
/// than the home URL, so a second rules file exists there and the
/// login-cookie vary rule must be mirrored into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    home: ConfigPath,
    site: ConfigPath,
}

impl SitePaths {
    /// Install with distinct home and site document roots.
    pub fn new(home_root: impl AsRef<Path>, site_root: impl AsRef<Path>) -> Self {
        Self {
            home: ConfigPath::for_root(home_root),
            site: ConfigPath::for_root(site_root),
        }
    }

    /// Single-root install: home and site rules files coincide.
    pub fn single(root: impl AsRef<Path>) -> Self {
        let home = ConfigPath::for_root(root);
        Self {
            site: home.clone(),
            home,
        }
    }

    /// Primary rules file, at the home document root.
    pub fn home(&self) -> &ConfigPath {
        &self.home
    }

    /// Secondary rules file, at the site document root.
    pub fn site(&self) -> &ConfigPath {
        &self.site
    }

    /// True when the site document root differs from the home root.
    pub fn is_subdir_install(&self) -> bool {
        self.home != self.site
    }
}

//! Per-request permission capability

use std::fs::{File, OpenOptions};

use crate::path::{ConfigPath, SitePaths};

/// Permission bits for a rules file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions(u8);

impl Permissions {
    pub const READABLE: Self = Self(1);
    pub const WRITABLE: Self = Self(2);
    /// Readable and writable.
    pub const RW: Self = Self(3);
}

/// Read/write capability for an installation's rules files.
///
/// Probed once per request and passed explicitly to the operations that
/// need it; the bits are not re-checked on later calls. On a subdirectory
/// install the secondary file's bits are intersected in, since the
/// login-cookie rule must be written to both files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileCapability {
    bits: u8,
}

impl FileCapability {
    /// Probe the filesystem for the given paths.
    pub fn probe(paths: &SitePaths) -> Self {
        let mut bits = probe_file(paths.home());
        if bits != 0 && paths.is_subdir_install() {
            bits &= probe_file(paths.site());
        }
        tracing::debug!(home = %paths.home(), bits, "Probed rules-file capability");
        Self { bits }
    }

    /// Capability with no access at all.
    pub fn none() -> Self {
        Self { bits: 0 }
    }

    /// Capability with exactly the given bits, for callers that already
    /// know the answer.
    pub fn of(mask: Permissions) -> Self {
        Self { bits: mask.0 }
    }

    /// Full read/write capability, for trusted contexts.
    pub fn full() -> Self {
        Self::of(Permissions::RW)
    }

    /// True when every bit of `mask` is held.
    pub fn is_able(&self, mask: Permissions) -> bool {
        self.bits & mask.0 == mask.0
    }
}

/// Probe one file: a missing file yields no bits at all.
fn probe_file(path: &ConfigPath) -> u8 {
    if !path.exists() {
        return 0;
    }
    let mut bits = 0;
    if File::open(path).is_ok() {
        bits |= Permissions::READABLE.0;
    }
    // Append mode proves writability without touching the content.
    if OpenOptions::new().append(true).open(path).is_ok() {
        bits |= Permissions::WRITABLE.0;
    }
    bits
}

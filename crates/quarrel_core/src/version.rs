//! Versioning for persisted documents

use core::fmt;

/// Format version stamped on every persisted document
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentVersion(pub u32);

impl DocumentVersion {
    /// Documents written before versioning existed
    pub const UNVERSIONED: Self = Self(0);

    /// The version this build writes
    pub const CURRENT: Self = Self(1);

    /// Whether this build can read a document of this version.
    ///
    /// Older formats are read best-effort; newer ones are refused.
    #[inline]
    pub const fn is_readable(self) -> bool {
        self.0 <= Self::CURRENT.0
    }
}

impl Default for DocumentVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Debug for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentVersion({})", self.0)
    }
}

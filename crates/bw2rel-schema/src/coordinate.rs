use crate::{KEY_PREFIX, Platform, Version};
use serde::{Deserialize, Serialize};

/// The (version, platform, architecture) tuple that namespaces a release's
/// remote location.
///
/// Built per invocation from operator input; never persisted. Remote object
/// keys are derived deterministically from the coordinate and a file's path
/// relative to the build-output root, and are immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCoordinate {
    /// Release version (canonical form `x.x.x`; see [`Version::is_canonical`]).
    pub version: Version,
    /// Target platform.
    pub platform: Platform,
    /// Target architecture, carried verbatim (e.g. `amd64`).
    pub arch: String,
}

impl ReleaseCoordinate {
    /// Build a coordinate from its parts.
    pub fn new(version: Version, platform: Platform, arch: impl Into<String>) -> Self {
        Self {
            version,
            platform,
            arch: arch.into(),
        }
    }

    /// The remote prefix all artifacts of this release live under:
    /// `bw2/2.x/<platform>/<arch>/<version>`.
    pub fn prefix(&self) -> String {
        format!(
            "{KEY_PREFIX}/{}/{}/{}",
            self.platform, self.arch, self.version
        )
    }

    /// The remote object key for a file at `relative` (a `/`-separated path
    /// relative to the build-output root).
    pub fn key_for(&self, relative: &str) -> String {
        format!("{}/{relative}", self.prefix())
    }
}

impl std::fmt::Display for ReleaseCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}/{}", self.version, self.platform, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate() -> ReleaseCoordinate {
        ReleaseCoordinate::new(Version::new("1.0.0"), Platform::Linux, "amd64")
    }

    #[test]
    fn prefix_layout() {
        assert_eq!(coordinate().prefix(), "bw2/2.x/linux/amd64/1.0.0");
    }

    #[test]
    fn key_preserves_relative_path() {
        let coord = coordinate();
        assert_eq!(coord.key_for("a.txt"), "bw2/2.x/linux/amd64/1.0.0/a.txt");
        assert_eq!(
            coord.key_for("sub/b.txt"),
            "bw2/2.x/linux/amd64/1.0.0/sub/b.txt"
        );
    }

    #[test]
    fn key_uses_platform_and_arch_verbatim() {
        let coord = ReleaseCoordinate::new(Version::new("2.3.1"), Platform::Darwin, "arm64");
        assert_eq!(
            coord.key_for("bw2.tar.gz"),
            "bw2/2.x/darwin/arm64/2.3.1/bw2.tar.gz"
        );
    }
}

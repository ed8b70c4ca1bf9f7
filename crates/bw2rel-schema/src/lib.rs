pub mod coordinate;
pub mod platform;
pub mod version;

// Re-exports
pub use coordinate::ReleaseCoordinate;
pub use platform::{ParsePlatformError, Platform};
pub use version::Version;

/// Remote prefix all versioned artifacts are published under.
pub const KEY_PREFIX: &str = "bw2/2.x";

/// Fixed, well-known key the installer is published to. Overwritten on
/// every installer publish; the object itself is not versioned.
pub const INSTALLER_KEY: &str = "agent";

/// Sentinel token in the installer template. Every line containing it is
/// replaced with a version substitution line.
pub const INSTALLER_MARKER: &str = "REPLACE_THIS";

/// Default release bucket.
pub const DEFAULT_BUCKET: &str = "get.bw2.io";

use thiserror::Error;

/// Target platform of a release.
///
/// Releases are published per platform; the platform name is the second
/// segment of the remote key layout.
///
/// # Example
///
/// ```
/// use bw2rel_schema::Platform;
///
/// let plat: Platform = "linux".parse().unwrap();
/// assert_eq!(plat.as_str(), "linux");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows builds.
    Windows,
    /// macOS builds.
    Darwin,
    /// Linux builds.
    Linux,
}

/// Error returned when a platform name is not one of the recognized values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("platform mismatch, expect windows, darwin, linux (got {0})")]
pub struct ParsePlatformError(String);

impl Platform {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Darwin => "darwin",
            Self::Linux => "linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "darwin" => Ok(Self::Darwin),
            "linux" => Ok(Self::Linux),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recognized_platforms() {
        assert_eq!("windows".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("darwin".parse::<Platform>().unwrap(), Platform::Darwin);
        assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Linux);
        // Case-insensitive, matching operator habit
        assert_eq!("Linux".parse::<Platform>().unwrap(), Platform::Linux);
    }

    #[test]
    fn rejects_unrecognized_platform() {
        let err = "freebsd".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("platform mismatch"));
        assert!(err.to_string().contains("freebsd"));
    }

    #[test]
    fn display_round_trips() {
        for plat in [Platform::Windows, Platform::Darwin, Platform::Linux] {
            assert_eq!(plat.to_string().parse::<Platform>().unwrap(), plat);
        }
    }
}

/// Version derived from an aggregate commit count.
///
/// The decimal digits of the count become the version components: hundreds
/// (and everything above) are the major number, tens are the minor number and
/// units are the patch number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChartVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ChartVersion {
    /// Creates a new ChartVersion with the specified major, minor, and patch components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ChartVersion {
            major,
            minor,
            patch,
        }
    }

    /// Derives a version from a total commit count.
    ///
    /// # Example
    /// ```
    /// use chart_version::version::ChartVersion;
    ///
    /// assert_eq!(ChartVersion::from_commit_count(47).to_string(), "0.4.7");
    /// assert_eq!(ChartVersion::from_commit_count(1234).to_string(), "12.3.4");
    /// ```
    pub fn from_commit_count(count: u64) -> Self {
        ChartVersion {
            major: count / 100,
            minor: (count % 100) / 10,
            patch: count % 10,
        }
    }

    /// Converts into a `semver::Version` with no pre-release or build metadata.
    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

impl std::fmt::Display for ChartVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

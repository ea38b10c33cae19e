use crate::structures::ReleaseCatalog;

/// Outcome of comparing the installed version against the release script.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateCheck {
  UpToDate {
    current: semver::Version,
  },
  UpdateAvailable {
    current: semver::Version,
    latest: semver::Version,
    catalog: ReleaseCatalog,
  },
}

use crate::structures::ReleaseCatalog;

impl ReleaseCatalog {
  /// Known versions, oldest first.
  pub fn versions(&self) -> &[semver::Version] {
    &self.versions
  }

  pub fn latest(&self) -> Option<&semver::Version> {
    self.versions.last()
  }

  /// True when the script named no release at all.
  pub fn is_empty(&self) -> bool {
    self.versions.is_empty()
  }

  pub fn contains(&self, version: &semver::Version) -> bool {
    self.versions.binary_search(version).is_ok()
  }

  /// Files of the `release:` block whose header reads exactly `key`.
  pub fn step(&self, key: &str) -> Option<&[String]> {
    self.steps.get(key).map(Vec::as_slice)
  }

  /// Versions released after `version`, oldest first.
  pub(crate) fn newer_than(&self, version: &semver::Version) -> &[semver::Version] {
    let start = self.versions.partition_point(|known| known <= version);
    &self.versions[start..]
  }
}

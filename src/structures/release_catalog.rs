use std::collections::HashMap;

/// Ordered view of a release script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseCatalog {
  /// Strictly increasing
  pub(crate) versions: Vec<semver::Version>,
  /// Files per release, keyed by the header text of its `release:` block
  pub(crate) steps: HashMap<String, Vec<String>>,
}

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdaterConfig {
  /// Always ends with a `/`
  pub(crate) update_base_url: String,
  pub(crate) current_version: semver::Version,
  pub(crate) target_directory: PathBuf,
  pub(crate) fetch_timeout: Duration,
  pub(crate) verbose: bool,
}

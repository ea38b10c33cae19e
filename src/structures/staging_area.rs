/// Temporary directory the files of one download run are fetched into.
///
/// Removed from disk when dropped.
#[derive(Debug)]
pub struct StagingArea {
  pub(crate) directory: tempfile::TempDir,
  pub(crate) files: Vec<String>,
  pub(crate) version: semver::Version,
}

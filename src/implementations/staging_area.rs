use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::functions::merge_directory;
use crate::structures::{Error, StagingArea};

impl StagingArea {
  pub(crate) fn new(version: semver::Version) -> Result<Self, Error> {
    let directory = tempfile::Builder::new().prefix("update-express-").tempdir()?;
    info!("Staging update {} in {:?}", version, directory.path());
    Ok(Self { directory, files: Vec::new(), version })
  }

  pub fn path(&self) -> &Path {
    self.directory.path()
  }

  /// Files fetched into the staging area, in download order.
  pub fn files(&self) -> &[String] {
    &self.files
  }

  /// Release the staged files belong to.
  pub fn version(&self) -> &semver::Version {
    &self.version
  }

  /// Where `relative_path` lives inside the staging area.
  pub(crate) fn destination_for(&self, relative_path: &str) -> Result<PathBuf, Error> {
    let relative = Path::new(relative_path.trim_start_matches(['/', '\\']));
    let escapes = relative
      .components()
      .any(|component| matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes || relative.as_os_str().is_empty() {
      return Err(Error::InvalidPath(relative_path.to_string()));
    }
    Ok(self.path().join(relative))
  }

  /// Merge the staged files into `target`, then remove the staging directory.
  ///
  /// Existing files with the same relative path are replaced, everything else in `target` stays.
  pub async fn install(self, target: PathBuf) -> Result<(), Error> {
    info!("Installing {} file(s) into {:?}", self.files.len(), &target);
    tokio::task::spawn_blocking(move || {
      merge_directory(self.path(), &target).map_err(|error| Error::InstallFailure(target.clone(), Box::new(error)))
    })
    .await?
  }
}

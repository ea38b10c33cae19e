/// Where an update cycle currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateStatus {
  CheckingForUpdate,
  UpToDate,
  UpdateAvailable(semver::Version),
  Downloading,
  Installing,
  UpdateComplete(semver::Version),
  UpdateFailed(String),
  UpdateCanceled,
}

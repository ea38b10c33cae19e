use crate::structures::UpdateStatus;

impl UpdateStatus {
  pub fn status_text(&self) -> String {
    match self {
      Self::CheckingForUpdate => "Checking for update...".to_string(),
      Self::UpToDate => "Your application is already up to date".to_string(),
      Self::UpdateAvailable(version) => format!("Newer version \"{}\" has been found and can be downloaded", version),
      Self::Downloading => "Downloading update...".to_string(),
      Self::Installing => "Installing update...".to_string(),
      Self::UpdateComplete(version) => format!("Application has been updated to version {}", version),
      Self::UpdateFailed(reason) => reason.clone(),
      Self::UpdateCanceled => "Update has been canceled".to_string(),
    }
  }

  /// No further step follows this state.
  pub fn is_final(&self) -> bool {
    matches!(self, Self::UpToDate | Self::UpdateComplete(_) | Self::UpdateFailed(_) | Self::UpdateCanceled)
  }
}

impl std::fmt::Display for UpdateStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}", self.status_text())
  }
}

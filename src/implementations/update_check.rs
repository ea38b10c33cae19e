use crate::structures::UpdateCheck;

impl UpdateCheck {
  pub fn is_update_available(&self) -> bool {
    matches!(self, Self::UpdateAvailable { .. })
  }

  /// Version the client would end up on after updating.
  pub fn latest(&self) -> &semver::Version {
    match self {
      Self::UpToDate { current } => current,
      Self::UpdateAvailable { latest, .. } => latest,
    }
  }
}

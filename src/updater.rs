use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::functions::{fetch_release_script, parse_release_script, resolve_update_plan};
use crate::structures::{DownloadOrchestrator, Error, ProgressSender, ReleaseCatalog, StagingArea, UpdateCheck, UpdateStatus, UpdaterConfig};
use crate::traits::Transport;

/// Drives one update cycle: check, download, install.
///
/// Each step is a separate call so a front end can run them off its main loop and ask the user
/// in between. [`Updater::subscribe`] follows the status along the way.
pub struct Updater {
  pub(crate) config: UpdaterConfig,
  pub(crate) transport: Arc<dyn Transport>,
  pub(crate) status: tokio::sync::watch::Sender<UpdateStatus>,
}

impl Updater {
  pub fn config(&self) -> &UpdaterConfig {
    &self.config
  }

  pub fn status(&self) -> UpdateStatus {
    self.status.borrow().clone()
  }

  pub fn subscribe(&self) -> tokio::sync::watch::Receiver<UpdateStatus> {
    self.status.subscribe()
  }

  fn set_status(&self, status: UpdateStatus) {
    info!("Status: {}", status);
    self.status.send_replace(status);
  }

  fn fail(&self, error: Error) -> Error {
    self.fail_with(error, Error::user_message)
  }

  fn fail_check(&self, error: Error) -> Error {
    self.fail_with(error, Error::check_message)
  }

  fn fail_with(&self, error: Error, message: fn(&Error, bool) -> String) -> Error {
    warn!("Update failed: {}", error);
    if let Error::Cancelled() = error {
      self.set_status(UpdateStatus::UpdateCanceled);
    } else {
      self.set_status(UpdateStatus::UpdateFailed(message(&error, self.config.verbose())));
    }
    error
  }

  /// Fetch and parse the release script and compare it to the installed version.
  #[instrument(skip(self))]
  pub async fn check_for_update(&self) -> Result<UpdateCheck, Error> {
    self.set_status(UpdateStatus::CheckingForUpdate);
    self.check().await.map_err(|error| self.fail_check(error))
  }

  async fn check(&self) -> Result<UpdateCheck, Error> {
    let text = fetch_release_script(self.transport.as_ref(), self.config.update_base_url()).await?;
    let catalog = parse_release_script(&text);
    let current = self.config.current_version().clone();
    let latest = match catalog.latest() {
      Some(latest) => latest.clone(),
      None => return Err(Error::ParseFailure("the release script does not list any release".to_string())),
    };
    if !catalog.contains(&current) {
      return Err(Error::UnknownVersion(current));
    }

    if current == latest {
      self.set_status(UpdateStatus::UpToDate);
      Ok(UpdateCheck::UpToDate { current })
    } else {
      self.set_status(UpdateStatus::UpdateAvailable(latest.clone()));
      Ok(UpdateCheck::UpdateAvailable { current, latest, catalog })
    }
  }

  /// The user turned the update down.
  pub fn cancel(&self) {
    self.set_status(UpdateStatus::UpdateCanceled);
  }

  /// Download everything needed to go from the installed version to the latest one in `catalog`.
  ///
  /// Percentages are sent to `progress` as files come in.
  #[instrument(skip(self, catalog, progress, cancellation))]
  pub async fn download(
    &self,
    catalog: &ReleaseCatalog,
    progress: Option<ProgressSender>,
    cancellation: &CancellationToken,
  ) -> Result<StagingArea, Error> {
    self.set_status(UpdateStatus::Downloading);
    self.fetch_update(catalog, progress, cancellation).await.map_err(|error| self.fail(error))
  }

  async fn fetch_update(
    &self,
    catalog: &ReleaseCatalog,
    progress: Option<ProgressSender>,
    cancellation: &CancellationToken,
  ) -> Result<StagingArea, Error> {
    let plan = resolve_update_plan(catalog, self.config.current_version())?;
    let orchestrator = DownloadOrchestrator::new(self.transport.clone(), self.config.update_base_url());
    orchestrator
      .run(&plan, progress, cancellation)
      .await?
      .ok_or_else(|| Error::ParseFailure("files to download are unknown".to_string()))
  }

  /// Merge a finished download into the target directory.
  #[instrument(skip(self, staging))]
  pub async fn install(&self, staging: StagingArea) -> Result<(), Error> {
    self.set_status(UpdateStatus::Installing);
    let version = staging.version().clone();
    match staging.install(self.config.target_directory().to_path_buf()).await {
      Ok(()) => {
        self.set_status(UpdateStatus::UpdateComplete(version));
        Ok(())
      }
      Err(error) => Err(self.fail(error)),
    }
  }
}

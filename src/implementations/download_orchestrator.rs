use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::structures::{DownloadOrchestrator, DownloadProgress, Error, ProgressSender, StagingArea, TransferReport, UpdatePlan};
use crate::traits::Transport;

/// Directory below the update base url holding the downloadable files.
pub const UPDATES_DIRECTORY: &str = "Updates/";

impl DownloadOrchestrator {
  /// `update_base_url` is the directory holding `updatescript.ini`, it has to end with a `/`.
  pub fn new(transport: Arc<dyn Transport>, update_base_url: &str) -> Self {
    Self {
      transport,
      download_base_url: format!("{}{}", update_base_url, UPDATES_DIRECTORY),
    }
  }

  /// Url a file of the plan is fetched from. Spaces are sent as `%20`, nothing else is encoded.
  pub fn file_url(&self, relative_path: &str) -> String {
    format!("{}{}", self.download_base_url, relative_path).replace(' ', "%20")
  }

  /// Download every file of `plan` into a new staging area.
  ///
  /// Returns `Ok(None)` without touching the disk when the plan is empty. Stops at the first
  /// file that can't be fetched; the staging area is removed and nothing gets installed.
  #[instrument(skip(self, plan, progress, cancellation), fields(files = plan.len()))]
  pub async fn run(
    &self,
    plan: &UpdatePlan,
    progress: Option<ProgressSender>,
    cancellation: &CancellationToken,
  ) -> Result<Option<StagingArea>, Error> {
    if plan.is_empty() {
      info!("Nothing to download");
      return Ok(None);
    }

    let mut staging = StagingArea::new(plan.to.clone())?;
    let mut tracker = DownloadProgress::new(plan.len());
    let publish = |percentage: Option<f64>| {
      if let (Some(percentage), Some(sender)) = (percentage, &progress) {
        // nobody listening anymore isn't our problem
        let _ = sender.unbounded_send(percentage);
      }
    };

    for (index, file) in plan.files().iter().enumerate() {
      if cancellation.is_cancelled() {
        warn!("Download cancelled after {} of {} file(s)", index, plan.len());
        return Err(Error::Cancelled());
      }
      let url = self.file_url(file);
      let destination = staging.destination_for(file)?;
      if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
      }

      info!("Downloading {} ({}/{})", &url, index + 1, plan.len());
      tracker.start_file();
      let result = self
        .transport
        .fetch_with_progress(&url, &destination, &mut |report: TransferReport| publish(tracker.report(report)))
        .await;
      if let Err(e) = result {
        error!("Downloading {} failed, skipping the remaining {} file(s)", &url, plan.len() - index - 1);
        return Err(Error::TransportFailure(url, Box::new(e)));
      }
      publish(tracker.finish_file());
      staging.files.push(file.clone());
    }

    info!("Downloaded {} file(s) into {:?}", staging.files.len(), staging.path());
    Ok(Some(staging))
  }
}

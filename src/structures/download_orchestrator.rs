use std::sync::Arc;

use crate::traits::Transport;

/// Receives overall download percentages, in order, while a run is going.
pub type ProgressSender = futures::channel::mpsc::UnboundedSender<f64>;

/// Fetches the files of an [`UpdatePlan`](crate::UpdatePlan) one after the other into a fresh staging area.
pub struct DownloadOrchestrator {
  pub(crate) transport: Arc<dyn Transport>,
  /// Directory the plan's relative paths are resolved against, ends with a `/`
  pub(crate) download_base_url: String,
}

/// Weighted progress over all files of one download run.
#[derive(Debug, Clone)]
pub struct DownloadProgress {
  pub(crate) total_files: usize,
  pub(crate) completed_steps: usize,
  pub(crate) step_weight: f64,
  pub(crate) current_fraction: f64,
  pub(crate) current_file_complete: bool,
  pub(crate) last_emitted: f64,
}

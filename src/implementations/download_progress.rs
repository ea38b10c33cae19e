use crate::structures::{DownloadProgress, TransferReport};

impl DownloadProgress {
  pub fn new(total_files: usize) -> Self {
    Self {
      total_files,
      completed_steps: 0,
      step_weight: if total_files == 0 { 100.0 } else { 100.0 / total_files as f64 },
      current_fraction: 0.0,
      current_file_complete: false,
      last_emitted: 0.0,
    }
  }

  pub fn completed_steps(&self) -> usize {
    self.completed_steps
  }

  pub fn step_weight(&self) -> f64 {
    self.step_weight
  }

  /// Overall percentage in `[0, 100]`.
  pub fn percentage(&self) -> f64 {
    if self.completed_steps >= self.total_files {
      return 100.0;
    }
    let value = self.completed_steps as f64 * self.step_weight + self.current_fraction * self.step_weight;
    value.clamp(0.0, 100.0)
  }

  pub(crate) fn start_file(&mut self) {
    self.current_fraction = 0.0;
    self.current_file_complete = false;
  }

  /// Fold a transport report in, returning the percentage to publish if there is one.
  pub(crate) fn report(&mut self, report: TransferReport) -> Option<f64> {
    if self.current_file_complete {
      return None;
    }
    let downloaded = report.blocks.saturating_mul(report.block_size);
    match report.total_size {
      Some(total) if downloaded >= total => self.finish_file(),
      Some(total) => {
        self.current_fraction = downloaded as f64 / total as f64;
        Some(self.emit())
      }
      // can't weigh a file of unknown size, it counts once it's done
      None => None,
    }
  }

  /// Mark the file in flight as done. Does nothing when the transport already reported it complete.
  pub(crate) fn finish_file(&mut self) -> Option<f64> {
    if self.current_file_complete {
      return None;
    }
    self.current_file_complete = true;
    self.current_fraction = 0.0;
    self.completed_steps = (self.completed_steps + 1).min(self.total_files);
    Some(self.emit())
  }

  fn emit(&mut self) -> f64 {
    self.last_emitted = self.percentage().max(self.last_emitted);
    self.last_emitted
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sized(blocks: u64, block_size: u64, total: u64) -> TransferReport {
    TransferReport { blocks, block_size, total_size: Some(total) }
  }

  #[test]
  fn partial_file_is_weighted() {
    let mut progress = DownloadProgress::new(4);
    progress.start_file();
    assert_eq!(progress.report(sized(1, 50, 100)), Some(12.5));
    assert_eq!(progress.report(sized(2, 50, 100)), Some(25.0));
    assert_eq!(progress.completed_steps(), 1);
    progress.start_file();
    assert_eq!(progress.report(sized(1, 25, 100)), Some(31.25));
  }

  #[test]
  fn completion_is_counted_once() {
    let mut progress = DownloadProgress::new(2);
    progress.start_file();
    assert_eq!(progress.report(sized(3, 512, 1000)), Some(50.0));
    assert_eq!(progress.report(sized(4, 512, 1000)), None);
    assert_eq!(progress.finish_file(), None);
    assert_eq!(progress.completed_steps(), 1);
  }

  #[test]
  fn three_files_end_at_exactly_one_hundred() {
    let mut progress = DownloadProgress::new(3);
    let mut last = 0.0;
    for _ in 0..3 {
      progress.start_file();
      for blocks in 0..=4 {
        if let Some(value) = progress.report(sized(blocks, 3, 10)) {
          assert!(value >= last);
          last = value;
        }
      }
    }
    assert_eq!(last, 100.0);
  }

  #[test]
  fn unknown_size_only_counts_when_done() {
    let mut progress = DownloadProgress::new(2);
    progress.start_file();
    assert_eq!(progress.report(TransferReport { blocks: 10, block_size: 1024, total_size: None }), None);
    assert_eq!(progress.finish_file(), Some(50.0));
  }

  #[test]
  fn shrinking_report_does_not_go_backwards() {
    let mut progress = DownloadProgress::new(1);
    progress.start_file();
    assert_eq!(progress.report(sized(6, 10, 100)), Some(60.0));
    assert_eq!(progress.report(sized(2, 10, 100)), Some(60.0));
  }

  #[test]
  fn empty_file_completes_immediately() {
    let mut progress = DownloadProgress::new(1);
    progress.start_file();
    assert_eq!(progress.report(sized(0, 8192, 0)), Some(100.0));
  }
}

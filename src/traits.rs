use std::path::Path;

use async_trait::async_trait;

use crate::structures::{Error, TransferReport};

/// Moves bytes from a url to the caller.
///
/// Implementations own their timeouts; callers never retry on their behalf.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Fetch the whole resource into memory.
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error>;

  /// Fetch the resource into `destination`, calling `on_progress` as data arrives.
  ///
  /// `destination`'s parent directory must already exist.
  async fn fetch_with_progress(
    &self,
    url: &str,
    destination: &Path,
    on_progress: &mut (dyn FnMut(TransferReport) + Send),
  ) -> Result<(), Error>;
}

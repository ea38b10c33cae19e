/// Fetches `file://` urls from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileTransport {
  pub(crate) block_size: usize,
}

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::instrument;

use crate::structures::{Error, FileTransport, TransferReport};
use crate::traits::Transport;

impl FileTransport {
  pub fn new() -> Self {
    Self { block_size: 8 * 1024 }
  }

  pub fn with_block_size(block_size: usize) -> Self {
    Self { block_size: block_size.max(1) }
  }

  fn path_of(url: &str) -> Result<PathBuf, Error> {
    let parsed = url::Url::parse(url)?;
    if parsed.scheme() != "file" {
      return Err(Error::UnsupportedScheme(url.to_string()));
    }
    parsed.to_file_path().map_err(|_| Error::UnsupportedScheme(url.to_string()))
  }
}

impl Default for FileTransport {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl Transport for FileTransport {
  #[instrument(skip(self))]
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
    Ok(tokio::fs::read(Self::path_of(url)?).await?)
  }

  #[instrument(skip(self, on_progress))]
  async fn fetch_with_progress(
    &self,
    url: &str,
    destination: &Path,
    on_progress: &mut (dyn FnMut(TransferReport) + Send),
  ) -> Result<(), Error> {
    let mut source = tokio::fs::File::open(Self::path_of(url)?).await?;
    let total_size = source.metadata().await?.len();
    let mut target = tokio::fs::File::create(destination).await?;

    let block_size = self.block_size as u64;
    let mut buffer = vec![0_u8; self.block_size];
    let mut blocks = 0;
    on_progress(TransferReport { blocks, block_size, total_size: Some(total_size) });
    loop {
      let read = source.read(&mut buffer).await?;
      if read == 0 {
        break;
      }
      target.write_all(&buffer[..read]).await?;
      blocks += 1;
      on_progress(TransferReport { blocks, block_size, total_size: Some(total_size) });
    }
    target.flush().await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn spaces_in_urls_are_decoded() -> Result<(), Error> {
    let root = tempfile::tempdir()?;
    std::fs::write(root.path().join("read me.txt"), b"hello")?;
    let url = url::Url::from_file_path(root.path().join("read me.txt")).map_err(|_| Error::InvalidConfig("bad path".to_string()))?;
    assert!(url.as_str().contains("%20"));
    assert_eq!(FileTransport::new().fetch(url.as_str()).await?, b"hello");
    Ok(())
  }

  #[tokio::test]
  async fn reports_every_block() -> Result<(), Error> {
    let root = tempfile::tempdir()?;
    std::fs::write(root.path().join("data.bin"), vec![7_u8; 10])?;
    let url = url::Url::from_file_path(root.path().join("data.bin")).map_err(|_| Error::InvalidConfig("bad path".to_string()))?;
    let destination = root.path().join("copy.bin");

    let mut reports = Vec::new();
    FileTransport::with_block_size(4).fetch_with_progress(url.as_str(), &destination, &mut |report: TransferReport| reports.push(report)).await?;

    assert_eq!(reports.iter().map(|report| report.blocks).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert!(reports.iter().all(|report| report.total_size == Some(10)));
    assert_eq!(std::fs::read(&destination)?, vec![7_u8; 10]);
    Ok(())
  }

  #[tokio::test]
  async fn rejects_other_schemes() {
    let error = FileTransport::new().fetch("http://example.com/updatescript.ini").await.unwrap_err();
    assert!(matches!(error, Error::UnsupportedScheme(_)));
  }
}

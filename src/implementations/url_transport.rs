use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::structures::{Error, FileTransport, HttpTransport, TransferReport, UrlTransport};
use crate::traits::Transport;

impl UrlTransport {
  pub fn new(timeout: Duration) -> Self {
    Self {
      http: HttpTransport::new(timeout),
      file: FileTransport::new(),
    }
  }

  fn transport_for(&self, url: &str) -> Result<&dyn Transport, Error> {
    match url::Url::parse(url)?.scheme() {
      "http" | "https" => Ok(&self.http),
      "file" => Ok(&self.file),
      _ => Err(Error::UnsupportedScheme(url.to_string())),
    }
  }
}

#[async_trait]
impl Transport for UrlTransport {
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
    self.transport_for(url)?.fetch(url).await
  }

  async fn fetch_with_progress(
    &self,
    url: &str,
    destination: &Path,
    on_progress: &mut (dyn FnMut(TransferReport) + Send),
  ) -> Result<(), Error> {
    self.transport_for(url)?.fetch_with_progress(url, destination, on_progress).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn unknown_scheme_is_refused() {
    let error = UrlTransport::new(Duration::from_secs(1)).fetch("ftp://example.com/updatescript.ini").await.unwrap_err();
    assert!(matches!(error, Error::UnsupportedScheme(_)));
  }

  #[tokio::test]
  async fn file_urls_go_to_the_filesystem() -> Result<(), Error> {
    let root = tempfile::tempdir()?;
    std::fs::write(root.path().join("updatescript.ini"), b"releases{\n1.0.0\n}\n")?;
    let url = url::Url::from_directory_path(root.path()).map_err(|_| Error::InvalidConfig("bad path".to_string()))?;
    let text = UrlTransport::new(Duration::from_secs(1)).fetch(&format!("{}updatescript.ini", url)).await?;
    assert_eq!(text, b"releases{\n1.0.0\n}\n");
    Ok(())
  }
}

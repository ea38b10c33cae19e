use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use futures::StreamExt;
use tracing::{debug, instrument, warn};

use crate::structures::{Error, HttpTransport, TransferReport};
use crate::traits::Transport;

const USER_AGENT: &str = concat!("update-express (", env!("CARGO_PKG_VERSION"), ")");

impl HttpTransport {
  /// `timeout` is how long the connection may stay silent, not a limit on the whole transfer.
  pub fn new(timeout: Duration) -> Self {
    Self { timeout }
  }

  /// Stream `url` into `to`, passing every byte count to `on_progress`.
  ///
  /// Fails with [`Error::DownloadTimeout`] once no data arrived for `self.timeout`.
  async fn download(
    &self,
    url: &str,
    to: &mut (impl Write + Send),
    on_progress: &mut (dyn FnMut(TransferReport) + Send),
  ) -> Result<(), Error> {
    let uri = url.parse::<download_async::http::Uri>()?;
    let (sender, mut reports) = futures::channel::mpsc::unbounded();
    let mut downloader = download_async::Downloader::new();
    downloader.use_uri(uri);
    downloader.use_progress(ReportForwarder::new(sender));
    if let Some(headers) = downloader.headers() {
      headers.append("User-Agent", download_async::http::HeaderValue::from_static(USER_AGENT));
    }
    downloader.allow_http();

    let response = downloader.download(download_async::Body::empty(), to);
    tokio::pin!(response);
    loop {
      tokio::select! {
        biased;
        result = &mut response => {
          return match result {
            Ok(_) => {
              debug!("Fetched {}", url);
              Ok(())
            }
            Err(download_async::Error::StatusError(status)) => {
              warn!("{} answered with {}", url, status);
              Err(Error::InvalidStatus(url.to_string(), status.as_u16()))
            }
            Err(e) => Err(e.into()),
          };
        }
        // every report restarts the idle timer
        report = tokio::time::timeout(self.timeout, reports.next()) => if let Some(report) = report? {
          on_progress(report);
        },
      }
    }
  }
}

#[async_trait]
impl Transport for HttpTransport {
  #[instrument(skip(self))]
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
    let mut buffer = vec![];
    self.download(url, &mut buffer, &mut |_: TransferReport| ()).await?;
    Ok(buffer)
  }

  #[instrument(skip(self, on_progress))]
  async fn fetch_with_progress(
    &self,
    url: &str,
    destination: &Path,
    on_progress: &mut (dyn FnMut(TransferReport) + Send),
  ) -> Result<(), Error> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(destination)?);
    self.download(url, &mut file, on_progress).await?;
    file.flush()?;
    Ok(())
  }
}

/// Turns `download_async` byte counts into [`TransferReport`]s.
struct ReportForwarder {
  sender: UnboundedSender<TransferReport>,
  file_size: Option<u64>,
  downloaded: u64,
}

impl ReportForwarder {
  fn new(sender: UnboundedSender<TransferReport>) -> Self {
    Self { sender, file_size: None, downloaded: 0 }
  }

  fn forward(&self) {
    let _ = self.sender.unbounded_send(TransferReport {
      blocks: self.downloaded,
      block_size: 1,
      total_size: self.file_size,
    });
  }
}

#[async_trait]
impl download_async::Progress for ReportForwarder {
  async fn set_file_size(&mut self, size: usize) {
    self.file_size = Some(size as u64);
    self.forward();
  }

  async fn add_to_progress(&mut self, amount: usize) {
    self.downloaded += amount as u64;
    self.forward();
  }

  async fn remove_from_progress(&mut self, amount: usize) {
    self.downloaded = self.downloaded.saturating_sub(amount as u64);
    self.forward();
  }
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::structures::{Error, UpdateStatus, UpdaterConfig, UrlTransport};
use crate::traits::Transport;
use crate::updater::Updater;

pub struct UpdaterBuilder {
  pub(crate) update_base_url: String,
  pub(crate) current_version: String,
  pub(crate) target_directory: PathBuf,
  pub(crate) fetch_timeout: Option<Duration>,
  pub(crate) verbose: bool,
  pub(crate) transport: Option<Arc<dyn Transport>>,
}

impl UpdaterBuilder {
  pub fn new() -> Self {
    Self {
      update_base_url: "".to_string(),
      current_version: "".to_string(),
      target_directory: PathBuf::new(),
      fetch_timeout: None,
      verbose: false,
      transport: None,
    }
  }

  pub fn set_update_base_url(&mut self, update_base_url: String) -> &mut Self {
    self.update_base_url = update_base_url;
    self
  }

  pub fn set_current_version(&mut self, current_version: String) -> &mut Self {
    self.current_version = current_version;
    self
  }

  pub fn set_target_directory(&mut self, target_directory: PathBuf) -> &mut Self {
    self.target_directory = target_directory;
    self
  }

  pub fn set_fetch_timeout(&mut self, fetch_timeout: Duration) -> &mut Self {
    self.fetch_timeout = Some(fetch_timeout);
    self
  }

  pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
    self.verbose = verbose;
    self
  }

  /// Replace the default transport, which handles `http`, `https` and `file` urls.
  pub fn set_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
    self.transport = Some(transport);
    self
  }

  pub fn build(&self) -> Result<Updater, Error> {
    let mut config = UpdaterConfig::new(&self.update_base_url, &self.current_version, self.target_directory.clone())?
      .with_verbose(self.verbose);
    if let Some(fetch_timeout) = self.fetch_timeout {
      config = config.with_fetch_timeout(fetch_timeout);
    }
    Ok(Updater::with_transport(config, self.transport.clone()))
  }
}

impl Default for UpdaterBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl Updater {
  /// An updater using the default transport for `config`'s timeout.
  pub fn new(config: UpdaterConfig) -> Self {
    Self::with_transport(config, None)
  }

  pub(crate) fn with_transport(config: UpdaterConfig, transport: Option<Arc<dyn Transport>>) -> Self {
    let transport = transport.unwrap_or_else(|| Arc::new(UrlTransport::new(config.fetch_timeout())));
    let (status, _) = tokio::sync::watch::channel(UpdateStatus::CheckingForUpdate);
    Self { config, transport, status }
  }
}

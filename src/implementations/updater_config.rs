use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::structures::{Error, UpdaterConfig};

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

impl UpdaterConfig {
  /// `update_base_url` is the directory holding `updatescript.ini` and `Updates/`.
  pub fn new(update_base_url: &str, current_version: &str, target_directory: impl Into<PathBuf>) -> Result<Self, Error> {
    let mut update_base_url = update_base_url.trim().to_string();
    if update_base_url.is_empty() {
      return Err(Error::InvalidConfig("update_base_url must not be empty".to_string()));
    }
    if !update_base_url.ends_with('/') {
      update_base_url.push('/');
    }
    url::Url::parse(&update_base_url)?;

    let current_version = semver::Version::parse(current_version.trim())
      .map_err(|error| Error::InvalidVersion(current_version.to_string(), error))?;

    Ok(Self {
      update_base_url,
      current_version,
      target_directory: target_directory.into(),
      fetch_timeout: DEFAULT_FETCH_TIMEOUT,
      verbose: false,
    })
  }

  /// Read the configuration from a json document like
  /// `{"update_base_url": "...", "current_version": "1.3.0", "target_directory": "..."}`.
  ///
  /// `fetch_timeout_secs` and `verbose` are optional.
  pub fn from_json(text: &str) -> Result<Self, Error> {
    let parsed = json::parse(text)?;
    let required = |key: &str| {
      parsed[key]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidConfig(format!("configuration is missing the string \"{}\"", key)))
    };
    let mut config = Self::new(&required("update_base_url")?, &required("current_version")?, required("target_directory")?)?;
    if !parsed["fetch_timeout_secs"].is_null() {
      let seconds = parsed["fetch_timeout_secs"]
        .as_u64()
        .ok_or_else(|| Error::InvalidConfig(format!("fetch_timeout_secs must be a whole number, got {}", parsed["fetch_timeout_secs"].dump())))?;
      config.fetch_timeout = Duration::from_secs(seconds);
    }
    if let Some(verbose) = parsed["verbose"].as_bool() {
      config.verbose = verbose;
    }
    Ok(config)
  }

  pub async fn load(path: &Path) -> Result<Self, Error> {
    info!("Loading configuration from {:?}", path);
    let text = tokio::fs::read_to_string(path).await?;
    Self::from_json(&text)
  }

  pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
    self.fetch_timeout = fetch_timeout;
    self
  }

  pub fn with_verbose(mut self, verbose: bool) -> Self {
    self.verbose = verbose;
    self
  }

  pub fn update_base_url(&self) -> &str {
    &self.update_base_url
  }

  pub fn current_version(&self) -> &semver::Version {
    &self.current_version
  }

  pub fn target_directory(&self) -> &Path {
    &self.target_directory
  }

  pub fn fetch_timeout(&self) -> Duration {
    self.fetch_timeout
  }

  pub fn verbose(&self) -> bool {
    self.verbose
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::structures::ErrorKind;

  #[test]
  fn base_url_gets_trailing_slash() {
    let config = UpdaterConfig::new("http://example.com/releases/app", "1.3.0", "target").unwrap();
    assert_eq!(config.update_base_url(), "http://example.com/releases/app/");
    assert_eq!(config.current_version(), &semver::Version::new(1, 3, 0));
  }

  #[test]
  fn json_configuration() {
    let config = UpdaterConfig::from_json(
      r#"{"update_base_url": "http://example.com/app/", "current_version": "1.3.0", "target_directory": "/opt/app", "fetch_timeout_secs": 5, "verbose": true}"#,
    )
    .unwrap();
    assert_eq!(config.target_directory(), Path::new("/opt/app"));
    assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
    assert!(config.verbose());
  }

  #[test]
  fn json_defaults() {
    let config = UpdaterConfig::from_json(r#"{"update_base_url": "http://example.com/app/", "current_version": "1.3.0", "target_directory": "app"}"#).unwrap();
    assert_eq!(config.fetch_timeout(), DEFAULT_FETCH_TIMEOUT);
    assert!(!config.verbose());
  }

  #[test]
  fn missing_base_url_is_rejected() {
    let error = UpdaterConfig::from_json(r#"{"current_version": "1.3.0", "target_directory": "app"}"#).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert!(error.to_string().contains("update_base_url"));
  }

  #[test]
  fn bad_values_are_rejected() {
    assert!(matches!(UpdaterConfig::new("http://example.com/", "1.3", "app"), Err(Error::InvalidVersion(_, _))));
    assert!(matches!(UpdaterConfig::new("not a url", "1.3.0", "app"), Err(Error::InvalidUrl(_))));
    assert!(matches!(UpdaterConfig::from_json("{"), Err(Error::JsonError(_))));
  }
}

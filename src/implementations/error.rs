use crate::structures::{Error, ErrorKind};

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::ParseFailure(_) | Self::InvalidPath(_) => ErrorKind::ParseFailure,
      Self::UnknownVersion(_) => ErrorKind::UnknownVersion,
      Self::InstallFailure(_, _) => ErrorKind::InstallFailure,
      Self::InvalidConfig(_) | Self::JsonError(_) | Self::InvalidVersion(_, _) | Self::InvalidUrl(_) => ErrorKind::Configuration,
      Self::Cancelled() => ErrorKind::Cancelled,
      Self::InvalidUri(_)
      | Self::UnsupportedScheme(_)
      | Self::DownloadAsyncError(_)
      | Self::DownloadTimeout(_)
      | Self::InvalidStatus(_, _)
      | Self::NotUtf8(_)
      | Self::TransportFailure(_, _)
      | Self::IoError(_)
      | Self::JoinError(_) => ErrorKind::TransportFailure,
    }
  }

  /// Whether re-running the whole check or download from scratch may succeed.
  pub fn is_retryable(&self) -> bool {
    self.kind() == ErrorKind::TransportFailure
  }

  /// Text for the person running the updater.
  ///
  /// With `verbose` set the full diagnostic is appended.
  pub fn user_message(&self, verbose: bool) -> String {
    let summary = match self.kind() {
      ErrorKind::ParseFailure => "Failed to parse update info from the update script. Please inform the developer of this error.".to_string(),
      ErrorKind::UnknownVersion => "Current version not supported by the update script. Please inform the developer of this error.".to_string(),
      ErrorKind::TransportFailure => "An error occurred while downloading. Please try again later.".to_string(),
      ErrorKind::InstallFailure => format!("Installing the update failed: {}", self),
      ErrorKind::Configuration => format!("The updater is misconfigured: {}", self),
      ErrorKind::Cancelled => "Update has been canceled".to_string(),
    };
    self.with_diagnostic(summary, verbose)
  }

  /// Like [`Error::user_message`], worded for a failure while checking for an update.
  pub fn check_message(&self, verbose: bool) -> String {
    match self.kind() {
      ErrorKind::TransportFailure => {
        self.with_diagnostic("An error occurred while checking for updates. Please try again later.".to_string(), verbose)
      }
      _ => self.user_message(verbose),
    }
  }

  fn with_diagnostic(&self, summary: String, verbose: bool) -> String {
    if verbose {
      format!("{}\n\n{:#?}", summary, self)
    } else {
      summary
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::InvalidUri(error) => Some(error),
      Self::InvalidUrl(error) => Some(error),
      Self::DownloadAsyncError(error) => Some(error),
      Self::DownloadTimeout(error) => Some(error),
      Self::NotUtf8(error) => Some(error),
      Self::TransportFailure(_, error) => Some(error.as_ref()),
      Self::InstallFailure(_, error) => Some(error.as_ref()),
      Self::JsonError(error) => Some(error),
      Self::InvalidVersion(_, error) => Some(error),
      Self::IoError(error) => Some(error),
      Self::JoinError(error) => Some(error),
      _ => None,
    }
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::ParseFailure(reason) => write!(f, "unusable release script: {}", reason),
      Self::UnknownVersion(version) => write!(f, "version {} is not listed in the release script", version),
      Self::InvalidPath(path) => write!(f, "refusing to stage \"{}\" outside of the staging directory", path),
      Self::InvalidUri(error) => write!(f, "invalid uri: {}", error),
      Self::InvalidUrl(error) => write!(f, "invalid url: {}", error),
      Self::UnsupportedScheme(url) => write!(f, "no transport for the scheme of \"{}\"", url),
      Self::DownloadAsyncError(error) => write!(f, "download failed: {}", error),
      Self::DownloadTimeout(_) => write!(f, "download timed out"),
      Self::InvalidStatus(url, status) => write!(f, "{} answered with status {}", url, status),
      Self::NotUtf8(error) => write!(f, "release script is not valid utf-8: {}", error),
      Self::TransportFailure(url, error) => write!(f, "fetching {} failed: {}", url, error),
      Self::InstallFailure(path, error) => write!(f, "merging into {} failed: {}", path.display(), error),
      Self::InvalidConfig(reason) => write!(f, "{}", reason),
      Self::JsonError(error) => write!(f, "invalid json: {}", error),
      Self::InvalidVersion(version, error) => write!(f, "\"{}\" is not a valid version: {}", version, error),
      Self::IoError(error) => write!(f, "{}", error),
      Self::JoinError(error) => write!(f, "{}", error),
      Self::Cancelled() => write!(f, "cancelled"),
    }
  }
}

impl From<tokio::task::JoinError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: tokio::task::JoinError) -> Self {
    log_error(&error);
    Self::JoinError(error)
  }
}

impl From<download_async::http::uri::InvalidUri> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: download_async::http::uri::InvalidUri) -> Self {
    log_error(&error);
    Self::InvalidUri(error)
  }
}

impl From<download_async::Error> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: download_async::Error) -> Self {
    log_error(&error);
    Self::DownloadAsyncError(error)
  }
}

impl From<url::ParseError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: url::ParseError) -> Self {
    log_error(&error);
    Self::InvalidUrl(error)
  }
}

impl From<tokio::time::error::Elapsed> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: tokio::time::error::Elapsed) -> Self {
    log_error(&error);
    Self::DownloadTimeout(error)
  }
}

impl From<std::io::Error> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: std::io::Error) -> Self {
    log_error(&error);
    Self::IoError(error)
  }
}

impl From<std::string::FromUtf8Error> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: std::string::FromUtf8Error) -> Self {
    log_error(&error);
    Self::NotUtf8(error)
  }
}

impl From<json::Error> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: json::Error) -> Self {
    log_error(&error);
    Self::JsonError(error)
  }
}

#[track_caller]
fn log_error(error: &(impl std::error::Error + ?Sized)) {
  tracing::error!("{:?}", error);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn transport_errors_are_retryable() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
    let error = Error::TransportFailure("http://example.com/Updates/a.txt".to_string(), Box::new(Error::from(io)));
    assert_eq!(error.kind(), ErrorKind::TransportFailure);
    assert!(error.is_retryable());
    assert!(error.to_string().contains("http://example.com/Updates/a.txt"));
  }

  #[test]
  fn unknown_version_is_fatal() {
    let error = Error::UnknownVersion(semver::Version::new(0, 9, 0));
    assert_eq!(error.kind(), ErrorKind::UnknownVersion);
    assert!(!error.is_retryable());
  }

  #[test]
  fn verbose_message_carries_diagnostic() {
    let error = Error::ParseFailure("no releases block".to_string());
    let short = error.user_message(false);
    let long = error.user_message(true);
    assert!(!short.contains("no releases block"));
    assert!(long.starts_with(&short));
    assert!(long.contains("no releases block"));
  }

  #[test]
  fn check_phase_has_its_own_wording() {
    let error = Error::TransportFailure("http://example.com/updatescript.ini".to_string(), Box::new(Error::UnsupportedScheme("x".to_string())));
    assert_eq!(error.check_message(false), "An error occurred while checking for updates. Please try again later.");
    assert_eq!(error.user_message(false), "An error occurred while downloading. Please try again later.");
    assert!(error.check_message(true).contains("updatescript.ini"));

    let parse = Error::ParseFailure("empty".to_string());
    assert_eq!(parse.check_message(false), parse.user_message(false));
  }
}

#[derive(Debug)]
pub enum Error {
  /// The release script held no usable release information
  ParseFailure(String),
  /// The installed version is not listed by the release script
  UnknownVersion(semver::Version),
  /// A file name in the release script escapes the staging directory
  InvalidPath(String),

  // Transport related errors:
  InvalidUri(download_async::http::uri::InvalidUri),
  InvalidUrl(url::ParseError),
  UnsupportedScheme(String),
  DownloadAsyncError(download_async::Error),
  DownloadTimeout(tokio::time::error::Elapsed),
  InvalidStatus(String, u16),
  NotUtf8(std::string::FromUtf8Error),
  /// Fetching `url` failed, the boxed error is whatever the transport reported
  TransportFailure(String, Box<Error>),

  /// Merging the staging area into the target directory failed
  InstallFailure(std::path::PathBuf, Box<Error>),

  InvalidConfig(String),
  JsonError(json::Error),
  InvalidVersion(String, semver::Error),

  IoError(std::io::Error),
  JoinError(tokio::task::JoinError),
  Cancelled(),
}

/// The coarse classes an [`Error`] falls in, used to decide what to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  ParseFailure,
  UnknownVersion,
  TransportFailure,
  InstallFailure,
  Configuration,
  Cancelled,
}

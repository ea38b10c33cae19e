use std::time::Duration;

/// Fetches `http` and `https` urls through `download_async`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  pub(crate) timeout: Duration,
}

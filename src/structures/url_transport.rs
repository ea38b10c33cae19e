use crate::structures::{FileTransport, HttpTransport};

/// Picks the transport matching the scheme of every url it is asked to fetch.
#[derive(Debug, Clone)]
pub struct UrlTransport {
  pub(crate) http: HttpTransport,
  pub(crate) file: FileTransport,
}

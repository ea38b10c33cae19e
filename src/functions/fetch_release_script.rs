use tracing::{info, instrument};

use crate::structures::Error;
use crate::traits::Transport;

/// Name of the release script below the update base url.
pub const RELEASE_SCRIPT_FILENAME: &str = "updatescript.ini";

#[instrument(skip(transport))]
pub(crate) async fn fetch_release_script(transport: &dyn Transport, update_base_url: &str) -> Result<String, Error> {
  let url = format!("{}{}", update_base_url, RELEASE_SCRIPT_FILENAME);
  let bytes = transport
    .fetch(&url)
    .await
    .map_err(|error| Error::TransportFailure(url.clone(), Box::new(error)))?;
  info!("Fetched release script ({} bytes)", bytes.len());
  Ok(String::from_utf8(bytes)?)
}

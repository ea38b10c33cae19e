//! Checks a release script for newer versions of an application, downloads the files needed to
//! get there and merges them into the installation.
//!
//! ```no_run
//! # async fn example() -> Result<(), update_express::Error> {
//! use update_express::{UpdateCheck, UpdaterBuilder};
//! use tokio_util::sync::CancellationToken;
//!
//! let updater = UpdaterBuilder::new()
//!   .set_update_base_url("https://example.com/releases/my-app/".to_string())
//!   .set_current_version("1.3.0".to_string())
//!   .set_target_directory("/opt/my-app".into())
//!   .build()?;
//!
//! if let UpdateCheck::UpdateAvailable { catalog, .. } = updater.check_for_update().await? {
//!   let staging = updater.download(&catalog, None, &CancellationToken::new()).await?;
//!   updater.install(staging).await?;
//! }
//! # Ok(())
//! # }
//! ```

//Modules
mod functions;
mod implementations;
mod structures;
mod traits;
mod updater;
mod updater_builder;


pub use crate::functions::{parse_release_script, resolve_update_plan, RELEASE_SCRIPT_FILENAME};
pub use crate::implementations::UPDATES_DIRECTORY;
pub use crate::structures::{
  DownloadOrchestrator, DownloadProgress, Error, ErrorKind, FileTransport, HttpTransport, ProgressSender, ReleaseCatalog,
  StagingArea, TransferReport, UpdateCheck, UpdatePlan, UpdateStatus, UpdaterConfig, UrlTransport,
};
pub use crate::traits::Transport;
pub use crate::updater::Updater;
pub use crate::updater_builder::UpdaterBuilder;

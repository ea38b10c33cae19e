pub mod error;
pub use error::{Error, ErrorKind};

pub mod release_catalog;
pub use release_catalog::ReleaseCatalog;

pub mod update_plan;
pub use update_plan::UpdatePlan;

pub mod transfer_report;
pub use transfer_report::TransferReport;

pub mod download_progress;
pub use download_progress::DownloadProgress;

pub mod staging_area;
pub use staging_area::StagingArea;

pub mod updater_config;
pub use updater_config::UpdaterConfig;

pub mod update_check;
pub use update_check::UpdateCheck;

pub mod update_status;
pub use update_status::UpdateStatus;

pub mod download_orchestrator;
pub use download_orchestrator::{DownloadOrchestrator, ProgressSender};

pub mod http_transport;
pub use http_transport::HttpTransport;

pub mod file_transport;
pub use file_transport::FileTransport;

pub mod url_transport;
pub use url_transport::UrlTransport;

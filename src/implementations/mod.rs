mod error;
mod release_catalog;
mod update_plan;
mod download_progress;
mod staging_area;
mod updater_config;
mod update_check;
mod update_status;
mod download_orchestrator;
mod http_transport;
mod file_transport;
mod url_transport;

pub use download_orchestrator::UPDATES_DIRECTORY;

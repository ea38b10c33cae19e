mod parse_release_script;
mod resolve_update_plan;
mod fetch_release_script;
mod merge_directory;

pub use parse_release_script::parse_release_script as parse_release_script;
pub use resolve_update_plan::resolve_update_plan as resolve_update_plan;
pub use fetch_release_script::RELEASE_SCRIPT_FILENAME;
pub(crate) use fetch_release_script::fetch_release_script as fetch_release_script;
pub(crate) use merge_directory::merge_directory as merge_directory;

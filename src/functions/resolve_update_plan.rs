use std::collections::HashSet;

use tracing::{debug, info, instrument};

use crate::structures::{Error, ReleaseCatalog, UpdatePlan};

/// Work out which files have to be downloaded to bring `current` up to the latest release.
///
/// Files requested by several releases are listed once, at the position of the oldest release
/// asking for them. A release without a matching `release:` block contributes nothing.
#[instrument(skip(catalog))]
pub fn resolve_update_plan(catalog: &ReleaseCatalog, current: &semver::Version) -> Result<UpdatePlan, Error> {
  let latest = catalog
    .latest()
    .ok_or_else(|| Error::ParseFailure("the release script does not list any release".to_string()))?;

  if current == latest {
    info!("Version {} is the latest release", current);
    return Ok(UpdatePlan { from: current.clone(), to: latest.clone(), files: Vec::new() });
  }
  if !catalog.contains(current) {
    return Err(Error::UnknownVersion(current.clone()));
  }

  let mut seen = HashSet::new();
  let mut files = Vec::new();
  for version in catalog.newer_than(current) {
    match catalog.step(&version.to_string()) {
      Some(step) => files.extend(step.iter().filter(|file| seen.insert(*file)).cloned()),
      None => debug!("No release block for {}, nothing to download for it", version),
    }
  }
  info!("Updating {} -> {} needs {} file(s)", current, latest, files.len());
  Ok(UpdatePlan { from: current.clone(), to: latest.clone(), files })
}

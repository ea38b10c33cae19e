use std::path::Path;

use tracing::debug;

use crate::structures::Error;

/// Recursively copy `source` over `target`.
///
/// Each file is written next to its destination first and renamed into place.
pub(crate) fn merge_directory(source: &Path, target: &Path) -> Result<(), Error> {
  std::fs::create_dir_all(target)?;
  for entry in std::fs::read_dir(source)? {
    let entry = entry?;
    let destination = target.join(entry.file_name());
    if entry.file_type()?.is_dir() {
      merge_directory(&entry.path(), &destination)?;
    } else {
      let mut partial_name = entry.file_name();
      partial_name.push(".partial");
      let partial = target.join(partial_name);
      debug!("Installing {:?}", &destination);
      let installed = std::fs::copy(entry.path(), &partial).and_then(|_| std::fs::rename(&partial, &destination));
      if let Err(e) = installed {
        let _ = std::fs::remove_file(&partial);
        return Err(e.into());
      }
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn overwrites_and_keeps_unrelated_files() -> Result<(), Error> {
    let source = tempfile::tempdir()?;
    let target = tempfile::tempdir()?;
    std::fs::create_dir_all(source.path().join("data/levels"))?;
    std::fs::write(source.path().join("app.bin"), b"new")?;
    std::fs::write(source.path().join("data/levels/one.map"), b"level")?;
    std::fs::write(target.path().join("app.bin"), b"old")?;
    std::fs::write(target.path().join("settings.cfg"), b"mine")?;

    merge_directory(source.path(), target.path())?;

    assert_eq!(std::fs::read(target.path().join("app.bin"))?, b"new");
    assert_eq!(std::fs::read(target.path().join("settings.cfg"))?, b"mine");
    assert_eq!(std::fs::read(target.path().join("data/levels/one.map"))?, b"level");
    assert!(!target.path().join("app.bin.partial").exists());
    Ok(())
  }

  #[test]
  fn failed_rename_leaves_no_partial_file() -> Result<(), Error> {
    let source = tempfile::tempdir()?;
    let target = tempfile::tempdir()?;
    std::fs::write(source.path().join("app.bin"), b"new")?;
    // a non-empty directory can't be replaced by a file
    std::fs::create_dir_all(target.path().join("app.bin/inner"))?;

    assert!(merge_directory(source.path(), target.path()).is_err());
    assert!(!target.path().join("app.bin.partial").exists());
    assert!(target.path().join("app.bin/inner").is_dir());
    Ok(())
  }

  #[test]
  fn merging_twice_is_harmless() -> Result<(), Error> {
    let source = tempfile::tempdir()?;
    let target = tempfile::tempdir()?;
    std::fs::write(source.path().join("a.txt"), b"a")?;
    merge_directory(source.path(), target.path())?;
    merge_directory(source.path(), target.path())?;
    assert_eq!(std::fs::read(target.path().join("a.txt"))?, b"a");
    Ok(())
  }
}

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::structures::ReleaseCatalog;

const RELEASES_KEYWORD: &str = "releases";
const RELEASE_HEADER: &str = "release:";
const DOWNLOAD_FILE: &str = "DownloadFile:";

/// Parse the text of an `updatescript.ini` into a [`ReleaseCatalog`].
///
/// Never fails: anything that isn't recognised is ignored, so a script without usable
/// blocks gives an empty catalog. Callers have to check [`ReleaseCatalog::latest`].
pub fn parse_release_script(text: &str) -> ReleaseCatalog {
  let versions = match releases_block(text) {
    Some(body) => parse_versions(body),
    None => {
      debug!("No releases block found in release script");
      Vec::new()
    }
  };
  let steps = release_steps(text);
  debug!("Parsed {} versions and {} release blocks", versions.len(), steps.len());
  ReleaseCatalog { versions, steps }
}

/// Body of the first `releases { ... }` block.
fn releases_block(text: &str) -> Option<&str> {
  for (start, _) in text.match_indices(RELEASES_KEYWORD) {
    let rest = text[start + RELEASES_KEYWORD.len()..].trim_start();
    if let Some(rest) = rest.strip_prefix('{') {
      return rest.find('}').map(|end| &rest[..end]);
    }
  }
  None
}

fn parse_versions(body: &str) -> Vec<semver::Version> {
  let mut versions: Vec<semver::Version> = body
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .filter_map(|line| match semver::Version::parse(line) {
      Ok(version) => Some(version),
      Err(e) => {
        debug!("Skipping \"{}\" in releases block: {}", line, e);
        None
      }
    })
    .collect();
  versions.sort();
  let listed = versions.len();
  versions.dedup();
  if versions.len() != listed {
    warn!("Releases block lists {} duplicate version(s), they were merged", listed - versions.len());
  }
  versions
}

fn release_steps(text: &str) -> HashMap<String, Vec<String>> {
  let mut steps = HashMap::new();
  let mut cursor = 0;
  while let Some(offset) = text[cursor..].find(RELEASE_HEADER) {
    let header_start = cursor + offset + RELEASE_HEADER.len();
    let line_end = text[header_start..].find('\n').map_or(text.len(), |end| header_start + end);
    // the opening brace has to be on the header line
    let Some(open) = text[header_start..line_end].find('{') else {
      cursor = header_start;
      continue;
    };
    let body_start = header_start + open + 1;
    let Some(close) = text[body_start..].find('}') else {
      break;
    };
    // trimmed so `release:1.1.0 {` still matches version 1.1.0, otherwise kept as written
    let key = text[header_start..header_start + open].trim().to_string();
    let files = download_files(&text[body_start..body_start + close]);
    if steps.insert(key.clone(), files).is_some() {
      warn!("Release \"{}\" is described more than once, keeping the last block", key);
    }
    cursor = body_start + close + 1;
  }
  steps
}

/// Names of every newline terminated `DownloadFile:` entry, kept verbatim.
fn download_files(body: &str) -> Vec<String> {
  let mut files = Vec::new();
  let mut rest = body;
  while let Some(offset) = rest.find(DOWNLOAD_FILE) {
    let name_start = offset + DOWNLOAD_FILE.len();
    let Some(newline) = rest[name_start..].find('\n') else {
      break;
    };
    files.push(rest[name_start..name_start + newline].to_string());
    rest = &rest[name_start + newline + 1..];
  }
  files
}

#[cfg(test)]
mod tests {
  use super::*;
  use semver::Version;

  const SCRIPT: &str = "releases{
1.0.0
1.2.0
1.1.0
}

release:1.1.0{
DownloadFile:a.txt
}

release:1.2.0{
DownloadFile:b.txt
DownloadFile:a.txt
}
";

  #[test]
  fn versions_are_sorted() {
    let catalog = parse_release_script(SCRIPT);
    assert_eq!(catalog.versions(), &[Version::new(1, 0, 0), Version::new(1, 1, 0), Version::new(1, 2, 0)]);
    assert_eq!(catalog.latest(), Some(&Version::new(1, 2, 0)));
  }

  #[test]
  fn steps_keep_encounter_order() {
    let catalog = parse_release_script(SCRIPT);
    assert_eq!(catalog.step("1.1.0"), Some(&["a.txt".to_string()][..]));
    assert_eq!(catalog.step("1.2.0"), Some(&["b.txt".to_string(), "a.txt".to_string()][..]));
  }

  #[test]
  fn unparsable_versions_are_skipped() {
    let catalog = parse_release_script("releases {\n  1.0.0\nnot-a-version\n\n  2.0.0  \n1.0\n}\n");
    assert_eq!(catalog.versions(), &[Version::new(1, 0, 0), Version::new(2, 0, 0)]);
  }

  #[test]
  fn duplicate_versions_are_merged() {
    let catalog = parse_release_script("releases{\n1.0.0\n1.0.0\n0.9.0\n}");
    assert_eq!(catalog.versions(), &[Version::new(0, 9, 0), Version::new(1, 0, 0)]);
  }

  #[test]
  fn prerelease_versions_order_before_release() {
    let catalog = parse_release_script("releases{\n1.0.0\n1.0.0-beta.1\n}");
    assert_eq!(catalog.latest(), Some(&Version::new(1, 0, 0)));
    assert_eq!(catalog.versions()[0].to_string(), "1.0.0-beta.1");
  }

  #[test]
  fn garbage_gives_an_empty_catalog() {
    let catalog = parse_release_script("this is not a release script");
    assert!(catalog.is_empty());
    assert_eq!(catalog.latest(), None);

    let unterminated = parse_release_script("releases{\n1.0.0\n");
    assert!(unterminated.is_empty());
  }

  #[test]
  fn header_whitespace_is_ignored() {
    let catalog = parse_release_script("release:  1.1.0 {\nDownloadFile:a.txt\n}\n");
    assert_eq!(catalog.step("1.1.0"), Some(&["a.txt".to_string()][..]));
  }

  #[test]
  fn header_key_is_not_normalised() {
    let catalog = parse_release_script("release:v1.1.0{\nDownloadFile:a.txt\n}\n");
    assert_eq!(catalog.step("1.1.0"), None);
    assert!(catalog.step("v1.1.0").is_some());
  }

  #[test]
  fn file_names_are_captured_verbatim() {
    let catalog = parse_release_script("release:1.1.0{\nDownloadFile:docs/read me.txt  \nDownloadFile:dos.txt\r\n}\n");
    assert_eq!(
      catalog.step("1.1.0"),
      Some(&["docs/read me.txt  ".to_string(), "dos.txt\r".to_string()][..])
    );
  }

  #[test]
  fn unterminated_file_line_is_dropped() {
    let catalog = parse_release_script("release:1.1.0{\nDownloadFile:a.txt\nDownloadFile:b.txt}\n");
    assert_eq!(catalog.step("1.1.0"), Some(&["a.txt".to_string()][..]));
  }

  #[test]
  fn release_without_files_is_kept() {
    let catalog = parse_release_script("release:1.1.0{\n}\n");
    assert_eq!(catalog.step("1.1.0"), Some(&[][..]));
  }

  #[test]
  fn header_needs_brace_on_same_line() {
    let catalog = parse_release_script("release:1.1.0\n{\nDownloadFile:a.txt\n}\nrelease:1.2.0{\nDownloadFile:b.txt\n}\n");
    assert_eq!(catalog.step("1.1.0"), None);
    assert_eq!(catalog.step("1.2.0"), Some(&["b.txt".to_string()][..]));
  }

  #[test]
  fn later_block_wins() {
    let catalog = parse_release_script("release:1.1.0{\nDownloadFile:a.txt\n}\nrelease:1.1.0{\nDownloadFile:c.txt\n}\n");
    assert_eq!(catalog.step("1.1.0"), Some(&["c.txt".to_string()][..]));
  }

  #[test]
  fn block_order_does_not_matter() {
    let catalog = parse_release_script("release:1.1.0{\nDownloadFile:a.txt\n}\nreleases{\n1.1.0\n1.0.0\n}\n");
    assert_eq!(catalog.versions(), &[Version::new(1, 0, 0), Version::new(1, 1, 0)]);
    assert!(catalog.step("1.1.0").is_some());
  }
}

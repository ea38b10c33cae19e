/// Files needed to move from `from` to `to`, without duplicates, in download order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
  pub from: semver::Version,
  pub to: semver::Version,
  pub files: Vec<String>,
}

use crate::structures::UpdatePlan;

impl UpdatePlan {
  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn files(&self) -> &[String] {
    &self.files
  }
}

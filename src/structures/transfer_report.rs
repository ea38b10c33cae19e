/// What a transport knows about the file it is fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReport {
  pub blocks: u64,
  pub block_size: u64,
  /// Size of the whole file in bytes, `None` when the remote didn't tell
  pub total_size: Option<u64>,
}

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use futures::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use update_express::{Error, UpdateCheck, UpdateStatus, Updater, UpdaterConfig};

#[derive(Parser)]
#[command(name = "update-express", version, about = "Checks for, downloads and installs application updates")]
struct Cli {
  #[command(subcommand)]
  command: Command,

  /// Log progress and show full diagnostics on errors
  #[arg(long, short, global = true)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Command {
  /// Tell whether a newer release exists
  Check(Source),
  /// Download and install the latest release
  Update {
    #[command(flatten)]
    source: Source,

    /// Don't ask before downloading
    #[arg(long, short)]
    yes: bool,
  },
}

#[derive(Args)]
struct Source {
  /// JSON file holding update_base_url, current_version and target_directory
  #[arg(long, conflicts_with_all = ["url", "current", "target"])]
  config: Option<PathBuf>,

  /// Directory url holding updatescript.ini and Updates/
  #[arg(long, required_unless_present = "config")]
  url: Option<String>,

  /// Version currently installed
  #[arg(long, required_unless_present = "config")]
  current: Option<String>,

  /// Installation directory the update is merged into
  #[arg(long, required_unless_present = "config")]
  target: Option<PathBuf>,
}

impl Source {
  async fn config(&self, verbose: bool) -> Result<UpdaterConfig, Error> {
    let config = match (&self.config, &self.url, &self.current, &self.target) {
      (Some(path), _, _, _) => UpdaterConfig::load(path).await?,
      (None, Some(url), Some(current), Some(target)) => UpdaterConfig::new(url, current, target.clone())?,
      _ => return Err(Error::InvalidConfig("either --config or --url, --current and --target are required".to_string())),
    };
    let verbose = verbose || config.verbose();
    Ok(config.with_verbose(verbose))
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "info" } else { "warn" }));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  let (source, assume_yes) = match &cli.command {
    Command::Check(source) => (source, None),
    Command::Update { source, yes } => (source, Some(*yes)),
  };
  let config = match source.config(cli.verbose).await {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{}", e.user_message(cli.verbose));
      return ExitCode::FAILURE;
    }
  };
  let verbose = config.verbose();
  let updater = Arc::new(Updater::new(config));

  let result = match assume_yes {
    None => check(&updater).await,
    Some(yes) => update(updater.clone(), yes).await,
  };
  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      match updater.status() {
        status @ (UpdateStatus::UpdateFailed(_) | UpdateStatus::UpdateCanceled) => eprintln!("{}", status),
        _ => eprintln!("{}", e.user_message(verbose)),
      }
      ExitCode::FAILURE
    }
  }
}

async fn check(updater: &Updater) -> Result<(), Error> {
  updater.check_for_update().await?;
  println!("{}", updater.status());
  Ok(())
}

async fn update(updater: Arc<Updater>, assume_yes: bool) -> Result<(), Error> {
  let check = updater.check_for_update().await?;
  println!("{}", updater.status());
  let UpdateCheck::UpdateAvailable { catalog, .. } = check else {
    return Ok(());
  };
  if !assume_yes && !confirm("Download and install? [y/N] ").await? {
    updater.cancel();
    println!("{}", updater.status());
    return Ok(());
  }

  let cancellation = CancellationToken::new();
  let on_interrupt = cancellation.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      warn!("Interrupted, stopping after the current file");
      on_interrupt.cancel();
    }
  });

  let (sender, mut receiver) = futures::channel::mpsc::unbounded();
  let downloader = updater.clone();
  let download = tokio::spawn(async move { downloader.download(&catalog, Some(sender), &cancellation).await });

  println!("{}", UpdateStatus::Downloading);
  while let Some(percentage) = receiver.next().await {
    eprint!("\r{:>3}%", percentage as u32);
    let _ = std::io::stderr().flush();
  }
  eprintln!();

  let staging = download.await??;
  println!("{}", UpdateStatus::Installing);
  updater.install(staging).await?;
  println!("{}", updater.status());
  Ok(())
}

async fn confirm(question: &str) -> Result<bool, Error> {
  print!("{}", question);
  std::io::stdout().flush()?;
  let mut answer = String::new();
  tokio::io::BufReader::new(tokio::io::stdin()).read_line(&mut answer).await?;
  Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

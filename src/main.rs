use asn_zone::task::convert::ConvertTask;
use asn_zone::task::split::SplitTask;
use asn_zone::task::Task;
use asn_zone::AppConfig;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{error, info};

const CONFIG_PATH: &str = "config.json";

// the doc comments turn into the CLI help text
#[derive(Parser)]
/// Convert a prefix-to-ASN announcement table on stdin into family-tagged
/// reverse zone data on stdout.
struct Args {
    /// JSON configuration file. Without it, ./config.json is used if present.
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read `<prefix> <asn>` lines and write tagged zone data (default).
    Convert,
    /// Read tagged zone data and write one file per address family.
    Split {
        #[arg(long)]
        ipv4: PathBuf,
        #[arg(long)]
        ipv6: PathBuf,
    },
}

fn init_tracing(level: &str) {
    let level = tracing::Level::from_str(level).unwrap_or(tracing::Level::WARN);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    let task: Box<dyn Task> = match command {
        Command::Convert => Box::new(ConvertTask::new(config)),
        Command::Split { ipv4, ipv6 } => Box::new(SplitTask::new(ipv4, ipv6)),
    };

    info!("Running task: {}", task.name());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    task.run(&mut stdin.lock(), &mut stdout.lock())?;

    info!("Successfully completed task: {}", task.name());

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The log level comes from the configuration, so it is loaded before the
    // subscriber exists.
    let config = match AppConfig::load(args.config.as_deref(), Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&AppConfig::default().log_level);
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level);

    match run(args.command.unwrap_or(Command::Convert), config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber;

/// Validated command-line options, read-only for the remainder of the run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub repositories: Vec<String>,
    pub keep: bool,
    pub quiet: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "hubzip",
    version,
    about = "Download and decompress default-branch archives from GitHub",
    after_help = "example: hubzip mitsuhiko/flask"
)]
struct Cli {
    #[arg(
        value_name = "OWNER/REPOSITORY",
        required = true,
        help = "GitHub owner/repository pairs to download and decompress"
    )]
    repositories: Vec<String>,

    #[arg(
        long = "keep",
        help = "Keep the downloaded archives instead of deleting them"
    )]
    keep: bool,

    #[arg(
        long = "quiet",
        help = "Do not print information messages to stdout"
    )]
    quiet: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,
}

pub fn parse_args() -> RunOptions {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Diagnostics go to stderr so that --quiet can guarantee an empty
    // stdout.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    RunOptions {
        repositories: cli.repositories,
        keep: cli.keep,
        quiet: cli.quiet,
    }
}

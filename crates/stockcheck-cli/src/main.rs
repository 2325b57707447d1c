mod batch;
mod input;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockcheck")]
#[command(about = "Per-store stock checker for storefront product pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check every product URL in the input file and write stock reports
    Check(CheckArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
struct CheckArgs {
    /// File with one product page URL per line
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory that receives the spreadsheets
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Pause between consecutive products, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Skip TLS certificate validation
    #[arg(long)]
    insecure: bool,
}

impl CheckArgs {
    /// Flags given on the command line win over environment configuration.
    fn apply_to(self, config: &mut stockcheck_core::AppConfig) {
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.inter_product_delay_ms = delay_ms;
        }
        if self.insecure {
            config.accept_invalid_certs = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = stockcheck_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = match cli.command {
        Some(Commands::Check(args)) => args,
        None => CheckArgs::default(),
    };
    args.apply_to(&mut config);
    tracing::debug!(?config, "configuration loaded");

    batch::run_check(&config).await
}

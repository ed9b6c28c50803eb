use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use dossier_core::Config;

mod tui;

#[derive(Parser)]
#[command(name = "dossier")]
#[command(about = "Terminal deep-research assistant", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to ./dossier.toml, then
    /// ~/.config/dossier/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model override for this run
    #[arg(long)]
    model: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Quiet by default; RUST_LOG opts into diagnostics on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", Config::default_config_string());
        return Ok(());
    }

    let mut config = match cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    if let Some(model) = cli.model {
        config.provider.model = Some(model);
    }

    tui::run(config).await
}

use anyhow::Result;
use clap::Parser;
use climate_cli::{execute, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let output = execute(&cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

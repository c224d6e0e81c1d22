//! # toolrec: A CLI for the Medical Tool Recommender
//!
//! This binary is a thin entrypoint; all logic lives in the `toolrec_cli`
//! library crate.

use anyhow::Result;
use clap::Parser;
use toolrec_cli::{run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("toolrec=info".parse()?))
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("[toolrec error] Failed to execute command: {e:?}");
        std::process::exit(1);
    }

    Ok(())
}

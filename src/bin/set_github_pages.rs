//! Standalone GitHub Pages source configurator.
//!
//! `set-github-pages <GITHUB_TOKEN> <OWNER> <REPO>` points the repository's
//! Pages site at `gh-pages` (root). Missing arguments print usage and exit 0.
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use relsite::pages::{self, SetPagesArgs};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "set-github-pages")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: SetPagesArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = pages::run(&cli.args)
        .await
        .context("Failed to configure GitHub Pages")?;
    println!("{}", outcome.report("set-github-pages", &cli.args.source()));
    Ok(())
}

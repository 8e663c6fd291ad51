use anyhow::Result;
use clap::Parser;

use edugen_chat::app::repl;
use edugen_chat::cli::Cli;
use edugen_chat::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_cli(&cli);

    repl::run(&config).await
}

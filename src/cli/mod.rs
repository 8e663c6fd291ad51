use clap::Parser;
use std::path::PathBuf;

mod tests;

/// CLI arguments for edugen
#[derive(Debug, Parser)]
#[command(name = "edugen")]
#[command(about = "EduGen AI - educational assistant chat in your terminal")]
#[command(version)]
pub struct Cli {
    /// Base URL of the EduGen generation service
    #[arg(
        long,
        env = "EDUGEN_API_URL",
        value_name = "URL",
        default_value = "http://localhost:8000/api/v1"
    )]
    pub api_url: String,

    /// Directory where conversations are persisted
    #[arg(
        long,
        env = "EDUGEN_DATA_DIR",
        value_name = "DIR",
        default_value = "~/.edugen"
    )]
    pub data_dir: PathBuf,

    /// Request timeout for generation calls, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Print request details while chatting
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

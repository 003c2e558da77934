use clap::Parser;
use log::warn;
use ragchat::core::config;
use ragchat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ragchat", about = "Terminal chat client for a question-answering service")]
struct Args {
    /// Answer service endpoint (overrides RAGCHAT_ENDPOINT and the config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Where to write the log
    #[arg(long, default_value = "ragchat.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the TUI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        config::RagchatConfig::default()
    });
    let resolved = config::resolve(&file_config, args.endpoint.as_deref());

    log::info!("ragchat starting up against {}", resolved.endpoint);

    tui::run(resolved)
}

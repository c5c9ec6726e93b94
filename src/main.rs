use chatview::core::config::{self, ChatviewConfig, CliOverrides};
use chatview::tui;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "chatview", about = "Terminal chat transcript for a chat backend")]
struct Args {
    /// Backend origin, e.g. http://localhost:8000
    #[arg(short, long)]
    backend: Option<String>,

    /// Hide the Reload button
    #[arg(long)]
    no_reload: bool,

    /// Hide the Stop button
    #[arg(long)]
    no_stop: bool,

    /// Read-only transcript: no composer submit, no starter questions
    #[arg(long)]
    no_append: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (ChatviewConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        backend_url: args.backend,
        no_reload: args.no_reload,
        no_stop: args.no_stop,
        no_append: args.no_append,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to chatview.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("chatview.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("chatview starting up against {}", resolved.backend_url);

    tui::run(resolved)
}

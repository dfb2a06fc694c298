use clap::Parser;

mod cli;
mod config;
mod errors;
#[cfg(test)]
mod tests;
mod video;
mod web;

use config::Config;
use video::extractor::YtDlpExtractor;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();
    let mut config = Config::load(args.config.as_deref())?;

    match args.command {
        cli::Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            web::start_daemon(config);
            Ok(())
        }

        cli::Command::Fetch { url } => {
            let extractor = YtDlpExtractor::new(config.extractor);
            let meta = video::fetch_video(&url, &extractor)?;
            println!("{}", serde_json::to_string_pretty(&meta).unwrap());
            Ok(())
        }
    }
}

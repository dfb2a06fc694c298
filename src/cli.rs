use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML config file
    #[clap(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service.
    Serve {
        /// Bind host, overrides the config file
        #[clap(long)]
        host: Option<String>,

        /// Bind port, overrides the config file
        #[clap(short, long)]
        port: Option<u16>,
    },

    /// Fetch metadata for one video and print it as JSON.
    Fetch {
        /// A YouTube video or Shorts URL
        url: String,
    },
}

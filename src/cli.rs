use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{serve, ServeOptions};

#[derive(Parser)]
#[command(name = "weatherdash")]
#[command(about = "Weather dashboard API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Configuration file; missing files are ignored
        #[arg(short, long, default_value = "weatherdash.toml")]
        config: String,

        /// Bind address for the web server, overrides the configuration
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:10000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,

        /// Directory holding the built dashboard (index.html and the wasm bundle)
        #[arg(short, long)]
        static_dir: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                config,
                bind_address,
                static_dir,
            } => {
                serve(ServeOptions {
                    config_path: config,
                    bind_address,
                    static_dir,
                })
                .await?;
            }
        }
        Ok(())
    }
}

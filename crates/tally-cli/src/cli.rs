use clap::{Args, Parser, Subcommand};
use tally_config::ServerConfig;

/// Top-level CLI parser for the `tally` binary.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Tally - session-backed todo lists")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Start the web server.
    Serve(ServeArgs),
    /// Print the JSON Schema of a session's stored state.
    Schema,
}

/// Overrides for the `[server]` configuration table.
#[derive(Clone, Debug, Default, Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,

    /// Worker threads
    #[arg(long)]
    pub workers: Option<usize>,
}

impl ServeArgs {
    pub fn apply(&self, server: &mut ServerConfig) {
        if let Some(host) = &self.host {
            server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        if let Some(workers) = self.workers {
            server.workers = workers;
        }
    }
}

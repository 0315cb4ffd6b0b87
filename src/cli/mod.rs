pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "newcomers")]
#[command(about = "First-time contributors of GitHub repositories, by month", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Resolve new contributors of a repository once and print them as JSON
    Contributors {
        /// Repository name within the configured organization
        repository: String,

        /// Four-digit year, e.g. 2013
        #[arg(short, long)]
        year: Option<String>,

        /// Two-digit month, e.g. 05 (requires --year)
        #[arg(short, long, requires = "year")]
        month: Option<String>,
    },
}

//! formcraft CLI — serve the forms API and work with forms from the shell.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "formcraft", version, about = "Form builder API and tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the forms REST API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored forms
    List {
        #[command(flatten)]
        remote: commands::Remote,
    },

    /// Print one form as JSON
    Show {
        /// Form identifier
        #[arg(long)]
        id: String,

        #[command(flatten)]
        remote: commands::Remote,
    },

    /// Delete a form
    Delete {
        /// Form identifier
        #[arg(long)]
        id: String,

        #[command(flatten)]
        remote: commands::Remote,
    },

    /// Validate a form JSON file without saving it
    Check {
        /// Path to the form JSON file
        #[arg(long)]
        file: PathBuf,
    },

    /// Validate a form JSON file and save it through the API
    Submit {
        /// Path to the form JSON file
        #[arg(long)]
        file: PathBuf,

        /// Update this form instead of the file's id (or creating one)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        remote: commands::Remote,
    },

    /// Create a starter config and example form
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("formcraft=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port, config } => {
            commands::serve::execute(host, port, config).await
        }
        Commands::List { remote } => commands::list::execute(remote).await,
        Commands::Show { id, remote } => commands::show::execute(id, remote).await,
        Commands::Delete { id, remote } => commands::delete::execute(id, remote).await,
        Commands::Check { file } => commands::check::execute(file),
        Commands::Submit { file, id, remote } => {
            commands::submit::execute(file, id, remote).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

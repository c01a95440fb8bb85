//! Fixture server binary.
//!
//! ```text
//! fixture-server [SERVER_TYPE] [--port N] [--config FILE]
//! ```
//!
//! `SERVER_TYPE` selects the engine (`cherrypy` or `wsgiref`, case and
//! whitespace ignored) and defaults to the pooled engine.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fixture_server::config::{resolve_config, ConfigOverrides};
use fixture_server::observability::logging;
use fixture_server::server::{self, EngineKind};

#[derive(Parser)]
#[command(name = "fixture-server")]
#[command(about = "Inspectable HTTP fixture server", long_about = None)]
struct Cli {
    /// Server engine to run (cherrypy, wsgiref)
    server_type: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = ConfigOverrides {
        engine: cli.server_type,
        port: cli.port,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    logging::init(&config.observability.log_level);

    // Resolve the engine before anything is bound.
    let kind: EngineKind = config.engine.0.parse::<EngineKind>()?;

    tracing::info!(
        engine = %kind,
        port = config.listener.port,
        "Configuration loaded"
    );

    for (label, url) in server::endpoints(config.listener.port) {
        println!("{} : {}", label, url);
    }
    println!("Starting the {} web server", kind);

    let mut server = server::create_server(kind, config)?;
    server.start()?;
    server.serve_until_stopped()?;

    tracing::info!("Shutdown complete");
    Ok(())
}


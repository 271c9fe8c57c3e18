/*!
 * Sintra controller - process entry point
 *
 * Binds the report listener, starts the periodic reporter and runs until Ctrl-C.
 */

use clap::Parser;
use sintra::{
    config::ControllerConfig,
    error::{Result, EXIT_SUCCESS},
    logging, reporter, server, AppState,
};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::watch;

#[derive(Parser, Debug)]
#[command(name = "sintra")]
#[command(
    version,
    about = "Adaptive traffic-signal controller driven by vehicle position reports",
    long_about = None
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH", env = "SINTRA_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn load_config(&self) -> Result<ControllerConfig> {
        let mut config = match self.config {
            Some(ref path) => ControllerConfig::from_file(path)?,
            None => ControllerConfig::default(),
        };

        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.debug {
            config.verbose = true;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    logging::init_logging(&config)?;
    tracing::info!("Sintra controller v{}", sintra::VERSION);

    let state = AppState::new(&config)?;
    let listener = TcpListener::bind(config.bind_address()?).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let reporter_task = tokio::spawn(reporter::run(
        state.clone(),
        config.report_interval(),
        wait_for_shutdown(shutdown_rx.clone()),
    ));

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown requested"),
            Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
        }
        shutdown_tx.send_replace(true);
    });

    server::serve(listener, state, wait_for_shutdown(shutdown_rx)).await?;

    if let Err(e) = reporter_task.await {
        tracing::warn!("Reporter task ended abnormally: {}", e);
    }

    Ok(())
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    // A dropped sender also means shut down
    let _ = rx.wait_for(|stop| *stop).await;
}

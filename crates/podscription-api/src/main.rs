//! Podscription CLI and REST API entry point.
//!
//! Binary name: `podscription`
//!
//! Parses CLI arguments, loads configuration, wires the consultation service,
//! then dispatches to a command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, SessionsAction};
use podscription_infra::config::{apply_overrides, load_config};
use podscription_observe::tracing_setup::{TracingConfig, init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging, config or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "podscription", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(&TracingConfig {
        verbosity: cli.verbose,
        quiet: cli.quiet,
        json: cli.log_json,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).await;
    let config = apply_overrides(config, cli.overrides());
    let api_key = cli.api_key();

    match cli.command {
        Commands::Serve { .. } => {
            let state = AppState::init(&config, api_key)?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, model = %config.llm.model, "Podscription API listening");

            if !cli.quiet {
                println!(
                    "  {} Podscription API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Ask { session, message } => {
            let state = AppState::init(&config, api_key)?;
            cli::ask::ask(&state, session, &message.join(" "), cli.json, cli.quiet).await?;
        }

        Commands::Sessions { action } => {
            let store = state::open_store(&config);
            match action {
                SessionsAction::List => cli::sessions::list_sessions(&store, cli.json).await?,
                SessionsAction::Show { id } => {
                    cli::sessions::show_session(&store, id, cli.json).await?
                }
            }
        }

        Commands::Completions { .. } => unreachable!("handled before tracing setup"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

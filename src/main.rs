use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use salary_calculator::api::{AppState, create_router};
use salary_calculator::calculation::PayrollCalculator;
use salary_calculator::config::ConfigLoader;
use salary_calculator::format::{parse_won, render_breakdown};

#[derive(Parser, Debug)]
#[command(name = "salary-calculator", version, about = "Korean net salary calculator")]
struct Cli {
    /// Rate table YAML to use instead of the built-in 2024 table.
    #[arg(long, global = true, value_name = "FILE")]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve(ServeCommand),
    /// Calculate net pay for one salary and print the breakdown.
    Calculate(CalculateCommand),
}

#[derive(Parser, Debug)]
#[command(name = "serve")]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[derive(Args, Debug)]
struct CalculateCommand {
    /// Annual gross salary; grouping commas and a trailing 원 are accepted.
    salary: String,
    /// Dependents including the employee.
    #[arg(long, short, default_value_t = 1)]
    dependents: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let loader = load_rates(cli.rates.as_ref())?;

    let command = match cli.command {
        Some(command) => command,
        // Same parser as `serve`, so PORT is validated identically.
        None => Command::Serve(ServeCommand::parse_from(["serve"])),
    };

    match command {
        Command::Serve(opts) => serve(opts, loader).await,
        Command::Calculate(opts) => calculate(opts, loader),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_rates(path: Option<&PathBuf>) -> Result<ConfigLoader> {
    let loader = match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("failed to load rate table {}", path.display()))?,
        None => ConfigLoader::embedded().context("built-in rate table is invalid")?,
    };
    info!(
        name = loader.config().name(),
        tax_year = loader.config().tax_year(),
        "rate table loaded"
    );
    Ok(loader)
}

async fn serve(opts: ServeCommand, loader: ConfigLoader) -> Result<()> {
    let addr = SocketAddr::from((opts.host, opts.port));
    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, "salary calculator listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    info!("shutdown complete");
    Ok(())
}

fn calculate(opts: CalculateCommand, loader: ConfigLoader) -> Result<()> {
    let Some(salary) = parse_won(&opts.salary) else {
        bail!("enter an annual salary, e.g. 40,000,000");
    };
    if salary.is_zero() {
        bail!("annual salary must be greater than 0");
    }

    let calculator = PayrollCalculator::new(Arc::new(loader.into_config()));
    let result = calculator.calculate(salary, opts.dependents)?;
    print!("{}", render_breakdown(&result.breakdown));
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };

    info!("shutdown signal received");
}

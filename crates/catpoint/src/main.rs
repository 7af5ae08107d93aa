use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use catpoint::Config;
use catpoint::SecurityService;
use catpoint::security::InMemorySecurityRepository;
use catpoint::security::TracingListener;
use catpoint::shell;
use catpoint::shell::Outcome;
use catpoint_image::ImageService;
use clap::Parser;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_CONFIG_PATH: &str = "catpoint.toml";

type Service = SecurityService<InMemorySecurityRepository, Box<dyn ImageService>>;

/// Home security controller console
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Configuration file [default: catpoint.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, config_path) = load_config(args.config.as_deref())?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(config.logging.filter())
        .init();

    tracing::info!("catpoint starting");
    match config_path {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }

    let mut service = SecurityService::new(config.build_repository(), config.image.build());
    service.add_status_listener(Arc::new(TracingListener));
    tracing::info!(
        "System {} with {} sensor(s)",
        service.arming_status()?,
        service.sensors()?.len()
    );

    match args.script {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            run_console(&mut service, BufReader::new(file)).await?;
        }
        None => {
            println!("{}", shell::HELP);
            run_console(&mut service, BufReader::new(tokio::io::stdin())).await?;
        }
    }

    tracing::info!("catpoint shutdown complete");
    Ok(())
}

/// Load the explicit config file, or the default one if it exists
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok((Config::default(), None));
            }
            default
        }
    };

    let config = Config::from_file(&path)?;
    Ok((config, Some(path)))
}

async fn run_console<B>(service: &mut Service, reader: B) -> anyhow::Result<()>
where
    B: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read command")?,
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => tracing::info!("Received shutdown signal"),
                    Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
                }
                break;
            }
        };

        // End of input
        let Some(line) = line else {
            break;
        };

        let command = match shell::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };

        match shell::execute(service, command) {
            Ok(Outcome::Continue(message)) => println!("{}", message),
            Ok(Outcome::Quit) => break,
            Err(e) => tracing::warn!("{:#}", e),
        }
    }

    Ok(())
}

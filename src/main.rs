use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::{Cli, Commands, RunArgs};
use orderpub::config::Config;
use orderpub::preset::{OrderIdSource, PresetRegistry};
use orderpub::publisher::Publisher;
use orderpub::transport::{EventTransport, HttpTransport, HttpTransportConfig, MockTransport};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orderpub")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("orderpub.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Without RUST_LOG the filter lets everything through and the global max
    // level does the gating, so the config level can be applied later
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(target))
        .init();
    if !rust_log_set() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn rust_log_set() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

/// RUST_LOG wins over the config level
fn apply_log_level(config: &Config) -> Result<()> {
    if rust_log_set() {
        return Ok(());
    }
    if let Some(level) = config.log_level_filter()? {
        log::set_max_level(level);
    }
    Ok(())
}

async fn run_application(cli: &Cli, config: Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => handle_run_command(&RunArgs::default(), config, cli.is_verbose()).await,
        Some(Commands::Run(args)) => handle_run_command(args, config, cli.is_verbose()).await,
        Some(Commands::Presets) => handle_presets_command(&config),
        Some(Commands::Show { preset }) => handle_show_command(preset.as_deref(), config),
    }
}

async fn handle_run_command(args: &RunArgs, config: Config, verbose: bool) -> Result<()> {
    let config = config.with_overrides(args.preset.as_deref(), args.url.as_deref(), args.interval_secs);
    config.validate().context("Invalid configuration")?;

    let registry = PresetRegistry::with_overrides(&config.presets).context("Failed to build presets")?;
    let preset = registry.get(&config.publisher.preset)?.clone();

    let transport = HttpTransport::new(HttpTransportConfig {
        url: config.publisher.url.clone(),
        timeout: config.publisher.timeout(),
    })?;

    let endpoint = transport.endpoint().to_string();
    let mut publisher = Publisher::new(transport, preset, config.publisher.interval());

    info!(
        "Publishing preset {} to {} every {:?}",
        publisher.preset().name,
        endpoint,
        publisher.interval()
    );
    if verbose {
        println!(
            "{} preset {} -> {} every {}ms",
            "Publishing:".green(),
            publisher.preset().name,
            endpoint,
            publisher.interval().as_millis()
        );
    }

    match args.count {
        Some(count) => publisher.run_iterations(count).await,
        None => {
            publisher
                .run_until(async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        log::error!("Failed to listen for ctrl-c: {}", e);
                        std::future::pending::<()>().await;
                    }
                })
                .await
        }
    }

    info!("Publisher stopped: {}", publisher.stats());
    if verbose {
        println!("{} {}", "Stopped:".cyan(), publisher.stats());
    }
    Ok(())
}

fn handle_presets_command(config: &Config) -> Result<()> {
    let registry = PresetRegistry::with_overrides(&config.presets).context("Failed to build presets")?;

    for preset in registry.iter() {
        let marker = if preset.name == config.publisher.preset { "*" } else { " " };
        let source = match &preset.order_id {
            OrderIdSource::Counter => preset.order_id.to_string().normal(),
            OrderIdSource::Fixed(_) => preset.order_id.to_string().yellow(),
        };
        println!(
            "{} {:<8} {:<10} {} -> {}",
            marker,
            preset.name.green(),
            preset.event_name,
            source,
            preset.destination
        );
    }
    Ok(())
}

fn handle_show_command(preset: Option<&str>, config: Config) -> Result<()> {
    let config = config.with_overrides(preset, None, None);
    let registry = PresetRegistry::with_overrides(&config.presets).context("Failed to build presets")?;
    let preset = registry.get(&config.publisher.preset)?.clone();

    // Nothing is sent; the publisher only builds the first event
    let mut publisher = Publisher::new(MockTransport::new(), preset, config.publisher.interval());

    let event = publisher.next_event();
    println!("{} {}", "POST".cyan(), config.publisher.url);
    println!("{}", event.to_json_pretty()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(&config).context("Failed to apply log level")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, config).await.context("Application failed")?;

    Ok(())
}

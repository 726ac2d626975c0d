//! Ward sentinel daemon.
//!
//! Runs the risk engine against the demo ward: seeds patients and tests,
//! starts the periodic scheduler, and logs alerts until interrupted.
//!
//! ```bash
//! # Run with defaults
//! cargo run --bin sentinel
//!
//! # Deterministic resolutions, JSON logs
//! cargo run --bin sentinel -- --seed 42 --log-format json
//! ```

use std::path::Path;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mdr_sentinel::{Engine, EngineConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "sentinel")]
#[command(version, about = "MDR/XDR ward risk engine", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "sentinel.toml")]
    config: String,

    /// Override the resolution RNG seed (0 = system random)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the test countdown interval in milliseconds
    #[arg(long)]
    countdown_interval_ms: Option<u64>,

    /// Skip seeding the demo ward
    #[arg(long)]
    no_demo: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SENTINEL_LOG", default_value = "info")]
    log_level: String,

    /// Output format (pretty, json, compact)
    #[arg(long, default_value = "pretty")]
    log_format: String,

    /// Log file path (logs to both file and stdout)
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sample config file
    GenerateConfig {
        /// Output file path
        #[arg(short, long, default_value = "sentinel.toml")]
        output: String,
    },
    /// Validate config without running
    ValidateConfig,
    /// Run the engine (default)
    Run,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::GenerateConfig { ref output }) => {
            generate_sample_config(output)?;
            return Ok(());
        }
        Some(Commands::ValidateConfig) => {
            let config = load_config(&cli)?;
            config.validate()?;
            println!("Config OK: {}", cli.config);
            return Ok(());
        }
        Some(Commands::Run) | None => {}
    }

    setup_logging(&cli)?;
    let config = load_config(&cli)?;
    run_engine(config, &cli).await
}

async fn run_engine(config: EngineConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    print_startup_banner(&config, !cli.no_demo);

    let engine = Engine::new(config)?;
    if !cli.no_demo {
        engine.seed_demo();
    }

    engine.start()?;
    info!("engine running, press ctrl-c to stop");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    engine.stop().await?;

    // Final picture for the operator.
    let summary = engine.ward_summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    for alert in engine.alerts() {
        println!("{}", alert.format());
    }
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn load_config(cli: &Cli) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = if Path::new(&cli.config).exists() {
        let content = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&content)?
    } else {
        EngineConfig::default()
    };

    if let Some(seed) = cli.seed {
        config.resolution.random_seed = seed;
    }
    if let Some(interval) = cli.countdown_interval_ms {
        config.scheduler.countdown_interval_ms = interval;
    }

    config.validate()?;
    Ok(config)
}

fn setup_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if let Some(log_path) = &cli.log_file {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        let file = std::fs::File::create(log_path)?;
        let file = Mutex::new(file);

        // When logging to file, use JSON for both streams (easier to parse)
        let stdout_layer = tracing_subscriber::fmt::layer().json();
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .json();

        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .with(file_layer)
            .init();
        return Ok(());
    }

    match cli.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .compact()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
        }
    }
    Ok(())
}

fn generate_sample_config(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let content = toml::to_string_pretty(&EngineConfig::default())?;
    let with_comments = format!(
        r#"# Ward sentinel configuration
# See: cargo run --bin sentinel -- --help

{content}"#
    );
    std::fs::write(path, with_comments)?;
    println!("Sample config written to: {path}");
    Ok(())
}

fn print_startup_banner(config: &EngineConfig, demo: bool) {
    let version = env!("CARGO_PKG_VERSION");
    println!("sentinel v{version}");
    println!(
        "  countdown {}ms / refresh {}ms / sweep {}ms",
        config.scheduler.countdown_interval_ms,
        config.scheduler.refresh_interval_ms,
        config.scheduler.sweep_interval_ms,
    );
    println!(
        "  resolution p(neg)={} p(mdr)={} p(xdr)={}, budget {}",
        config.resolution.p_negative,
        config.resolution.p_mdr,
        config.resolution.p_xdr,
        config.resolution.initial_budget,
    );
    if demo {
        println!("  demo ward seeded");
    }
}

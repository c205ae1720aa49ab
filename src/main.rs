use std::fmt::Arguments;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deferlog::{Config, Facade, Sink};

/// Demonstrates early diagnostics being replayed into a late backend
#[derive(Debug, Parser)]
#[command(name = "deferlog-demo", version)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Number of messages to log before the backend exists
    #[arg(long, default_value_t = 3)]
    early: usize,

    /// Log a fatal message before the backend exists
    #[arg(long)]
    fatal_early: bool,
}

/// Host-side adapter from the facade onto `tracing`
struct TracingSink;

impl Sink for TracingSink {
    fn debug(&self, args: Arguments<'_>) {
        tracing::debug!("{}", args);
    }

    fn info(&self, args: Arguments<'_>) {
        tracing::info!("{}", args);
    }

    fn error(&self, args: Arguments<'_>) {
        tracing::error!("{}", args);
    }

    fn fatal(&self, args: Arguments<'_>) {
        tracing::error!(fatal = true, "{}", args);
        std::process::exit(deferlog::FATAL_EXIT_CODE);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply(Facade::global());
    if args.debug && !deferlog::is_debug_enabled() {
        deferlog::set_debug_enabled(true);
    }

    // No backend yet: these are buffered
    deferlog::info!("demo starting");
    for i in 0..args.early {
        deferlog::info!("early message {}", i);
    }
    deferlog::debug!("dropped, nothing is installed");
    if args.fatal_early {
        deferlog::fatal!("fatal before any backend was installed");
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .init();

    deferlog::install(Arc::new(TracingSink));

    {
        let _timer = deferlog::track("backend warmup");
        deferlog::multi_line(false, "multi-line report:\nfirst\nsecond");
        deferlog::multi_line(true, "debug detail\nmore detail");
    }

    deferlog::info!("demo finished");
    Ok(())
}

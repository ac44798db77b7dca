//! Skeleton CLI - demo application and config checker

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use skeleton::demo::{spawn_ticker, ClockPage, CounterPage, EventLogPage};
use skeleton::{FixSuggestion, Program, Skeleton, SkeletonConfig, SkeletonError};

#[derive(Parser)]
#[command(name = "skeleton")]
#[command(about = "Skeleton - multi-tab terminal application shell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the demo application
    Run {
        /// Path to a YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write logs to this file (the terminal belongs to the UI)
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Uptime widget refresh period in milliseconds
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },

    /// Validate a config file
    CheckConfig {
        /// Path to a YAML config file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            log_file,
            tick_ms,
        } => run_demo(config.as_deref(), log_file.as_deref(), tick_ms).await,
        Commands::CheckConfig { file } => check_config(&file),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if let Some(suggestion) = e
            .downcast_ref::<SkeletonError>()
            .and_then(|e| e.fix_suggestion())
        {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_demo(config: Option<&Path>, log_file: Option<&Path>, tick_ms: u64) -> anyhow::Result<()> {
    init_logging(log_file)?;

    let config = match config {
        Some(path) => SkeletonConfig::load(path)?,
        None => SkeletonConfig::default(),
    };

    let mut skeleton = Skeleton::with_config(&config)?;
    skeleton
        .add_page("clock", "Clock", ClockPage::new())
        .add_page("counter", "Counter", CounterPage::new())
        .add_page("events", "Events", EventLogPage::new())
        .add_widget("help", "ctrl+c quit · ctrl+←/→ switch tabs");

    let program = Program::new(skeleton);
    let ticker = spawn_ticker(program.context(), Duration::from_millis(tick_ms.max(1)));
    let result = program.run().await;
    ticker.abort();

    Ok(result?)
}

fn check_config(file: &Path) -> anyhow::Result<()> {
    let config = SkeletonConfig::load(file)?;
    let keymap = config.keymap()?;
    let theme = config.theme();

    println!("{} Config '{}' is valid", "✓".green(), file.display());
    println!("  Refresh capacity: {}", config.refresh_capacity);
    println!("  Page alignment: {:?}", theme.page_alignment);
    println!(
        "  Tab padding: {} / {}",
        theme.tab_padding_left, theme.tab_padding_right
    );
    println!("  Key bindings: {}", keymap.bindings().count());

    Ok(())
}

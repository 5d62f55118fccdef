mod board;
mod monitor;
mod reload;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kwsbit_core::{AppConfig, BoardCommand, BoardDisplay};
use kwsbit_engine::ServiceRegistry;
use kwsbit_session::{harness, Indicator, InitPolicy, LogIndicator, Recognition, Session};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "kwsbit.toml";

#[derive(Parser)]
#[command(name = "kwsbit", about = "Keyword spotting session host for micro:bit voice blocks")]
struct Cli {
    /// Path to the configuration file (built-in defaults when kwsbit.toml is absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one recognition and print the result
    Listen,
    /// Recognize continuously until Ctrl-C
    Monitor {
        /// Pause between recognitions
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
    },
    /// Time a series of recognitions
    Bench {
        #[arg(long, default_value_t = 10)]
        runs: usize,
    },
    /// Terminal board emulator with buttons and LED matrix
    Board,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path, cli.config.is_none())?;

    let board_mode = matches!(cli.command, Command::Board);
    let log_buffer = Arc::new(Mutex::new(VecDeque::<String>::new()));

    let env_filter =
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal UI owns the screen in board mode, so logs only go to its buffer there
    let fmt_layer = (!board_mode).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });
    let board_log_layer =
        board_mode.then(|| kwsbit_tui::BoardLogLayer::new(Arc::clone(&log_buffer), 1000));

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(board_log_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!(engine = %config.service.engine, "kwsbit starting");

    let display = Arc::new(Mutex::new(BoardDisplay::Blank));
    let indicator: Box<dyn Indicator> = if board_mode {
        Box::new(kwsbit_tui::BoardIndicator::new(Arc::clone(&display)))
    } else {
        Box::new(LogIndicator)
    };
    let session = build_session(&config, indicator)?;

    match cli.command {
        Command::Listen => run_listen(session),
        Command::Monitor { interval_ms } => {
            run_monitor(session, &config_path, config, Duration::from_millis(interval_ms)).await
        }
        Command::Bench { runs } => run_bench(session, runs),
        Command::Board => run_board(session, display, &config_path, config, log_buffer).await,
    }
}

fn load_config(path: &Path, is_default: bool) -> Result<AppConfig> {
    if is_default && !path.exists() {
        return Ok(AppConfig::default());
    }
    AppConfig::load_from_file(path)
        .with_context(|| format!("failed to load config from {:?}", path))
}

fn build_session(config: &AppConfig, indicator: Box<dyn Indicator>) -> Result<Session> {
    let registry = ServiceRegistry::new();
    let engine_config = config
        .service
        .engine_config()
        .context("invalid engine settings")?;
    let service = registry
        .create_configured(&config.service.engine, &engine_config)
        .with_context(|| {
            format!(
                "failed to create engine '{}' (available: {})",
                config.service.engine,
                registry.list_engines().join(", ")
            )
        })?;

    let policy = InitPolicy::from(&config.session);
    let mut session = Session::new(service, indicator, policy);
    session.set_sampling_frequency(config.sampling.effective_frequency_hz());
    session.set_sampling_duration_exact(config.sampling.duration_ms);

    if policy == InitPolicy::Explicit && !session.setup() {
        tracing::warn!("initialization failed; recognitions will be refused");
    }
    Ok(session)
}

fn run_listen(mut session: Session) -> Result<()> {
    match session.recognize() {
        Recognition::Detected(result) => println!(
            "{} ({}%, {} ms)",
            result.keyword,
            result.confidence_percent(),
            result.processing_time_ms
        ),
        Recognition::NoDetection => println!("no detection"),
        Recognition::NotInitialized => anyhow::bail!("voice recognition is not initialized"),
    }
    session.shutdown();
    Ok(())
}

fn run_bench(mut session: Session, runs: usize) -> Result<()> {
    let report = harness::run_benchmark(&mut session, runs);
    for (i, elapsed) in report.runs.iter().enumerate() {
        println!("run {:>3}: {} ms", i + 1, elapsed.as_millis());
    }
    println!(
        "average {} ms over {} run(s), {} detection(s)",
        report.average().as_millis(),
        report.runs.len(),
        report.detections
    );
    session.shutdown();
    Ok(())
}

async fn run_monitor(
    mut session: Session,
    config_path: &Path,
    config: AppConfig,
    interval: Duration,
) -> Result<()> {
    let (_watcher, reloads) = if config_path.exists() {
        let (watcher, changes) = reload::watch(config_path)?;
        let reloads = monitor::Reloads {
            reloader: reload::ConfigReloader::new(config_path.to_path_buf(), config),
            changes,
        };
        (Some(watcher), Some(reloads))
    } else {
        (None, None)
    };

    // One listener for the whole run; a Ctrl-C during a recognition stays pending
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tracing::info!("monitoring, press Ctrl-C to stop");
    let recognitions = monitor::run(&mut session, interval, reloads, ctrl_c).await;

    tracing::info!(recognitions, "shutting down");
    session.shutdown();
    Ok(())
}

async fn run_board(
    session: Session,
    display: Arc<Mutex<BoardDisplay>>,
    config_path: &Path,
    config: AppConfig,
    log_buffer: kwsbit_tui::LogBuffer,
) -> Result<()> {
    let host = board::BoardHost::new(session, display, harness::REACTION_HOLD);

    let (state_tx, state_rx) = tokio::sync::watch::channel(host.state());
    let (cmd_tx, mut cmd_rx) = tokio::sync::mpsc::unbounded_channel::<BoardCommand>();

    // State broadcast (~30Hz)
    let broadcast_host = Arc::clone(&host);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(33));
        loop {
            interval.tick().await;
            if state_tx.send(broadcast_host.state()).is_err() {
                break;
            }
        }
    });

    // Button handler
    let cmd_host = Arc::clone(&host);
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            if cmd == BoardCommand::Quit {
                break;
            }
            cmd_host.handle_command(cmd);
        }
    });

    // Config reload
    let _watcher = if config_path.exists() {
        let (watcher, mut reload_rx) = reload::watch(config_path)?;
        let reload_host = Arc::clone(&host);
        let mut reloader = reload::ConfigReloader::new(config_path.to_path_buf(), config);
        tokio::spawn(async move {
            while reload_rx.recv().await.is_some() {
                match reloader.reload() {
                    Ok(Some(diff)) => {
                        reload_host.apply_config_diff(diff);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("config reload failed: {}", e),
                }
            }
        });
        Some(watcher)
    } else {
        None
    };

    tracing::info!("board active, press 'q' to quit");

    kwsbit_tui::run(state_rx, cmd_tx, log_buffer)
        .await
        .context("TUI error")?;

    tracing::info!("shutting down");
    tokio::task::spawn_blocking(move || host.shutdown())
        .await
        .context("shutdown task failed")?;
    Ok(())
}

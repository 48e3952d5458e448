//! Teller application binary - composition root.
//!
//! Ties the Teller crates into a single interactive executable:
//! 1. Load configuration from TOML, then apply environment overrides
//! 2. Build the assistant engine (local classifier + optional remote backend)
//! 3. Start the background health monitor
//! 4. Run a line-oriented chat REPL on stdin until quit/EOF

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::sync::Mutex;

use teller_chat::{run_health_monitor, AssistantEngine};
use teller_core::TellerConfig;

#[derive(Parser, Debug)]
#[command(name = "teller", about = "Demo banking assistant", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Resolve the config file path (--config, TELLER_CONFIG env, or
/// ~/.teller/config.toml).
fn config_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.config {
        return path.clone();
    }
    if let Ok(p) = std::env::var("TELLER_CONFIG") {
        if !p.is_empty() {
            return PathBuf::from(p);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".teller").join("config.toml");
    }
    PathBuf::from("config.toml")
}

fn print_prompt() -> std::io::Result<()> {
    print!("you> ");
    std::io::stdout().flush()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Teller v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    // Config.
    let config_file = config_path(&cli);
    let mut config = TellerConfig::load_or_default(&config_file);
    config.apply_env();
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let health_interval = config.chat.health_interval_secs;
    let engine = Arc::new(Mutex::new(AssistantEngine::new(config)));

    // Background connectivity monitor.
    let monitor_engine = Arc::clone(&engine);
    tokio::spawn(async move {
        run_health_monitor(monitor_engine, health_interval).await;
    });

    println!("Teller banking assistant. Type a message, or 'quit' to exit.");
    println!("Commands: /health /analytics /new");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print_prompt()?;
        let Some(line) = lines.next_line().await? else {
            // EOF (Ctrl-D).
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "/health" => {
                let report = engine.lock().await.health_check().await;
                println!("status: {:?} ({})", report.status, report.message);
            }
            "/analytics" => {
                let analytics = engine.lock().await.session_analytics();
                println!(
                    "session: {} | interactions: {} | uptime: {}ms",
                    analytics.session_id.as_deref().unwrap_or("(none)"),
                    analytics.interaction_count,
                    analytics.uptime_ms,
                );
            }
            "/new" => {
                engine.lock().await.initialize_session().await;
                println!("Started a new session.");
            }
            command if command.starts_with('/') => {
                println!("Unknown command: {command}");
            }
            text => {
                let result = engine.lock().await.send_message(text).await;
                tracing::debug!(
                    intent = result.intent.label(),
                    confidence = result.confidence,
                    entities = result.entities.len(),
                    processing_time_ms = result.analytics.processing_time_ms,
                    "Message classified"
                );
                println!("\nteller> {}\n", result.text);
            }
        }
    }

    let snapshot = engine.lock().await.teardown_session().await;
    if snapshot.interaction_count > 0 {
        println!(
            "Goodbye! {} interactions over {}ms.",
            snapshot.interaction_count, snapshot.uptime_ms
        );
    } else {
        println!("Goodbye!");
    }

    Ok(())
}

//! thinkwire CLI - talk to a think service from the command line
//!
//! Send a prompt over HTTP and print the reply, fire a prompt at an OSC
//! target, or run an OSC listener that prints whatever arrives.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::time::Duration;
use thinkwire_core::{Prompt, Value, DEFAULT_THINK_ENDPOINT, THINK_ADDRESS};
use thinkwire_transport::{
    Dispatcher, HttpConfig, HttpThinkClient, OscListener, OscListenerConfig, OscSender,
    OscSenderConfig,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Example prompt used when none is given
const DEFAULT_PROMPT: &str = "Generate a voicing for MIDI note 60 in C major";

/// thinkwire - prompt transport for think services (HTTP + OSC)
#[derive(Parser)]
#[command(name = "thinkwire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a prompt to the think service over HTTP and print the reply
    Think {
        /// Prompt text
        #[arg(default_value = DEFAULT_PROMPT)]
        prompt: String,

        /// Think service endpoint
        #[arg(short, long, env = "THINKWIRE_ENDPOINT", default_value = DEFAULT_THINK_ENDPOINT)]
        endpoint: String,

        /// Request timeout in seconds
        #[arg(short, long, default_value = "10")]
        timeout: u32,
    },

    /// Send a prompt as a single OSC datagram (fire-and-forget)
    Send {
        /// Prompt text
        #[arg(default_value = DEFAULT_PROMPT)]
        prompt: String,

        /// Remote host:port to send to
        #[arg(short, long, env = "THINKWIRE_TARGET", default_value = "127.0.0.1:8000")]
        target: String,

        /// OSC address to send to
        #[arg(short, long, default_value = THINK_ADDRESS)]
        address: String,

        /// Milliseconds to linger before exit so the datagram flushes
        #[arg(long, default_value = "500")]
        linger_ms: u64,
    },

    /// Listen for OSC messages and print them
    Listen {
        /// Local address to bind
        #[arg(short, long, default_value = "0.0.0.0:8000")]
        bind: String,

        /// Address pattern to print (* = one segment, ** = any)
        #[arg(short, long, default_value = "/*")]
        pattern: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log_level, cli.json_logs)?;

    match cli.command {
        Commands::Think {
            prompt,
            endpoint,
            timeout,
        } => run_think(&prompt, endpoint, timeout).await,

        Commands::Send {
            prompt,
            target,
            address,
            linger_ms,
        } => run_send(&prompt, target, &address, linger_ms).await,

        Commands::Listen { bind, pattern } => run_listen(&bind, &pattern).await,
    }
}

fn setup_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Failed to parse log level")?;

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).compact())
            .init();
    }

    Ok(())
}

async fn run_think(prompt: &str, endpoint: String, timeout_secs: u32) -> Result<()> {
    let prompt = Prompt::new(prompt)?;
    let client = HttpThinkClient::new(HttpConfig {
        endpoint,
        timeout_secs,
    })?;

    println!("{} {}", "thinking:".cyan().bold(), prompt);

    let reply = client
        .think(&prompt)
        .await
        .context("think request failed")?;

    println!("{}", "result:".green().bold());
    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(())
}

async fn run_send(prompt: &str, target: String, address: &str, linger_ms: u64) -> Result<()> {
    let prompt = Prompt::new(prompt)?;
    let sender = OscSender::connect(OscSenderConfig { target }).await?;

    println!(
        "{} {} <- {}",
        "sending:".cyan().bold(),
        address.yellow(),
        prompt
    );

    sender
        .send(address, vec![Value::String(prompt.as_str().to_string())])
        .await
        .context("OSC send failed")?;

    // UDP is fire-and-forget; give the datagram a moment before exiting.
    tokio::time::sleep(Duration::from_millis(linger_ms)).await;

    println!("{}", "done".green().bold());

    Ok(())
}

async fn run_listen(bind: &str, pattern: &str) -> Result<()> {
    let mut dispatcher = Dispatcher::new();
    dispatcher.map(pattern, |address, args| {
        let rendered: Vec<serde_json::Value> = args.iter().map(Value::to_json).collect();
        println!(
            "{} {} {}",
            "received:".cyan().bold(),
            address.yellow(),
            serde_json::Value::Array(rendered)
        );
    })?;

    let config = OscListenerConfig {
        bind_addr: bind.to_string(),
    };
    let mut listener = OscListener::bind(config, dispatcher).await?;
    let handle = listener.handle();

    println!(
        "{} OSC listener on {}",
        "OK".green().bold(),
        listener.local_addr()?
    );

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl+c");
        info!("Received shutdown signal");
        handle.stop().await;
    });

    listener.serve().await?;
    println!("{}", "listener stopped".yellow());

    Ok(())
}

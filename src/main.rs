//! pairlens - Uniswap V2 Pair Inspector
//!
//! Run with: cargo run -- [--pair <ADDRESS>] [--json]

use clap::Parser;
use color_eyre::eyre::Result;
use console::style;
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pairlens::chain;
use pairlens::pair::KNOWN_PAIRS;
use pairlens::ui::{self, App};
use pairlens::{Config, PairQuery};

#[derive(Debug, Parser)]
#[command(name = "pairlens", version, about = "Uniswap V2 pair data retriever")]
struct Args {
    /// Query this pair once and exit instead of starting the prompt
    #[arg(long)]
    pair: Option<String>,

    /// With --pair, print the result as JSON
    #[arg(long, requires = "pair")]
    json: bool,
}

fn print_banner() {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(" Uniswap V2 Pair Data Retriever").cyan().bold()
    );
    println!(
        "{}",
        style(" Enter a Uniswap V2 pair contract address below and submit").cyan()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!();
}

fn print_hints() {
    println!("{}", style("Try one of:").dim());
    for pair in KNOWN_PAIRS {
        println!("  {}", style(pair).dim());
    }
    println!();
}

/// Stdin is blocking, so lines are pumped from a plain thread.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pairlens=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let config = Config::from_env()?;
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        error!("Please check your .env file");
        return Err(e);
    }

    let rpc = Arc::new(chain::connect(&config.rpc_url)?);
    let query = Arc::new(PairQuery::new(rpc, config.multicall_address));
    let mut app = App::new(query);

    if let Some(pair) = args.pair {
        let data = app.run_once(&pair).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
        } else {
            println!("{}", ui::card(Some("Pair Details"), &ui::pair_details(&data)));
        }
        return Ok(());
    }

    print_banner();
    config.print_summary();
    println!();
    print_hints();

    info!("Connected to {}", config.rpc_display());
    app.run(spawn_stdin_reader()).await?;

    println!("\n{}", style("Bye!").cyan());
    Ok(())
}

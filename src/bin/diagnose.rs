//! Diagnostic tool - Check endpoint and Multicall reachability
//!
//! Run with: cargo run --bin diagnose

use alloy_provider::{Provider, ProviderBuilder};
use eyre::Result;
use std::env;

use pairlens::Config;

#[tokio::main]
async fn main() -> Result<()> {
    println!("🔍 PAIRLENS DIAGNOSTIC CHECK\n");

    let config = Config::from_env()?;

    println!("═══════════════════════════════════════════════════");
    println!("                  CONFIGURATION                     ");
    println!("═══════════════════════════════════════════════════\n");

    for key in ["RPC_URL", "MULTICALL_ADDRESS"] {
        let marker = if env::var(key).is_err() { "(default)" } else { "(from env)" };
        println!("  {} {}", key, marker);
    }
    println!("\n  RPC:       {}", config.rpc_display());
    println!("  Multicall: {}", config.multicall_address.to_checksum(None));

    if let Err(e) = config.validate() {
        println!("\n  ❌ {}", e);
        return Ok(());
    }

    println!("\n═══════════════════════════════════════════════════");
    println!("                    ENDPOINT                        ");
    println!("═══════════════════════════════════════════════════\n");

    let provider = ProviderBuilder::new().connect_http(config.rpc_url.parse()?);

    match provider.get_chain_id().await {
        Ok(1) => println!("  Chain ID:     ✅ 1 (mainnet)"),
        Ok(id) => println!("  Chain ID:     ⚠️  {} (pair lookups expect mainnet)", id),
        Err(e) => {
            println!("  Chain ID:     ❌ {}", e);
            println!("\n❌ Endpoint unreachable, nothing else to check.\n");
            return Ok(());
        }
    }

    match provider.get_block_number().await {
        Ok(block) => println!("  Latest block: ✅ {}", block),
        Err(e) => println!("  Latest block: ❌ {}", e),
    }

    match provider.get_code_at(config.multicall_address).await {
        Ok(code) if !code.is_empty() => {
            println!("  Multicall:    ✅ {} bytes of code", code.len())
        }
        Ok(_) => println!("  Multicall:    ❌ no contract code at this address"),
        Err(e) => println!("  Multicall:    ❌ {}", e),
    }

    println!("\n✅ Diagnostic complete!\n");
    Ok(())
}

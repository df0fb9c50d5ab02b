//! Runtime configuration
//!
//! Read once at startup from the environment (and `.env`); shared read-only
//! for the rest of the session.

use alloy_primitives::Address;
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::chain::{parse_address, MULTICALL3};

/// Public endpoint used when `RPC_URL` is not set
pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint of an Ethereum mainnet node
    pub rpc_url: String,

    /// Multicall contract serving `aggregate`
    pub multicall_address: Address,
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let multicall_address = match env::var("MULTICALL_ADDRESS") {
            Ok(s) => parse_address(&s).ok_or_else(|| eyre!("Invalid MULTICALL_ADDRESS: {}", s))?,
            Err(_) => MULTICALL3,
        };

        Ok(Self {
            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            multicall_address,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() || self.rpc_url.contains("YOUR_API_KEY") {
            return Err(eyre!("Invalid RPC_URL - please set a valid JSON-RPC endpoint"));
        }
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(eyre!("RPC_URL must be an http(s) endpoint, got {}", self.rpc_url));
        }
        if self.multicall_address == Address::ZERO {
            return Err(eyre!("MULTICALL_ADDRESS must not be the zero address"));
        }
        Ok(())
    }

    /// RPC url with any path/key portion shortened for display
    pub fn rpc_display(&self) -> String {
        let chars: Vec<char> = self.rpc_url.chars().collect();
        if chars.len() > 50 {
            let head: String = chars[..30].iter().collect();
            let tail: String = chars[chars.len() - 15..].iter().collect();
            format!("{}...{}", head, tail)
        } else {
            self.rpc_url.clone()
        }
    }

    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║                  PAIRLENS - CONFIGURATION                  ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ RPC:       {:<48}║", self.rpc_display());
        println!("║ Multicall: {:<48}║", self.multicall_address.to_checksum(None));
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            multicall_address: MULTICALL3,
        }
    }
}

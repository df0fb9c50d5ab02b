//! pairlens - Uniswap V2 pair inspector
//!
//! Reads a pair's token metadata, reserves and LP supply with one Multicall
//! `aggregate` plus six ERC-20 calls.

pub mod chain;
pub mod config;
pub mod pair;
pub mod ui;

pub use config::Config;
pub use pair::{PairData, PairQuery, QueryError};

//! Pair query
//!
//! One aggregate round trip for the pair itself, then six sequential
//! `eth_call`s for the ERC-20 metadata of both tokens.

use alloy_primitives::{Address, Bytes, U256};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::types::{PairData, Reserves, TokenInfo};
use crate::chain::codec::{self, AbiValue, CodecError, TypeTag};
use crate::chain::{parse_address, Aggregator, CallDescriptor, FetchError, RpcClient};

// ============================================
// CALL SCHEMAS
// ============================================

const TOKEN0: &str = "token0()";
const TOKEN1: &str = "token1()";
const GET_RESERVES: &str = "getReserves()";
const TOTAL_SUPPLY: &str = "totalSupply()";

const NAME: &str = "name()";
const SYMBOL: &str = "symbol()";
const DECIMALS: &str = "decimals()";

/// Aggregate slots, in submission order
const PAIR_CALLS: [(&str, &[TypeTag]); 4] = [
    (TOKEN0, &[TypeTag::Address]),
    (TOKEN1, &[TypeTag::Address]),
    (GET_RESERVES, &[TypeTag::UINT112, TypeTag::UINT112, TypeTag::UINT32]),
    (TOTAL_SUPPLY, &[TypeTag::UINT256]),
];

// ============================================
// ERRORS
// ============================================

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("query failed: {0}")]
    QueryFailed(#[from] FetchError),
}

// ============================================
// QUERY
// ============================================

pub struct PairQuery<R> {
    rpc: Arc<R>,
    aggregator: Aggregator<R>,
}

impl<R: RpcClient> PairQuery<R> {
    pub fn new(rpc: Arc<R>, multicall: Address) -> Self {
        let aggregator = Aggregator::new(rpc.clone(), multicall);
        Self { rpc, aggregator }
    }

    /// Validates `pool_address` and fetches everything shown for the pair.
    pub async fn fetch_pair_data(&self, pool_address: &str) -> Result<PairData, QueryError> {
        let Some(pair) = parse_address(pool_address) else {
            warn!("Rejected pair address {:?}", pool_address);
            return Err(QueryError::InvalidAddress(pool_address.to_string()));
        };

        debug!("Fetching pair {} via multicall {}", pair, self.aggregator.address());
        let start = Instant::now();

        match self.fetch(pair).await {
            Ok(data) => {
                debug!(
                    "Fetched {}/{} pair in {:?}",
                    data.token0.symbol,
                    data.token1.symbol,
                    start.elapsed()
                );
                Ok(data)
            }
            Err(e) => {
                error!("Query for {} failed: {}", pair, e);
                Err(QueryError::QueryFailed(e))
            }
        }
    }

    async fn fetch(&self, pair: Address) -> Result<PairData, FetchError> {
        let calls: Vec<CallDescriptor> = PAIR_CALLS
            .iter()
            .map(|(signature, _)| CallDescriptor::new(pair, codec::encode_call(signature, &[])))
            .collect();

        let result = self.aggregator.aggregate(&calls).await?;

        let mut slots = Vec::with_capacity(PAIR_CALLS.len());
        for ((_, schema), data) in PAIR_CALLS.iter().zip(&result.return_data) {
            slots.push(codec::decode(schema, data)?);
        }

        let token0_address = address_at(&slots[0], 0)?;
        let token1_address = address_at(&slots[1], 0)?;
        let reserves = Reserves {
            reserve0: u128_at(&slots[2], 0)?,
            reserve1: u128_at(&slots[2], 1)?,
            block_timestamp_last: u32_at(&slots[2], 2)?,
        };
        let total_supply = uint_at(&slots[3], 0, TypeTag::UINT256)?;

        debug!(
            "Pair {}: token0={} token1={} reserves={}/{}",
            pair, token0_address, token1_address, reserves.reserve0, reserves.reserve1
        );

        let token0 = self.fetch_token(token0_address).await?;
        let token1 = self.fetch_token(token1_address).await?;

        Ok(PairData {
            pair,
            block_number: result.block_number,
            token0,
            token1,
            reserves,
            total_supply,
        })
    }

    /// name, symbol, decimals: three individual calls, one at a time
    async fn fetch_token(&self, token: Address) -> Result<TokenInfo, FetchError> {
        let name = self.call_single(token, NAME, &[TypeTag::String]).await?;
        let symbol = self.call_single(token, SYMBOL, &[TypeTag::String]).await?;
        let decimals = self.call_single(token, DECIMALS, &[TypeTag::UINT8]).await?;

        Ok(TokenInfo {
            address: token,
            name: string_at(&name, 0)?,
            symbol: string_at(&symbol, 0)?,
            decimals: u8_at(&decimals, 0)?,
        })
    }

    async fn call_single(
        &self,
        target: Address,
        signature: &str,
        schema: &[TypeTag],
    ) -> Result<Vec<AbiValue>, FetchError> {
        debug!("{} on {}", signature, target);
        let data: Bytes = self.rpc.call(target, codec::encode_call(signature, &[])).await?;
        Ok(codec::decode(schema, &data)?)
    }
}

// ============================================
// VALUE EXTRACTION
// ============================================

fn address_at(values: &[AbiValue], index: usize) -> Result<Address, CodecError> {
    values
        .get(index)
        .and_then(AbiValue::as_address)
        .ok_or(CodecError::UnexpectedType { index, expected: TypeTag::Address })
}

fn string_at(values: &[AbiValue], index: usize) -> Result<String, CodecError> {
    values
        .get(index)
        .and_then(AbiValue::as_str)
        .map(str::to_string)
        .ok_or(CodecError::UnexpectedType { index, expected: TypeTag::String })
}

fn uint_at(values: &[AbiValue], index: usize, expected: TypeTag) -> Result<U256, CodecError> {
    values
        .get(index)
        .and_then(AbiValue::as_uint)
        .ok_or(CodecError::UnexpectedType { index, expected })
}

fn u128_at(values: &[AbiValue], index: usize) -> Result<u128, CodecError> {
    let v = uint_at(values, index, TypeTag::UINT112)?;
    u128::try_from(v).map_err(|_| CodecError::ValueOutOfRange { index, bits: 112 })
}

fn u32_at(values: &[AbiValue], index: usize) -> Result<u32, CodecError> {
    let v = uint_at(values, index, TypeTag::UINT32)?;
    u32::try_from(v).map_err(|_| CodecError::ValueOutOfRange { index, bits: 32 })
}

fn u8_at(values: &[AbiValue], index: usize) -> Result<u8, CodecError> {
    let v = uint_at(values, index, TypeTag::UINT8)?;
    u8::try_from(v).map_err(|_| CodecError::ValueOutOfRange { index, bits: 8 })
}

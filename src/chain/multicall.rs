//! Multicall aggregate
//!
//! Batches read-only calls into one `aggregate` round trip. The contract
//! returns one entry per call in submission order, which callers rely on to
//! index results positionally.

use alloy_primitives::{address, Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::codec::CodecError;
use super::rpc::{RpcClient, RpcError};

// ============================================
// MULTICALL INTERFACE
// ============================================

sol! {
    /// Legacy Multicall entry point (also served by Multicall3)
    interface IMulticall {
        struct Call {
            address target;
            bytes callData;
        }

        function aggregate(Call[] calldata calls)
            external payable returns (uint256 blockNumber, bytes[] memory returnData);
    }
}

/// Multicall3 address (same on all EVM chains)
pub const MULTICALL3: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

// ============================================
// TYPES
// ============================================

/// One call to batch: the contract to hit and its encoded calldata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    pub target: Address,
    pub call_data: Bytes,
}

impl CallDescriptor {
    pub fn new(target: Address, call_data: Bytes) -> Self {
        Self { target, call_data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub block_number: U256,
    pub return_data: Vec<Bytes>,
}

/// Anything that can go wrong between a valid address and a decoded result.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("failed to decode aggregate response: {0}")]
    Aggregate(#[from] alloy_sol_types::Error),

    #[error("aggregate returned {actual} results for {expected} calls")]
    ResultCount { expected: usize, actual: usize },
}

// ============================================
// AGGREGATOR
// ============================================

pub struct Aggregator<R> {
    rpc: Arc<R>,
    address: Address,
}

impl<R: RpcClient> Aggregator<R> {
    pub fn new(rpc: Arc<R>, address: Address) -> Self {
        Self { rpc, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Executes `calls` in one `aggregate` request.
    pub async fn aggregate(&self, calls: &[CallDescriptor]) -> Result<AggregateResult, FetchError> {
        let expected = calls.len();
        let calls = calls
            .iter()
            .map(|c| IMulticall::Call { target: c.target, callData: c.call_data.clone() })
            .collect();

        let calldata = IMulticall::aggregateCall { calls }.abi_encode();
        let raw = self.rpc.call(self.address, calldata.into()).await?;

        let decoded = IMulticall::aggregateCall::abi_decode_returns(&raw)?;

        if decoded.returnData.len() != expected {
            return Err(FetchError::ResultCount { expected, actual: decoded.returnData.len() });
        }

        debug!("aggregate: {} calls at block {}", expected, decoded.blockNumber);

        Ok(AggregateResult {
            block_number: decoded.blockNumber,
            return_data: decoded.returnData,
        })
    }
}

/// Calls packed into an `aggregate` request, in submission order.
#[cfg(test)]
pub(crate) fn decode_request(data: &[u8]) -> Result<Vec<CallDescriptor>, FetchError> {
    let request = IMulticall::aggregateCall::abi_decode(data)?;
    Ok(request
        .calls
        .into_iter()
        .map(|c| CallDescriptor::new(c.target, c.callData))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::rpc::mock::ScriptedRpc;
    use alloy_sol_types::SolValue;

    const PAIR: Address = address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc");

    fn aggregate_response(block: u64, entries: Vec<Bytes>) -> Vec<u8> {
        (U256::from(block), entries).abi_encode_params()
    }

    #[tokio::test]
    async fn test_aggregate_preserves_order() {
        let rpc = Arc::new(ScriptedRpc::new());
        let entries = vec![Bytes::from(vec![1u8]), Bytes::from(vec![2u8, 2]), Bytes::new()];
        rpc.respond(aggregate_response(19_000_000, entries.clone()));

        let aggregator = Aggregator::new(rpc.clone(), MULTICALL3);
        let calls = vec![
            CallDescriptor::new(PAIR, Bytes::from(vec![0xa1])),
            CallDescriptor::new(PAIR, Bytes::from(vec![0xa2])),
            CallDescriptor::new(MULTICALL3, Bytes::from(vec![0xa3])),
        ];

        let result = aggregator.aggregate(&calls).await.unwrap();
        assert_eq!(result.block_number, U256::from(19_000_000u64));
        assert_eq!(result.return_data, entries);

        // single round trip to the multicall contract carrying every call in order
        let sent = rpc.calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, MULTICALL3);
        let request = IMulticall::aggregateCall::abi_decode(&sent[0].1).unwrap();
        let targets: Vec<_> = request.calls.iter().map(|c| c.target).collect();
        let data: Vec<_> = request.calls.iter().map(|c| c.callData.clone()).collect();
        assert_eq!(targets, vec![PAIR, PAIR, MULTICALL3]);
        assert_eq!(
            data,
            vec![Bytes::from(vec![0xa1]), Bytes::from(vec![0xa2]), Bytes::from(vec![0xa3])]
        );
    }

    #[tokio::test]
    async fn test_aggregate_result_count_mismatch() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.respond(aggregate_response(1, vec![Bytes::new()]));

        let aggregator = Aggregator::new(rpc, MULTICALL3);
        let calls = vec![
            CallDescriptor::new(PAIR, Bytes::new()),
            CallDescriptor::new(PAIR, Bytes::new()),
        ];

        let err = aggregator.aggregate(&calls).await.unwrap_err();
        assert!(matches!(err, FetchError::ResultCount { expected: 2, actual: 1 }));
    }

    #[tokio::test]
    async fn test_aggregate_garbage_response() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.respond(vec![0u8; 7]);

        let aggregator = Aggregator::new(rpc, MULTICALL3);
        let err = aggregator
            .aggregate(&[CallDescriptor::new(PAIR, Bytes::new())])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Aggregate(_)));
    }

    #[tokio::test]
    async fn test_aggregate_transport_failure() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.fail("connection refused");

        let aggregator = Aggregator::new(rpc, MULTICALL3);
        let err = aggregator
            .aggregate(&[CallDescriptor::new(PAIR, Bytes::new())])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Rpc(_)));
    }
}

//! JSON-RPC transport
//!
//! Everything the app needs from a node is one read-only `eth_call`, so the
//! seam is a single-method trait. The HTTP implementation wraps an alloy
//! provider that is built once and shared for the whole session.

use alloy_primitives::{Address, Bytes};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::TransportError;
use std::future::Future;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid RPC url: {0}")]
    InvalidUrl(String),

    #[error("eth_call failed: {0}")]
    Transport(#[from] TransportError),
}

/// Read-only contract call against a node.
pub trait RpcClient: Send + Sync {
    fn call(&self, to: Address, data: Bytes) -> impl Future<Output = Result<Bytes, RpcError>> + Send;
}

pub struct HttpRpcClient<P> {
    provider: P,
}

/// Builds an HTTP client for `rpc_url`.
pub fn connect(rpc_url: &str) -> Result<HttpRpcClient<impl Provider + Send + Sync>, RpcError> {
    let url = rpc_url
        .parse()
        .map_err(|_| RpcError::InvalidUrl(rpc_url.to_string()))?;

    let provider = ProviderBuilder::new().connect_http(url);

    Ok(HttpRpcClient { provider })
}

impl<P: Provider + Send + Sync> RpcClient for HttpRpcClient<P> {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        trace!("eth_call to={} data=0x{}", to, hex::encode(&data));

        let tx = TransactionRequest::default().to(to).input(data.into());
        let result = self.provider.call(tx).await?;

        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::ScriptedRpc;
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_connect_rejects_bad_url() {
        assert!(matches!(connect("not a url"), Err(RpcError::InvalidUrl(_))));
        assert!(connect("https://eth.llamarpc.com").is_ok());
    }

    #[tokio::test]
    async fn test_scripted_rpc_replays_in_order() {
        let rpc = ScriptedRpc::new();
        rpc.respond(vec![1u8]).fail("boom");

        let target = address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc");
        let first = rpc.call(target, Bytes::from(vec![0xaa])).await.unwrap();
        assert_eq!(first, Bytes::from(vec![1u8]));

        let second = rpc.call(target, Bytes::new()).await;
        assert!(matches!(second, Err(RpcError::Transport(_))));

        // queue exhausted
        assert!(rpc.call(target, Bytes::new()).await.is_err());
        assert_eq!(rpc.call_count(), 3);
        assert_eq!(rpc.calls()[0], (target, Bytes::from(vec![0xaa])));
    }
}

//! Chain access: address validation, ABI codec, RPC transport and the
//! Multicall aggregator.

pub mod address;
pub mod codec;
pub mod multicall;
pub mod rpc;

pub use address::{is_valid_address, parse_address};
pub use codec::{AbiValue, CodecError, TypeTag};
pub use multicall::{AggregateResult, Aggregator, CallDescriptor, FetchError, MULTICALL3};
pub use rpc::{connect, HttpRpcClient, RpcClient, RpcError};

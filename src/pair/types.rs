use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// ERC-20 metadata of one side of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// `getReserves()` of a V2 pair. Both reserves fit in 112 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reserves {
    #[serde(serialize_with = "as_decimal")]
    pub reserve0: u128,
    #[serde(serialize_with = "as_decimal")]
    pub reserve1: u128,
    pub block_timestamp_last: u32,
}

impl Reserves {
    /// `block_timestamp_last` as a UTC time
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(i64::from(self.block_timestamp_last), 0)
    }
}

/// Everything shown for one pair, assembled in one go after a successful query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairData {
    pub pair: Address,
    #[serde(serialize_with = "as_decimal")]
    pub block_number: U256,
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    pub reserves: Reserves,
    #[serde(serialize_with = "as_decimal")]
    pub total_supply: U256,
}

/// Big integers go out as decimal strings so JSON consumers keep every digit.
fn as_decimal<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_json_keeps_big_integers_exact() {
        let data = PairData {
            pair: address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc"),
            block_number: U256::from(19_000_000u64),
            token0: TokenInfo {
                address: address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                name: "USD Coin".to_string(),
                symbol: "USDC".to_string(),
                decimals: 6,
            },
            token1: TokenInfo {
                address: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
                name: "Wrapped Ether".to_string(),
                symbol: "WETH".to_string(),
                decimals: 18,
            },
            reserves: Reserves {
                reserve0: (1u128 << 112) - 1,
                reserve1: 2_000_000_000,
                block_timestamp_last: 1_700_000_000,
            },
            total_supply: U256::MAX,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["reserves"]["reserve0"], "5192296858534827628530496329220095");
        assert_eq!(json["reserves"]["reserve1"], "2000000000");
        assert_eq!(json["reserves"]["block_timestamp_last"], 1_700_000_000);
        assert_eq!(json["total_supply"], U256::MAX.to_string());
        assert_eq!(json["block_number"], "19000000");
        assert_eq!(json["token0"]["symbol"], "USDC");
        assert_eq!(json["token1"]["decimals"], 18);
    }

    #[test]
    fn test_last_updated() {
        let reserves = Reserves { reserve0: 0, reserve1: 0, block_timestamp_last: 1_700_000_000 };
        let ts = reserves.last_updated().unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-11-14 22:13:20");
    }
}

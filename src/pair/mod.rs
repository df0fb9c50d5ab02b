//! Uniswap V2 pair lookups

mod query;
mod types;

pub use query::{PairQuery, QueryError};
pub use types::{PairData, Reserves, TokenInfo};

#[cfg(test)]
pub(crate) use query::fixtures;

/// Sample V2 pairs offered as input hints
pub const KNOWN_PAIRS: &[&str] = &[
    "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc", // USDC/WETH
    "0x3139Ffc91B99aa94DA8A2dc13f1fC36F9BDc98eE",
    "0x12EDE161c702D1494612d19f05992f43aa6A26FB",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::is_valid_address;

    #[test]
    fn test_known_pairs_are_valid() {
        assert!(KNOWN_PAIRS.iter().all(|p| is_valid_address(p)));
    }
}

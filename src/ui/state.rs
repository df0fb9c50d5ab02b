//! Session state
//!
//! The view is an immutable snapshot; every user or network event produces a
//! new snapshot plus, at most, one effect for the driver to run.

use crate::chain::is_valid_address;
use crate::pair::PairData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidAddress,
    QueryFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::InvalidAddress => "Invalid address",
            Notice::QueryFailed => "Failed to fetch data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    InputChanged(String),
    Submit,
    QuerySucceeded(PairData),
    QueryFailed,
}

/// Work the driver must start after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartQuery(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub input: String,
    pub last_result: Option<PairData>,
    pub is_loading: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: ViewState) -> Self {
        Self { state, effect: None }
    }
}

impl ViewState {
    pub fn apply(&self, event: Event) -> Transition {
        match event {
            Event::InputChanged(input) => Transition::to(ViewState {
                input,
                notice: None,
                ..self.clone()
            }),

            // the trigger is disabled while a query is in flight
            Event::Submit if self.is_loading => Transition::to(self.clone()),

            Event::Submit => {
                let address = self.input.trim().to_string();
                if !is_valid_address(&address) {
                    return Transition::to(ViewState {
                        notice: Some(Notice::InvalidAddress),
                        ..self.clone()
                    });
                }
                Transition {
                    state: ViewState {
                        is_loading: true,
                        notice: None,
                        ..self.clone()
                    },
                    effect: Some(Effect::StartQuery(address)),
                }
            }

            Event::QuerySucceeded(data) => Transition::to(ViewState {
                last_result: Some(data),
                is_loading: false,
                notice: None,
                ..self.clone()
            }),

            // previous result stays on screen
            Event::QueryFailed => Transition::to(ViewState {
                is_loading: false,
                notice: Some(Notice::QueryFailed),
                ..self.clone()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::{Reserves, TokenInfo};
    use alloy_primitives::{address, U256};

    const PAIR: &str = "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc";

    fn sample(total_supply: u64) -> PairData {
        let token = TokenInfo {
            address: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            name: "Wrapped Ether".to_string(),
            symbol: "WETH".to_string(),
            decimals: 18,
        };
        PairData {
            pair: address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc"),
            block_number: U256::from(1),
            token0: token.clone(),
            token1: token,
            reserves: Reserves { reserve0: 1, reserve1: 2, block_timestamp_last: 3 },
            total_supply: U256::from(total_supply),
        }
    }

    fn typed(input: &str) -> ViewState {
        ViewState::default().apply(Event::InputChanged(input.to_string())).state
    }

    #[test]
    fn test_submit_valid_starts_query() {
        let t = typed(&format!("  {}\n", PAIR)).apply(Event::Submit);
        assert!(t.state.is_loading);
        assert_eq!(t.state.notice, None);
        assert_eq!(t.effect, Some(Effect::StartQuery(PAIR.to_string())));
    }

    #[test]
    fn test_submit_invalid_never_loads() {
        let t = typed("0x1234").apply(Event::Submit);
        assert!(!t.state.is_loading);
        assert_eq!(t.state.notice, Some(Notice::InvalidAddress));
        assert_eq!(t.effect, None);
    }

    #[test]
    fn test_submit_while_loading_is_noop() {
        let loading = typed(PAIR).apply(Event::Submit).state;
        let t = loading.apply(Event::Submit);
        assert_eq!(t.effect, None);
        assert_eq!(t.state, loading);
    }

    #[test]
    fn test_success_replaces_result() {
        let first = typed(PAIR)
            .apply(Event::Submit)
            .state
            .apply(Event::QuerySucceeded(sample(1)))
            .state;
        assert!(!first.is_loading);
        assert_eq!(first.last_result, Some(sample(1)));

        let second = first
            .apply(Event::Submit)
            .state
            .apply(Event::QuerySucceeded(sample(2)))
            .state;
        assert_eq!(second.last_result, Some(sample(2)));
    }

    #[test]
    fn test_failure_keeps_stale_result() {
        let shown = typed(PAIR)
            .apply(Event::Submit)
            .state
            .apply(Event::QuerySucceeded(sample(1)))
            .state;

        let failed = shown.apply(Event::Submit).state.apply(Event::QueryFailed).state;
        assert!(!failed.is_loading);
        assert_eq!(failed.notice, Some(Notice::QueryFailed));
        assert_eq!(failed.last_result, Some(sample(1)));
    }

    #[test]
    fn test_typing_clears_notice() {
        let noticed = typed("nope").apply(Event::Submit).state;
        assert_eq!(noticed.notice, Some(Notice::InvalidAddress));
        let retyped = noticed.apply(Event::InputChanged(PAIR.to_string())).state;
        assert_eq!(retyped.notice, None);
        assert_eq!(retyped.input, PAIR);
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::InvalidAddress.message(), "Invalid address");
        assert_eq!(Notice::QueryFailed.message(), "Failed to fetch data");
    }
}

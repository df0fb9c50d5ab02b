//! Terminal widgets
//!
//! Plain functions from data to text. Nothing here holds state.

use console::{measure_text_width, pad_str, style, Alignment};

use super::state::{Notice, ViewState};
use crate::pair::{PairData, TokenInfo};

const PLACEHOLDER: &str = "Enter Pair Address";

pub fn input(value: &str) -> String {
    if value.is_empty() {
        format!("> {}", style(PLACEHOLDER).dim())
    } else {
        format!("> {}", value)
    }
}

pub fn button(label: &str, disabled: bool) -> String {
    if disabled {
        style(format!("[ {} ]", label)).dim().to_string()
    } else {
        style(format!("[ {} ]", label)).blue().bold().to_string()
    }
}

/// Boxed block of `lines` with an optional title row.
pub fn card(title: Option<&str>, lines: &[String]) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(lines.len() + 1);
    if let Some(title) = title {
        rows.push(style(title).cyan().bold().to_string());
    }
    rows.extend(lines.iter().cloned());

    let width = rows.iter().map(|r| measure_text_width(r)).max().unwrap_or(0);
    let border = "─".repeat(width + 2);

    let mut out = format!("┌{}┐\n", border);
    for row in &rows {
        out.push_str(&format!("│ {} │\n", pad_str(row, width, Alignment::Left, None)));
    }
    out.push_str(&format!("└{}┘", border));
    out
}

pub fn notice(notice: Notice) -> String {
    format!("{} {}", style("✗").red(), style(notice.message()).red().bold())
}

/// Contract-supplied text with control characters escaped, so it cannot
/// move the cursor or break a card row.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { c.escape_default().to_string() } else { c.to_string() })
        .collect()
}

fn token_row(label: &str, token: &TokenInfo) -> String {
    format!(
        "{} {} / {} ({}) - {} decimals",
        style(label).dim(),
        token.address.to_checksum(None),
        printable(&token.name),
        printable(&token.symbol),
        token.decimals
    )
}

pub fn pair_details(data: &PairData) -> Vec<String> {
    let updated = data
        .reserves
        .last_updated()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    vec![
        token_row("Token 0 :", &data.token0),
        token_row("Token 1 :", &data.token1),
        format!(
            "{} {} / {}",
            style("Reserves :").dim(),
            data.reserves.reserve0,
            data.reserves.reserve1
        ),
        format!("{} {}", style("Total Supply :").dim(), data.total_supply),
        format!(
            "{} {} ({})",
            style("Last Update :").dim(),
            data.reserves.block_timestamp_last,
            updated
        ),
        format!("{} {}", style("Block :").dim(), data.block_number),
    ]
}

/// Whole screen for the current snapshot.
pub fn view(state: &ViewState) -> String {
    let label = if state.is_loading { "Fetching..." } else { "Fetch Data" };
    let form = card(None, &[input(&state.input), button(label, state.is_loading)]);

    let mut out = form;
    if let Some(n) = state.notice {
        out.push('\n');
        out.push_str(&notice(n));
    }
    if let Some(data) = &state.last_result {
        out.push('\n');
        out.push_str(&card(Some("Pair Details"), &pair_details(data)));
    }
    out
}

//! Display formatting for amounts, rates, and IDs
//!
//! Presentation only. Coin decimals come from an explicit `CoinRegistry`
//! rather than a global table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vault_core::constants::{SUI_COIN_TYPE, SUI_COIN_TYPE_LONG, SUI_DECIMALS};
use vault_core::{Error, Result};

/// Render `amount` smallest units with `decimals` places, trailing zeros trimmed
///
/// `format_amount(1_500_000_000, 9)` is `"1.5"`.
pub fn format_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let digits = format!("{:0>width$}", amount, width = usize::from(decimals) + 1);
    let (whole, frac) = digits.split_at(digits.len() - usize::from(decimals));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}

/// Parse a human amount such as `"1.5"` into smallest units
pub fn parse_display_amount(value: &str, decimals: u8) -> Result<u64> {
    let value = value.trim();
    let invalid = || Error::invalid_parameters(format!("Invalid amount '{}'", value));

    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > usize::from(decimals) {
        return Err(Error::invalid_parameters(format!(
            "Amount '{}' has more than {} decimal places",
            value, decimals
        )));
    }

    let padded = format!("{}{:0<width$}", whole, frac, width = usize::from(decimals));
    let trimmed = padded.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| {
        Error::overflow(format!("Amount '{}' exceeds the u64 maximum", value))
    })
}

/// Rate as a decimal ratio, e.g. `format_rate(2_000_000_000, 9)` is `"2"`
pub fn format_rate(rate: u64, rate_decimals: u8) -> String {
    format_amount(rate, rate_decimals)
}

/// `0x1234...cdef` form of a long ID; short IDs are returned unchanged
pub fn shorten_id(id: &str) -> String {
    let hex = id.strip_prefix("0x").unwrap_or(id);
    if hex.len() <= 12 || !hex.is_ascii() {
        return id.to_string();
    }
    format!("0x{}...{}", &hex[..6], &hex[hex.len() - 4..])
}

/// Display information for one coin type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    pub symbol: String,
    pub decimals: u8,
}

/// Symbol and decimals per coin type, supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct CoinRegistry {
    coins: HashMap<String, CoinInfo>,
}

impl CoinRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry knowing only SUI, under both its short and long type names
    pub fn with_sui() -> Self {
        let mut registry = Self::new();
        let sui = CoinInfo {
            symbol: "SUI".to_string(),
            decimals: SUI_DECIMALS,
        };
        registry.register(SUI_COIN_TYPE, sui.clone());
        registry.register(SUI_COIN_TYPE_LONG, sui);
        registry
    }

    pub fn register(&mut self, coin_type: impl Into<String>, info: CoinInfo) {
        self.coins.insert(coin_type.into(), info);
    }

    pub fn get(&self, coin_type: &str) -> Option<&CoinInfo> {
        self.coins.get(coin_type)
    }

    /// Decimals for `coin_type`, 0 when unknown
    pub fn decimals(&self, coin_type: &str) -> u8 {
        self.get(coin_type).map(|c| c.decimals).unwrap_or(0)
    }

    /// Symbol for `coin_type`, falling back to the type's last segment
    pub fn symbol<'a>(&'a self, coin_type: &'a str) -> &'a str {
        match self.get(coin_type) {
            Some(info) => &info.symbol,
            None => coin_type.rsplit("::").next().unwrap_or(coin_type),
        }
    }

    /// `"1.5 SUI"`
    pub fn format(&self, amount: u64, coin_type: &str) -> String {
        format!(
            "{} {}",
            format_amount(amount, self.decimals(coin_type)),
            self.symbol(coin_type)
        )
    }
}

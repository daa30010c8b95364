//! Fixed-Rate Exchange Vault
//!
//! A vault holds a reserve of an input asset and mints a paired output asset
//! at a configured rate of `rate / 10^rate_decimals` output units per input
//! unit. Redeeming burns output and pays input back out of the reserve; the
//! owner may deposit, withdraw, and change the rate.
//!
//! This crate assembles the vault calls into an unsigned transaction and reads
//! vault state. It never signs or submits.

pub mod calculator;
pub mod client;
pub mod constants;
pub mod fetch;
pub mod format;
pub mod state;
pub mod tx_builder;
pub mod validate;

// Re-exports
pub use calculator::{compute_input, compute_output, compute_rate};
pub use client::VaultClient;
pub use format::{format_amount, format_rate, parse_display_amount, shorten_id, CoinInfo, CoinRegistry};
pub use state::{
    DepositParams, ExchangeParams, ExchangeQuote, NumericValue, QuoteDirection, UpdateRateParams,
    ValidatedVaultConfig, VaultConfig, VaultMetadata, VaultState, VaultTypeArgs, WithdrawParams,
};
pub use tx_builder::{
    build_create_vault, build_deposit, build_mint, build_mint_and_transfer, build_redeem,
    build_redeem_and_transfer, build_update_rate, build_withdraw, build_withdraw_and_transfer,
};

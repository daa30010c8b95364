//! sui-tx: Transaction building utilities for Sui
//!
//! Provides the programmable transaction accumulator and BCS encoding utilities.

pub mod bcs;
pub mod ptb;

pub use bcs::BcsError;
pub use ptb::*;

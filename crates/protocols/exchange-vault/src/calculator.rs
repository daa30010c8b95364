//! Exchange Vault Calculator
//!
//! Fixed-point rate math matching the on-chain u64 semantics. No async, no RPC.
//!
//! A rate of `r` with `d` decimals means `r / 10^d` output units per input unit:
//!   output = floor(rate * input / 10^d)
//!   input  = floor(output * 10^d / rate)
//!   rate   = floor(output * 10^d / input)
//!
//! Products are formed in `BigUint` and narrowed to u64 at the end, so the
//! overflow boundary is detected rather than wrapped.

use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};
use vault_core::constants::{MAX_RATE_DECIMALS, MAX_U64};
use vault_core::{Error, Result};

use crate::state::NumericValue;

/// `10^exponent`
pub fn pow10(exponent: u8) -> BigUint {
    BigUint::from(10u8).pow(u32::from(exponent))
}

/// Parse a numeric input into an exact integer
///
/// Strings must be base-10 integers, optionally signed, surrounding
/// whitespace ignored. Fractions and exponents are rejected.
pub fn parse_integer(value: &NumericValue) -> Result<BigInt> {
    match value {
        NumericValue::Integer(n) => Ok(BigInt::from(*n)),
        NumericValue::Big(n) => Ok(n.clone()),
        NumericValue::Text(raw) => {
            let trimmed = raw.trim();
            let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_parameters(format!(
                    "'{}' is not an integer",
                    raw
                )));
            }
            BigInt::from_str(trimmed)
                .map_err(|_| Error::invalid_parameters(format!("'{}' is not an integer", raw)))
        }
    }
}

/// Parse a value that must be non-negative
fn parse_unsigned(value: &NumericValue, what: &str) -> Result<BigUint> {
    let n = parse_integer(value)?;
    if n.sign() == Sign::Minus {
        return Err(Error::invalid_parameters(format!(
            "{} must be non-negative, got {}",
            what, value
        )));
    }
    n.to_biguint()
        .ok_or_else(|| Error::invalid_parameters(format!("{} out of range: {}", what, value)))
}

fn check_decimals(rate_decimals: u8) -> Result<()> {
    if rate_decimals > MAX_RATE_DECIMALS {
        return Err(Error::invalid_parameters(format!(
            "rate decimals must be between 0 and {}, got {}",
            MAX_RATE_DECIMALS, rate_decimals
        )));
    }
    Ok(())
}

/// Rate as a u64; zero is a division by zero in every formula using it
fn parse_rate(rate: &NumericValue) -> Result<BigUint> {
    let rate = parse_unsigned(rate, "rate")?;
    if rate.is_zero() {
        return Err(Error::division_by_zero("rate is zero"));
    }
    if rate > BigUint::from(MAX_U64) {
        return Err(Error::invalid_parameters(format!(
            "rate {} exceeds the u64 maximum",
            rate
        )));
    }
    Ok(rate)
}

/// Narrow to u64, reporting anything larger as an overflow
fn narrow(value: BigUint, what: &str) -> Result<u64> {
    value
        .to_u64()
        .ok_or_else(|| Error::overflow(format!("{} {} exceeds the u64 maximum", what, value)))
}

/// Output received for `input_amount` at `rate`
///
/// `floor(rate * input_amount / 10^rate_decimals)`
pub fn compute_output(
    rate: impl Into<NumericValue>,
    input_amount: impl Into<NumericValue>,
    rate_decimals: u8,
) -> Result<u64> {
    let rate = rate.into();
    let input_amount = input_amount.into();

    let input = parse_unsigned(&input_amount, "input amount")?;
    check_decimals(rate_decimals)?;
    let rate = parse_rate(&rate)?;

    let max_input = BigUint::from(MAX_U64) / &rate;
    if input > max_input {
        return Err(Error::overflow(format!(
            "input amount {} times rate {} exceeds the u64 maximum",
            input, rate
        )));
    }

    let output = (rate * input) / pow10(rate_decimals);
    narrow(output, "output")
}

/// Input required to receive `output_amount` at `rate`
///
/// `floor(output_amount * 10^rate_decimals / rate)`
pub fn compute_input(
    rate: impl Into<NumericValue>,
    output_amount: impl Into<NumericValue>,
    rate_decimals: u8,
) -> Result<u64> {
    let rate = rate.into();
    let output_amount = output_amount.into();

    let output = parse_unsigned(&output_amount, "output amount")?;
    check_decimals(rate_decimals)?;
    let rate = parse_rate(&rate)?;

    let scale = pow10(rate_decimals);
    let max_output = BigUint::from(MAX_U64) / &scale;
    if output > max_output {
        return Err(Error::overflow(format!(
            "output amount {} times 10^{} exceeds the u64 maximum",
            output, rate_decimals
        )));
    }

    let input = (output * scale) / rate;
    narrow(input, "input")
}

/// Rate implied by exchanging `input_amount` for `output_amount`
///
/// `floor(output_amount * 10^rate_decimals / input_amount)`
pub fn compute_rate(
    input_amount: impl Into<NumericValue>,
    output_amount: impl Into<NumericValue>,
    rate_decimals: u8,
) -> Result<u64> {
    let input_amount = input_amount.into();
    let output_amount = output_amount.into();

    let input = parse_unsigned(&input_amount, "input amount")?;
    let output = parse_unsigned(&output_amount, "output amount")?;
    check_decimals(rate_decimals)?;

    if input.is_zero() {
        return Err(Error::division_by_zero("input amount is zero"));
    }

    let rate = (output * pow10(rate_decimals)) / input;
    narrow(rate, "rate")
}

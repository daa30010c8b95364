//! Input validation for vault operations
//!
//! Each check comes as a predicate (`is_valid_*`) and a form that returns the
//! parsed or normalized value (`validate_*`). Failures are `InvalidParameters`
//! naming the offending value.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use url::Url;
use vault_core::constants::{MAX_RATE_DECIMALS, MAX_U64};
use vault_core::{parse_rpc_url, Error, Result};

use crate::calculator::parse_integer;
use crate::constants::limits;
use crate::state::{NumericValue, ValidatedVaultConfig, VaultConfig};

const MAX_ADDRESS_DIGITS: usize = 64;

fn hex_digits(address: &str) -> Option<&str> {
    let digits = address.strip_prefix("0x")?;
    let valid = !digits.is_empty()
        && digits.len() <= MAX_ADDRESS_DIGITS
        && digits.chars().all(|c| c.is_ascii_hexdigit());
    valid.then_some(digits)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// =============================================================================
// Addresses and object IDs
// =============================================================================

/// `0x` followed by 1 to 64 hex digits
pub fn is_valid_address(address: &str) -> bool {
    hex_digits(address).is_some()
}

/// Validate and normalize an address
pub fn validate_address(address: &str) -> Result<String> {
    normalize_address(address)
}

/// Left-pad to 64 lowercase hex digits
pub fn normalize_address(address: &str) -> Result<String> {
    normalize_hex_id("address", address)
}

fn normalize_hex_id(what: &str, value: &str) -> Result<String> {
    let digits = hex_digits(value).ok_or_else(|| {
        Error::invalid_parameters(format!(
            "Invalid {} '{}': expected 0x followed by 1-64 hex digits",
            what, value
        ))
    })?;
    Ok(format!("0x{:0>64}", digits.to_ascii_lowercase()))
}

pub fn is_valid_object_id(object_id: &str) -> bool {
    is_valid_address(object_id)
}

/// Validate and normalize an object ID
pub fn validate_object_id(object_id: &str) -> Result<String> {
    normalize_hex_id("object ID", object_id)
}

// =============================================================================
// Coin types
// =============================================================================

/// `address::module::Name`
pub fn is_valid_coin_type(coin_type: &str) -> bool {
    let segments: Vec<&str> = coin_type.split("::").collect();
    match segments.as_slice() {
        [address, module, name] => {
            is_valid_address(address) && is_identifier(module) && is_identifier(name)
        }
        _ => false,
    }
}

pub fn validate_coin_type(coin_type: &str) -> Result<String> {
    if is_valid_coin_type(coin_type) {
        Ok(coin_type.to_string())
    } else {
        Err(Error::invalid_parameters(format!(
            "Invalid coin type '{}': expected address::module::Name",
            coin_type
        )))
    }
}

// =============================================================================
// Amounts, rates, bounds
// =============================================================================

pub fn is_valid_bounds(value: BigInt, min: Option<BigInt>, max: Option<BigInt>) -> bool {
    validate_bounds(value, min, max).is_ok()
}

/// Check `value` against inclusive bounds, defaulting to `[0, MAX_U64]`
pub fn validate_bounds(value: BigInt, min: Option<BigInt>, max: Option<BigInt>) -> Result<BigInt> {
    let min = min.unwrap_or_default();
    let max = max.unwrap_or_else(|| BigInt::from(MAX_U64));
    if value < min {
        return Err(Error::invalid_parameters(format!(
            "Value {} is below the minimum {}",
            value, min
        )));
    }
    if value > max {
        return Err(Error::invalid_parameters(format!(
            "Value {} is above the maximum {}",
            value, max
        )));
    }
    Ok(value)
}

fn to_u64(value: &BigInt) -> Result<u64> {
    value
        .to_u64()
        .ok_or_else(|| Error::invalid_parameters(format!("Value {} does not fit in u64", value)))
}

pub fn is_valid_amount(value: impl Into<NumericValue>) -> bool {
    validate_amount(value).is_ok()
}

/// Parse an amount in smallest units, `0..=MAX_U64`
pub fn validate_amount(value: impl Into<NumericValue>) -> Result<u64> {
    let value = value.into();
    let parsed = parse_integer(&value)
        .map_err(|_| Error::invalid_parameters(format!("Invalid amount '{}'", value)))?;
    if parsed.sign() == num_bigint::Sign::Minus {
        return Err(Error::invalid_parameters(format!(
            "Invalid amount '{}': must be non-negative",
            value
        )));
    }
    to_u64(&validate_bounds(parsed, None, None)?)
}

pub fn is_valid_rate(value: impl Into<NumericValue>) -> bool {
    validate_rate(value).is_ok()
}

/// Parse a rate, `1..=MAX_U64`
pub fn validate_rate(value: impl Into<NumericValue>) -> Result<u64> {
    let value = value.into();
    let parsed = parse_integer(&value)
        .map_err(|_| Error::invalid_parameters(format!("Invalid rate '{}'", value)))?;
    if parsed <= BigInt::default() {
        return Err(Error::invalid_parameters(format!(
            "Invalid rate '{}': must be greater than zero",
            value
        )));
    }
    to_u64(&validate_bounds(parsed, Some(BigInt::from(1u8)), None)?)
}

pub fn is_valid_rate_decimals(decimals: u32) -> bool {
    decimals <= u32::from(MAX_RATE_DECIMALS)
}

pub fn validate_rate_decimals(decimals: u32) -> Result<u8> {
    u8::try_from(decimals)
        .ok()
        .filter(|d| *d <= MAX_RATE_DECIMALS)
        .ok_or_else(|| {
            Error::invalid_parameters(format!(
                "Invalid rate decimals {}: must be between 0 and {}",
                decimals, MAX_RATE_DECIMALS
            ))
        })
}

// =============================================================================
// Strings and URLs
// =============================================================================

/// Length in Unicode scalar values within `min..=max`
pub fn is_valid_string_length(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

pub fn validate_string_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min {
        return Err(Error::invalid_parameters(format!(
            "{} must be at least {} characters, got {}",
            field, min, len
        )));
    }
    if len > max {
        return Err(Error::invalid_parameters(format!(
            "{} must be at most {} characters, got {}",
            field, max, len
        )));
    }
    Ok(())
}

pub fn is_valid_symbol(symbol: &str) -> bool {
    validate_symbol(symbol).is_ok()
}

pub fn validate_symbol(symbol: &str) -> Result<()> {
    validate_string_length("Symbol", symbol, limits::SYMBOL_MIN, limits::SYMBOL_MAX)
}

pub fn is_valid_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

pub fn validate_name(name: &str) -> Result<()> {
    validate_string_length("Name", name, limits::NAME_MIN, limits::NAME_MAX)
}

pub fn is_valid_description(description: &str) -> bool {
    validate_description(description).is_ok()
}

pub fn validate_description(description: &str) -> Result<()> {
    validate_string_length(
        "Description",
        description,
        limits::DESCRIPTION_MIN,
        limits::DESCRIPTION_MAX,
    )
}

pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Any well-formed absolute URL
pub fn validate_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::invalid_parameters(format!("Invalid URL '{}': {}", url, e)))
}

pub fn is_valid_rpc_url(url: &str) -> bool {
    validate_rpc_url(url).is_ok()
}

/// Well-formed URL with an http or https scheme
pub fn validate_rpc_url(url: &str) -> Result<Url> {
    parse_rpc_url(url)
}

// =============================================================================
// Composite
// =============================================================================

pub fn is_valid_vault_config(config: &VaultConfig) -> bool {
    validate_vault_config(config).is_ok()
}

/// Validate a vault configuration, stopping at the first failure.
///
/// Checks run in a fixed order: rate, rate decimals, symbol, name,
/// description, input type, output type, icon URL. A blank icon URL counts
/// as absent.
pub fn validate_vault_config(config: &VaultConfig) -> Result<ValidatedVaultConfig> {
    let rate = validate_rate(config.rate.clone())?;
    let rate_decimals = validate_rate_decimals(config.rate_decimals)?;
    validate_symbol(&config.symbol)?;
    validate_name(&config.name)?;
    validate_description(&config.description)?;
    let input_type = validate_coin_type(&config.input_type)?;
    let output_type = validate_coin_type(&config.output_type)?;

    let icon_url = match config.icon_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            validate_url(url)?;
            Some(url.to_string())
        }
        _ => None,
    };

    Ok(ValidatedVaultConfig {
        rate,
        rate_decimals,
        symbol: config.symbol.clone(),
        name: config.name.clone(),
        description: config.description.clone(),
        icon_url,
        input_type,
        output_type,
    })
}

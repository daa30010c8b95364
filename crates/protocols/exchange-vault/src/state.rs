//! Exchange Vault State Types
//!
//! Caller-facing parameter types, vault state read from chain, and quotes.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sui_tx::ObjectHandle;

/// Raw numeric input before parsing
///
/// Callers pass amounts and rates as decimal strings, native integers, or
/// big integers. Parsing to an exact value happens in the validation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericValue {
    Text(String),
    Integer(i128),
    Big(BigInt),
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Big(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for NumericValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NumericValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for NumericValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! numeric_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NumericValue {
                fn from(value: $t) -> Self {
                    Self::Integer(value as i128)
                }
            }
        )*
    };
}

numeric_from_int!(u8, u32, u64, i32, i64, i128);

impl From<u128> for NumericValue {
    fn from(value: u128) -> Self {
        match i128::try_from(value) {
            Ok(v) => Self::Integer(v),
            Err(_) => Self::Big(BigInt::from(value)),
        }
    }
}

impl From<BigInt> for NumericValue {
    fn from(value: BigInt) -> Self {
        Self::Big(value)
    }
}

impl From<BigUint> for NumericValue {
    fn from(value: BigUint) -> Self {
        Self::Big(BigInt::from(value))
    }
}

// Serialized as a decimal string so values above 2^53 survive JSON.
impl Serialize for NumericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NumericValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumericVisitor;

        impl Visitor<'_> for NumericVisitor {
            type Value = NumericValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or a decimal integer string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NumericValue, E> {
                Ok(NumericValue::Text(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NumericValue, E> {
                Ok(NumericValue::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NumericValue, E> {
                Ok(NumericValue::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<NumericValue, E> {
                // Floats lose precision above 2^53; send large values as strings.
                Err(E::invalid_type(de::Unexpected::Float(v), &self))
            }
        }

        deserializer.deserialize_any(NumericVisitor)
    }
}

/// Caller-supplied configuration for a new vault
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultConfig {
    /// Output units per input unit, scaled by `10^rate_decimals`
    pub rate: NumericValue,
    pub rate_decimals: u32,
    pub symbol: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Asset deposited into the vault
    pub input_type: String,
    /// Asset minted against deposits
    pub output_type: String,
}

/// `VaultConfig` after validation, ready for encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedVaultConfig {
    pub rate: u64,
    pub rate_decimals: u8,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub input_type: String,
    pub output_type: String,
}

impl ValidatedVaultConfig {
    pub fn type_args(&self) -> VaultTypeArgs {
        VaultTypeArgs {
            input_type: self.input_type.clone(),
            output_type: self.output_type.clone(),
        }
    }
}

/// Generic parameters of a vault, `Vault<Input, Output>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultTypeArgs {
    pub input_type: String,
    pub output_type: String,
}

impl VaultTypeArgs {
    pub fn new(input_type: impl Into<String>, output_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            output_type: output_type.into(),
        }
    }

    /// Type argument list in call order
    pub fn to_vec(&self) -> Vec<String> {
        vec![self.input_type.clone(), self.output_type.clone()]
    }
}

/// Mint or redeem call inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeParams {
    pub type_args: VaultTypeArgs,
    pub vault: ObjectHandle,
    pub metadata: ObjectHandle,
    /// Coin being exchanged: input asset on mint, output asset on redeem
    pub coin: ObjectHandle,
}

/// Owner deposit of reserve coins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositParams {
    pub type_args: VaultTypeArgs,
    pub owner_cap: ObjectHandle,
    pub vault: ObjectHandle,
    pub coin: ObjectHandle,
}

/// Owner withdrawal of reserve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawParams {
    pub type_args: VaultTypeArgs,
    pub owner_cap: ObjectHandle,
    pub vault: ObjectHandle,
    pub amount: NumericValue,
}

/// Owner rate change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRateParams {
    pub type_args: VaultTypeArgs,
    pub owner_cap: ObjectHandle,
    pub vault: ObjectHandle,
    pub new_rate: NumericValue,
}

/// Parsed state of a vault object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultState {
    pub vault_id: String,
    pub input_type: String,
    pub output_type: String,
    pub rate: u64,
    pub rate_decimals: u8,
    /// Input-asset balance held by the vault
    pub reserve: u64,
}

impl VaultState {
    pub fn type_args(&self) -> VaultTypeArgs {
        VaultTypeArgs::new(&self.input_type, &self.output_type)
    }
}

/// Display metadata of a vault's output asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultMetadata {
    pub metadata_id: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub icon_url: Option<String>,
}

/// Which side of the vault a quote prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteDirection {
    /// Input asset in, output asset out
    Mint,
    /// Output asset in, input asset out of reserve
    Redeem,
}

/// Derived exchange preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeQuote {
    pub direction: QuoteDirection,
    pub input_amount: u64,
    pub output_amount: u64,
    pub rate: u64,
    pub rate_decimals: u8,
    /// Not computed for fixed-rate vaults
    pub price_impact: Option<f64>,
}

//! Exchange Vault Constants
//!
//! Move module and function names of the vault package, framework call
//! targets used for optional URL arguments, and on-chain field names.

/// Module holding the vault entry points
pub const VAULT_MODULE: &str = "vault";

/// Vault entry points
pub mod functions {
    pub const CREATE_VAULT: &str = "create_vault";
    pub const MINT: &str = "mint";
    pub const REDEEM: &str = "redeem";
    pub const DEPOSIT: &str = "deposit";
    pub const WITHDRAW: &str = "withdraw";
    pub const UPDATE_RATE: &str = "update_rate";
}

/// Struct names published by the vault module
pub mod structs {
    pub const VAULT: &str = "Vault";
    pub const OWNER_CAP: &str = "OwnerCap";
    pub const METADATA: &str = "VaultMetadata";
}

/// Framework calls used to build `Option<Url>`
pub mod framework {
    pub const URL_MODULE: &str = "url";
    pub const NEW_UNSAFE_FROM_BYTES: &str = "new_unsafe_from_bytes";
    pub const OPTION_MODULE: &str = "option";
    pub const SOME: &str = "some";
    pub const NONE: &str = "none";
    pub const URL_TYPE: &str = "0x2::url::Url";
}

/// Field names in the vault's Move content
pub mod fields {
    pub const RATE: &str = "rate";
    pub const RATE_DECIMALS: &str = "rate_decimals";
    pub const RESERVE: &str = "reserve";
    pub const VAULT_ID: &str = "vault_id";
    pub const NAME: &str = "name";
    pub const SYMBOL: &str = "symbol";
    pub const DESCRIPTION: &str = "description";
    pub const ICON_URL: &str = "icon_url";
}

/// Vault configuration string limits (Unicode scalar values)
pub mod limits {
    pub const SYMBOL_MIN: usize = 1;
    pub const SYMBOL_MAX: usize = 32;
    pub const NAME_MIN: usize = 1;
    pub const NAME_MAX: usize = 256;
    pub const DESCRIPTION_MIN: usize = 1;
    pub const DESCRIPTION_MAX: usize = 1000;
}

/// Fully qualified struct type `{package}::vault::{name}`
pub fn vault_struct_type(package_id: &str, name: &str) -> String {
    format!("{}::{}::{}", package_id, VAULT_MODULE, name)
}

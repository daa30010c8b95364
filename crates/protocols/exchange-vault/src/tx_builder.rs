//! Exchange Vault Call Builder
//!
//! Appends vault calls to a caller-owned `ProgrammableTransaction`.
//!
//! Every builder checks all of its arguments before touching the
//! transaction, so on error nothing has been appended.
//!
//! # Create
//!
//! Commands: [url::new_unsafe_from_bytes, option::some] or [option::none],
//!           then vault::create_vault<Input, Output>(
//!               rate, treasury, rate_decimals, symbol, name, description, icon)
//!
//! # Mint / Redeem
//!
//! Commands: vault::{mint,redeem}<Input, Output>(vault, metadata, coin) -> Coin
//!           [TransferObjects(coin, recipient)]
//!
//! # Owner operations
//!
//! deposit(owner_cap, vault, coin)
//! withdraw(owner_cap, vault, amount: u64) -> Coin  [TransferObjects]
//! update_rate(owner_cap, vault, new_rate: u64)

use sui_tx::{bcs, Argument, ObjectHandle, ProgrammableTransaction};
use vault_core::constants::{MOVE_STDLIB_ADDRESS, SUI_FRAMEWORK_ADDRESS};
use vault_core::{Error, Result};

use crate::constants::{framework, functions, VAULT_MODULE};
use crate::state::{
    DepositParams, ExchangeParams, UpdateRateParams, VaultConfig, VaultTypeArgs, WithdrawParams,
};
use crate::validate;

/// Object handle with any raw ID normalized
fn check_handle(role: &str, handle: &ObjectHandle) -> Result<ObjectHandle> {
    match handle {
        ObjectHandle::Id(id) => validate::validate_object_id(id)
            .map(ObjectHandle::Id)
            .map_err(|e| Error::invalid_parameters(format!("{}: {}", role, e))),
        ObjectHandle::Resolved(arg) => Ok(ObjectHandle::Resolved(*arg)),
    }
}

fn check_type_args(type_args: &VaultTypeArgs) -> Result<Vec<String>> {
    validate::validate_coin_type(&type_args.input_type)?;
    validate::validate_coin_type(&type_args.output_type)?;
    Ok(type_args.to_vec())
}

fn check_package(package_id: &str) -> Result<String> {
    validate::validate_object_id(package_id)
        .map_err(|e| Error::invalid_parameters(format!("package: {}", e)))
}

/// BCS address bytes for a transfer recipient
fn check_recipient(recipient: &str) -> Result<Vec<u8>> {
    let normalized = validate::validate_address(recipient)
        .map_err(|e| Error::invalid_parameters(format!("recipient: {}", e)))?;
    bcs::encode_address(&normalized)
        .map_err(|e| Error::invalid_parameters(format!("recipient: {}", e)))
}

/// Extra room a transfer variant needs
const TRANSFER_INPUTS: usize = 1;
const TRANSFER_COMMANDS: usize = 1;

fn transfer(tx: &mut ProgrammableTransaction, object: Argument, recipient: Vec<u8>) -> Result<()> {
    let address = tx.pure(recipient)?;
    tx.transfer_objects(vec![object], address)?;
    Ok(())
}

// =============================================================================
// Create
// =============================================================================

/// Append the calls creating a vault.
///
/// `treasury` is the output asset's treasury capability, handed to the vault.
pub fn build_create_vault(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    config: &VaultConfig,
    treasury: &ObjectHandle,
) -> Result<()> {
    let package = check_package(package_id)?;
    let config = validate::validate_vault_config(config)?;
    let treasury = check_handle("treasury", treasury)?;
    // Icon bytes plus six call arguments; url + some + create_vault
    tx.reserve(7, 3)?;
    let url_type = vec![framework::URL_TYPE.to_string()];

    let icon = match &config.icon_url {
        Some(url) => {
            let bytes = tx.pure_bytes(url.as_bytes())?;
            let url = tx.move_call(
                SUI_FRAMEWORK_ADDRESS,
                framework::URL_MODULE,
                framework::NEW_UNSAFE_FROM_BYTES,
                vec![],
                vec![bytes],
            )?;
            tx.move_call(
                MOVE_STDLIB_ADDRESS,
                framework::OPTION_MODULE,
                framework::SOME,
                url_type,
                vec![url],
            )?
        }
        None => tx.move_call(
            MOVE_STDLIB_ADDRESS,
            framework::OPTION_MODULE,
            framework::NONE,
            url_type,
            vec![],
        )?,
    };

    let rate = tx.pure_u64(config.rate)?;
    let treasury = tx.resolve(&treasury)?;
    let rate_decimals = tx.pure_u8(config.rate_decimals)?;
    let symbol = tx.pure_bytes(config.symbol.as_bytes())?;
    let name = tx.pure_bytes(config.name.as_bytes())?;
    let description = tx.pure_bytes(config.description.as_bytes())?;

    tx.move_call(
        &package,
        VAULT_MODULE,
        functions::CREATE_VAULT,
        config.type_args().to_vec(),
        vec![rate, treasury, rate_decimals, symbol, name, description, icon],
    )?;
    Ok(())
}

// =============================================================================
// Mint / Redeem
// =============================================================================

fn build_exchange(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    function: &str,
    params: &ExchangeParams,
) -> Result<Argument> {
    let package = check_package(package_id)?;
    let type_args = check_type_args(&params.type_args)?;
    let vault = check_handle("vault", &params.vault)?;
    let metadata = check_handle("metadata", &params.metadata)?;
    let coin = check_handle("coin", &params.coin)?;
    tx.reserve(3, 1)?;

    let args = vec![tx.resolve(&vault)?, tx.resolve(&metadata)?, tx.resolve(&coin)?];
    Ok(tx.move_call(&package, VAULT_MODULE, function, type_args, args)?)
}

/// Append a mint; returns the minted output coin
pub fn build_mint(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &ExchangeParams,
) -> Result<Argument> {
    build_exchange(tx, package_id, functions::MINT, params)
}

/// Append a mint and send the minted coin to `recipient`
pub fn build_mint_and_transfer(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &ExchangeParams,
    recipient: &str,
) -> Result<()> {
    let recipient = check_recipient(recipient)?;
    tx.reserve(3 + TRANSFER_INPUTS, 1 + TRANSFER_COMMANDS)?;
    let coin = build_mint(tx, package_id, params)?;
    transfer(tx, coin, recipient)
}

/// Append a redeem; returns the released input coin
pub fn build_redeem(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &ExchangeParams,
) -> Result<Argument> {
    build_exchange(tx, package_id, functions::REDEEM, params)
}

pub fn build_redeem_and_transfer(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &ExchangeParams,
    recipient: &str,
) -> Result<()> {
    let recipient = check_recipient(recipient)?;
    tx.reserve(3 + TRANSFER_INPUTS, 1 + TRANSFER_COMMANDS)?;
    let coin = build_redeem(tx, package_id, params)?;
    transfer(tx, coin, recipient)
}

// =============================================================================
// Owner operations
// =============================================================================

pub fn build_deposit(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &DepositParams,
) -> Result<()> {
    let package = check_package(package_id)?;
    let type_args = check_type_args(&params.type_args)?;
    let owner_cap = check_handle("owner cap", &params.owner_cap)?;
    let vault = check_handle("vault", &params.vault)?;
    let coin = check_handle("coin", &params.coin)?;
    tx.reserve(3, 1)?;

    let args = vec![
        tx.resolve(&owner_cap)?,
        tx.resolve(&vault)?,
        tx.resolve(&coin)?,
    ];
    tx.move_call(&package, VAULT_MODULE, functions::DEPOSIT, type_args, args)?;
    Ok(())
}

/// Append a withdrawal; returns the withdrawn reserve coin
pub fn build_withdraw(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &WithdrawParams,
) -> Result<Argument> {
    let package = check_package(package_id)?;
    let type_args = check_type_args(&params.type_args)?;
    let owner_cap = check_handle("owner cap", &params.owner_cap)?;
    let vault = check_handle("vault", &params.vault)?;
    let amount = validate::validate_amount(params.amount.clone())?;
    tx.reserve(3, 1)?;

    let args = vec![
        tx.resolve(&owner_cap)?,
        tx.resolve(&vault)?,
        tx.pure_u64(amount)?,
    ];
    Ok(tx.move_call(&package, VAULT_MODULE, functions::WITHDRAW, type_args, args)?)
}

pub fn build_withdraw_and_transfer(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &WithdrawParams,
    recipient: &str,
) -> Result<()> {
    let recipient = check_recipient(recipient)?;
    tx.reserve(3 + TRANSFER_INPUTS, 1 + TRANSFER_COMMANDS)?;
    let coin = build_withdraw(tx, package_id, params)?;
    transfer(tx, coin, recipient)
}

pub fn build_update_rate(
    tx: &mut ProgrammableTransaction,
    package_id: &str,
    params: &UpdateRateParams,
) -> Result<()> {
    let package = check_package(package_id)?;
    let type_args = check_type_args(&params.type_args)?;
    let owner_cap = check_handle("owner cap", &params.owner_cap)?;
    let vault = check_handle("vault", &params.vault)?;
    let new_rate = validate::validate_rate(params.new_rate.clone())?;
    tx.reserve(3, 1)?;

    let args = vec![
        tx.resolve(&owner_cap)?,
        tx.resolve(&vault)?,
        tx.pure_u64(new_rate)?,
    ];
    tx.move_call(&package, VAULT_MODULE, functions::UPDATE_RATE, type_args, args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_tx::{CallArg, Command};
    use vault_core::ErrorKind;

    const PACKAGE: &str = "0xbeef";
    const VAULT: &str = "0xa1";
    const METADATA: &str = "0xa2";
    const COIN: &str = "0xc0";
    const CAP: &str = "0xca";
    const RECIPIENT: &str = "0x5";

    fn long(id: &str) -> String {
        validate::normalize_address(id).unwrap()
    }

    fn type_args() -> VaultTypeArgs {
        VaultTypeArgs::new("0x2::sui::SUI", "0xabc::vlt::VLT")
    }

    fn config(icon_url: Option<&str>) -> VaultConfig {
        VaultConfig {
            rate: "2000000000".into(),
            rate_decimals: 9,
            symbol: "VLT".into(),
            name: "Vault Token".into(),
            description: "Minted at a fixed rate".into(),
            icon_url: icon_url.map(str::to_string),
            input_type: "0x2::sui::SUI".into(),
            output_type: "0xabc::vlt::VLT".into(),
        }
    }

    fn exchange(coin: ObjectHandle) -> ExchangeParams {
        ExchangeParams {
            type_args: type_args(),
            vault: VAULT.into(),
            metadata: METADATA.into(),
            coin,
        }
    }

    fn targets(tx: &ProgrammableTransaction) -> Vec<String> {
        tx.move_calls().map(|c| c.target()).collect()
    }

    #[test]
    fn test_create_without_icon_uses_option_none() {
        let mut tx = ProgrammableTransaction::new();
        build_create_vault(&mut tx, PACKAGE, &config(None), &"0xtreasury".into())
            .unwrap_err();
        assert!(tx.is_empty());

        build_create_vault(&mut tx, PACKAGE, &config(None), &"0x7e".into()).unwrap();
        assert_eq!(
            targets(&tx),
            vec![
                "0x1::option::none".to_string(),
                format!("{}::vault::create_vault", long(PACKAGE)),
            ]
        );
        let none = tx.commands()[0].as_move_call().unwrap();
        assert_eq!(none.type_arguments, vec!["0x2::url::Url".to_string()]);
        assert!(none.arguments.is_empty());
    }

    #[test]
    fn test_create_with_icon_wraps_url() {
        let mut tx = ProgrammableTransaction::new();
        build_create_vault(
            &mut tx,
            PACKAGE,
            &config(Some("https://example.com/icon.png")),
            &"0x7e".into(),
        )
        .unwrap();

        assert_eq!(
            targets(&tx),
            vec![
                "0x2::url::new_unsafe_from_bytes".to_string(),
                "0x1::option::some".to_string(),
                format!("{}::vault::create_vault", long(PACKAGE)),
            ]
        );
        let some = tx.commands()[1].as_move_call().unwrap();
        assert_eq!(some.arguments, vec![Argument::Result(0)]);
        assert_eq!(some.type_arguments, vec!["0x2::url::Url".to_string()]);
    }

    #[test]
    fn test_create_argument_encoding() {
        let mut tx = ProgrammableTransaction::new();
        build_create_vault(&mut tx, PACKAGE, &config(None), &"0x7e".into()).unwrap();

        let create = tx.commands()[1].as_move_call().unwrap();
        assert_eq!(
            create.type_arguments,
            vec!["0x2::sui::SUI".to_string(), "0xabc::vlt::VLT".to_string()]
        );
        assert_eq!(create.arguments.len(), 7);

        let a = &create.arguments;
        assert_eq!(
            tx.pure_input(a[0]),
            Some(&2_000_000_000u64.to_le_bytes()[..])
        );
        assert_eq!(
            tx.inputs()[1],
            CallArg::UnresolvedObject {
                object_id: long("0x7e")
            }
        );
        assert_eq!(tx.pure_input(a[2]), Some(&[9u8][..]));
        assert_eq!(tx.pure_input(a[3]), Some(&[3u8, b'V', b'L', b'T'][..]));
        assert_eq!(a[6], Argument::Result(0));
    }

    #[test]
    fn test_create_rejects_bad_config_without_appending() {
        let mut tx = ProgrammableTransaction::new();
        let mut bad = config(None);
        bad.rate_decimals = 19;
        let err = build_create_vault(&mut tx, PACKAGE, &bad, &"0x7e".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert!(tx.is_empty());
    }

    #[test]
    fn test_mint_argument_order_and_result() {
        let mut tx = ProgrammableTransaction::new();
        let coin = build_mint(&mut tx, PACKAGE, &exchange(COIN.into())).unwrap();
        assert_eq!(coin, Argument::Result(0));

        let call = tx.commands()[0].as_move_call().unwrap();
        assert_eq!(call.function, "mint");
        assert_eq!(
            call.arguments,
            vec![Argument::Input(0), Argument::Input(1), Argument::Input(2)]
        );
        assert_eq!(
            tx.inputs()[2],
            CallArg::UnresolvedObject {
                object_id: long(COIN)
            }
        );
    }

    #[test]
    fn test_mint_and_transfer_sends_result() {
        let mut tx = ProgrammableTransaction::new();
        build_mint_and_transfer(&mut tx, PACKAGE, &exchange(COIN.into()), RECIPIENT).unwrap();

        assert_eq!(tx.commands().len(), 2);
        match &tx.commands()[1] {
            Command::TransferObjects { objects, address } => {
                assert_eq!(objects, &vec![Argument::Result(0)]);
                assert_eq!(tx.pure_input(*address).map(|b| b[31]), Some(5));
            }
            other => panic!("expected transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_mint_and_transfer_rejects_amount_as_coin() {
        let mut tx = ProgrammableTransaction::new();
        let err = build_mint_and_transfer(&mut tx, PACKAGE, &exchange("1000000".into()), RECIPIENT)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert!(tx.is_empty());
    }

    #[test]
    fn test_transfer_variants_reject_bad_recipient_first() {
        let mut tx = ProgrammableTransaction::new();
        let err =
            build_redeem_and_transfer(&mut tx, PACKAGE, &exchange(COIN.into()), "alice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert!(tx.is_empty());
    }

    #[test]
    fn test_redeem_and_transfer_sends_released_coin() {
        let mut tx = ProgrammableTransaction::new();
        build_redeem_and_transfer(&mut tx, PACKAGE, &exchange(COIN.into()), RECIPIENT).unwrap();

        assert_eq!(
            targets(&tx),
            vec![format!("{}::vault::redeem", long(PACKAGE))]
        );
        match &tx.commands()[1] {
            Command::TransferObjects { objects, address } => {
                assert_eq!(objects, &vec![Argument::Result(0)]);
                assert_eq!(*address, Argument::Input(3));
                assert_eq!(tx.pure_input(*address).map(|b| b[31]), Some(5));
            }
            other => panic!("expected transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_mint_from_gas_coin_handle() {
        let params: ExchangeParams = serde_json::from_str(
            r#"{
                "typeArgs": {"inputType": "0x2::sui::SUI", "outputType": "0xabc::vlt::VLT"},
                "vault": "0xa1",
                "metadata": "0xa2",
                "coin": "GasCoin"
            }"#,
        )
        .unwrap();

        let mut tx = ProgrammableTransaction::new();
        build_mint(&mut tx, PACKAGE, &params).unwrap();
        let call = tx.commands()[0].as_move_call().unwrap();
        assert_eq!(call.arguments[2], Argument::GasCoin);
        assert_eq!(tx.inputs().len(), 2);
    }

    #[test]
    fn test_full_transaction_appends_nothing() {
        let mut tx = ProgrammableTransaction::new();
        tx.inputs = vec![CallArg::Pure(vec![]); sui_tx::MAX_ENTRIES - 2];

        let err = build_mint(&mut tx, PACKAGE, &exchange(COIN.into())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert_eq!(tx.inputs().len(), sui_tx::MAX_ENTRIES - 2);
        assert!(tx.commands().is_empty());
    }

    #[test]
    fn test_redeem_uses_redeem_function() {
        let mut tx = ProgrammableTransaction::new();
        build_redeem(&mut tx, PACKAGE, &exchange(COIN.into())).unwrap();
        assert_eq!(tx.commands()[0].as_move_call().unwrap().function, "redeem");
    }

    #[test]
    fn test_bad_type_argument_appends_nothing() {
        let mut tx = ProgrammableTransaction::new();
        let mut params = exchange(COIN.into());
        params.type_args.output_type = "vlt::VLT".into();
        assert!(build_mint(&mut tx, PACKAGE, &params).is_err());
        assert!(tx.is_empty());
    }

    #[test]
    fn test_withdraw_then_deposit_passes_handle_through() {
        let mut tx = ProgrammableTransaction::new();
        let withdrawn = build_withdraw(
            &mut tx,
            PACKAGE,
            &WithdrawParams {
                type_args: type_args(),
                owner_cap: CAP.into(),
                vault: VAULT.into(),
                amount: 500u64.into(),
            },
        )
        .unwrap();

        build_deposit(
            &mut tx,
            PACKAGE,
            &DepositParams {
                type_args: type_args(),
                owner_cap: CAP.into(),
                vault: VAULT.into(),
                coin: withdrawn.into(),
            },
        )
        .unwrap();

        let withdraw = tx.commands()[0].as_move_call().unwrap();
        assert_eq!(tx.pure_input(withdraw.arguments[2]), Some(&500u64.to_le_bytes()[..]));

        let deposit = tx.commands()[1].as_move_call().unwrap();
        assert_eq!(deposit.function, "deposit");
        // Cap and vault inputs are shared, the coin is the withdraw result
        assert_eq!(deposit.arguments[0], withdraw.arguments[0]);
        assert_eq!(deposit.arguments[1], withdraw.arguments[1]);
        assert_eq!(deposit.arguments[2], Argument::Result(0));
        assert_eq!(tx.inputs().len(), 3);
    }

    #[test]
    fn test_withdraw_and_transfer_sends_reserve_coin() {
        let mut tx = ProgrammableTransaction::new();
        let params = WithdrawParams {
            type_args: type_args(),
            owner_cap: CAP.into(),
            vault: VAULT.into(),
            amount: "18446744073709551615".into(),
        };
        build_withdraw_and_transfer(&mut tx, PACKAGE, &params, RECIPIENT).unwrap();

        let withdraw = tx.commands()[0].as_move_call().unwrap();
        assert_eq!(withdraw.function, "withdraw");
        assert_eq!(tx.pure_input(withdraw.arguments[2]), Some(&[0xFFu8; 8][..]));
        match &tx.commands()[1] {
            Command::TransferObjects { objects, address } => {
                assert_eq!(objects, &vec![Argument::Result(0)]);
                assert_eq!(tx.pure_input(*address).map(|b| b.len()), Some(32));
            }
            other => panic!("expected transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_withdraw_and_transfer_rejects_negative_amount() {
        let mut tx = ProgrammableTransaction::new();
        let params = WithdrawParams {
            type_args: type_args(),
            owner_cap: CAP.into(),
            vault: VAULT.into(),
            amount: (-1i64).into(),
        };
        assert!(build_withdraw_and_transfer(&mut tx, PACKAGE, &params, RECIPIENT).is_err());
        assert!(tx.is_empty());
    }

    #[test]
    fn test_update_rate() {
        let mut tx = ProgrammableTransaction::new();
        let mut params = UpdateRateParams {
            type_args: type_args(),
            owner_cap: CAP.into(),
            vault: VAULT.into(),
            new_rate: "0".into(),
        };
        let err = build_update_rate(&mut tx, PACKAGE, &params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert!(tx.is_empty());

        params.new_rate = "2500000000".into();
        build_update_rate(&mut tx, PACKAGE, &params).unwrap();
        let call = tx.commands()[0].as_move_call().unwrap();
        assert_eq!(call.function, "update_rate");
        assert_eq!(
            tx.pure_input(call.arguments[2]),
            Some(&2_500_000_000u64.to_le_bytes()[..])
        );
    }

    #[test]
    fn test_invalid_package_rejected() {
        let mut tx = ProgrammableTransaction::new();
        assert!(build_mint(&mut tx, "vault", &exchange(COIN.into())).is_err());
        assert!(tx.is_empty());
    }
}

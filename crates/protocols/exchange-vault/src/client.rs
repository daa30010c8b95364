//! Vault client
//!
//! Validates caller input and delegates to the call builder for mutating
//! operations, and reads vault state through a `ChainQuery` implementation.
//! Nothing is cached: every read goes to the chain.

use sui_rpc_client::{queries, ChainQuery, Coin, ObjectDataOptions};
use sui_tx::{Argument, ObjectHandle, ProgrammableTransaction};
use vault_core::{Error, Result};

use crate::calculator;
use crate::constants::{structs, vault_struct_type};
use crate::fetch;
use crate::state::{
    DepositParams, ExchangeParams, ExchangeQuote, NumericValue, QuoteDirection, UpdateRateParams,
    VaultConfig, VaultMetadata, VaultState, VaultTypeArgs, WithdrawParams,
};
use crate::tx_builder;
use crate::validate;

/// Entry point for one deployed vault package
#[derive(Debug, Clone)]
pub struct VaultClient<C> {
    chain: C,
    package_id: String,
}

impl<C: ChainQuery> VaultClient<C> {
    /// Create a client for `package_id`, normalizing it
    pub fn new(chain: C, package_id: &str) -> Result<Self> {
        let package_id = validate::validate_object_id(package_id)
            .map_err(|e| Error::invalid_parameters(format!("package: {}", e)))?;
        Ok(Self { chain, package_id })
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    // =========================================================================
    // Transaction building
    // =========================================================================

    pub fn create_vault(
        &self,
        tx: &mut ProgrammableTransaction,
        config: &VaultConfig,
        treasury: &ObjectHandle,
    ) -> Result<()> {
        tx_builder::build_create_vault(tx, &self.package_id, config, treasury)?;
        tracing::info!(symbol = %config.symbol, "Built create_vault");
        Ok(())
    }

    pub fn mint(&self, tx: &mut ProgrammableTransaction, params: &ExchangeParams) -> Result<Argument> {
        let coin = tx_builder::build_mint(tx, &self.package_id, params)?;
        tracing::info!(vault = ?params.vault, "Built mint");
        Ok(coin)
    }

    pub fn mint_and_transfer(
        &self,
        tx: &mut ProgrammableTransaction,
        params: &ExchangeParams,
        recipient: &str,
    ) -> Result<()> {
        tx_builder::build_mint_and_transfer(tx, &self.package_id, params, recipient)?;
        tracing::info!(vault = ?params.vault, recipient, "Built mint with transfer");
        Ok(())
    }

    pub fn redeem(
        &self,
        tx: &mut ProgrammableTransaction,
        params: &ExchangeParams,
    ) -> Result<Argument> {
        let coin = tx_builder::build_redeem(tx, &self.package_id, params)?;
        tracing::info!(vault = ?params.vault, "Built redeem");
        Ok(coin)
    }

    pub fn redeem_and_transfer(
        &self,
        tx: &mut ProgrammableTransaction,
        params: &ExchangeParams,
        recipient: &str,
    ) -> Result<()> {
        tx_builder::build_redeem_and_transfer(tx, &self.package_id, params, recipient)?;
        tracing::info!(vault = ?params.vault, recipient, "Built redeem with transfer");
        Ok(())
    }

    pub fn deposit(&self, tx: &mut ProgrammableTransaction, params: &DepositParams) -> Result<()> {
        tx_builder::build_deposit(tx, &self.package_id, params)?;
        tracing::info!(vault = ?params.vault, "Built deposit");
        Ok(())
    }

    pub fn withdraw(
        &self,
        tx: &mut ProgrammableTransaction,
        params: &WithdrawParams,
    ) -> Result<Argument> {
        let coin = tx_builder::build_withdraw(tx, &self.package_id, params)?;
        tracing::info!(vault = ?params.vault, amount = %params.amount, "Built withdraw");
        Ok(coin)
    }

    pub fn withdraw_and_transfer(
        &self,
        tx: &mut ProgrammableTransaction,
        params: &WithdrawParams,
        recipient: &str,
    ) -> Result<()> {
        tx_builder::build_withdraw_and_transfer(tx, &self.package_id, params, recipient)?;
        tracing::info!(vault = ?params.vault, amount = %params.amount, recipient, "Built withdraw with transfer");
        Ok(())
    }

    pub fn update_rate(
        &self,
        tx: &mut ProgrammableTransaction,
        params: &UpdateRateParams,
    ) -> Result<()> {
        tx_builder::build_update_rate(tx, &self.package_id, params)?;
        tracing::info!(vault = ?params.vault, new_rate = %params.new_rate, "Built update_rate");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch and parse a vault object
    pub async fn get_vault_state(&self, vault_id: &str) -> Result<VaultState> {
        let vault_id = validate::validate_object_id(vault_id)?;
        let data = self
            .chain
            .get_object(&vault_id, ObjectDataOptions::with_content())
            .await?;
        fetch::parse_vault_object(&data)
    }

    /// Fetch and parse a vault metadata object
    pub async fn get_vault_metadata(&self, metadata_id: &str) -> Result<VaultMetadata> {
        let metadata_id = validate::validate_object_id(metadata_id)?;
        let data = self
            .chain
            .get_object(&metadata_id, ObjectDataOptions::with_content())
            .await?;
        fetch::parse_metadata_object(&data)
    }

    /// Metadata object ID stored under the vault, if any
    pub async fn find_vault_metadata(&self, vault_id: &str) -> Result<Option<String>> {
        let vault_id = validate::validate_object_id(vault_id)?;
        let fields = queries::get_all_dynamic_fields(&self.chain, &vault_id).await?;
        Ok(fetch::find_metadata_field(&fields).map(|f| f.object_id.clone()))
    }

    /// Read a vault's `<Input, Output>` type arguments from its type string
    pub async fn infer_type_arguments(&self, vault_id: &str) -> Result<VaultTypeArgs> {
        let vault_id = validate::validate_object_id(vault_id)?;
        let data = self
            .chain
            .get_object(&vault_id, ObjectDataOptions::type_only())
            .await?;
        let type_str = data
            .move_type()
            .ok_or_else(|| Error::validation(format!("Object {} has no type", vault_id)))?;
        fetch::parse_vault_type(type_str)
    }

    /// Price `amount` against the vault's current rate.
    ///
    /// Mint converts input units to output units. Redeem converts output
    /// units back to input units and fails with `InsufficientReserves` when
    /// the vault cannot pay out.
    pub async fn get_quote(
        &self,
        vault_id: &str,
        amount: impl Into<NumericValue>,
        direction: QuoteDirection,
    ) -> Result<ExchangeQuote> {
        let amount = validate::validate_amount(amount)?;
        let state = self.get_vault_state(vault_id).await?;

        let output_amount = match direction {
            QuoteDirection::Mint => calculator::compute_output(state.rate, amount, state.rate_decimals)?,
            QuoteDirection::Redeem => {
                let payout = calculator::compute_input(state.rate, amount, state.rate_decimals)?;
                if payout > state.reserve {
                    return Err(Error::InsufficientReserves {
                        required: payout,
                        available: state.reserve,
                    });
                }
                payout
            }
        };

        Ok(ExchangeQuote {
            direction,
            input_amount: amount,
            output_amount,
            rate: state.rate,
            rate_decimals: state.rate_decimals,
            price_impact: None,
        })
    }

    /// Total balance, or 0 when the lookup fails
    pub async fn get_balance(&self, owner: &str, coin_type: &str) -> u64 {
        let result = async {
            let owner = validate::validate_address(owner)?;
            let balance = self.chain.get_balance(&owner, coin_type).await?;
            Ok::<_, Error>(balance.total()?)
        }
        .await;

        match result {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(owner, coin_type, error = %e, "Balance lookup failed, reporting 0");
                0
            }
        }
    }

    /// Require `owner` to hold at least `required` of `coin_type`
    pub async fn ensure_balance(&self, owner: &str, coin_type: &str, required: u64) -> Result<()> {
        let available = self.total_coin_balance(owner, coin_type).await?;
        if available < required {
            return Err(Error::InsufficientBalance {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Every coin of `coin_type` owned by `owner`, across all pages
    pub async fn get_coins(&self, owner: &str, coin_type: &str) -> Result<Vec<Coin>> {
        let owner = validate::validate_address(owner)?;
        validate::validate_coin_type(coin_type)?;
        Ok(queries::get_all_coins(&self.chain, &owner, coin_type).await?)
    }

    /// Sum of coin object balances
    pub async fn total_coin_balance(&self, owner: &str, coin_type: &str) -> Result<u64> {
        let owner = validate::validate_address(owner)?;
        validate::validate_coin_type(coin_type)?;
        Ok(queries::total_coin_balance(&self.chain, &owner, coin_type).await?)
    }

    /// Owner capability held by `owner`, optionally bound to `vault_id`
    pub async fn find_owner_cap(&self, owner: &str, vault_id: Option<&str>) -> Result<Option<String>> {
        let owner = validate::validate_address(owner)?;
        let vault_id = vault_id.map(validate::validate_object_id).transpose()?;
        let cap_type = vault_struct_type(&self.package_id, structs::OWNER_CAP);

        let caps = queries::list_owned_objects(&self.chain, &owner, &cap_type).await?;
        let found = caps.into_iter().find(|cap| match &vault_id {
            None => true,
            Some(wanted) => fetch::owner_cap_vault_id(cap)
                .and_then(|id| validate::normalize_address(&id).ok())
                .is_some_and(|id| &id == wanted),
        });
        Ok(found.map(|cap| cap.object_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use serde_json::{json, Value};
    use sui_rpc_client::{
        Balance, CoinPage, DynamicFieldInfo, DynamicFieldPage, ObjectFilter, ObjectPage,
        OwnedObjectsQuery, Page, SuiObjectData, SuiObjectResponse,
    };
    use vault_core::{ErrorKind, RpcError};

    const PACKAGE: &str = "0xbeef";

    fn id(short: &str) -> String {
        validate::normalize_address(short).unwrap()
    }

    fn object(object_id: &str, object_type: &str, fields: Value) -> SuiObjectData {
        SuiObjectData {
            object_id: object_id.to_string(),
            version: "1".into(),
            digest: "d".into(),
            object_type: Some(object_type.to_string()),
            owner: None,
            content: Some(json!({"dataType": "moveObject", "type": object_type, "fields": fields})),
        }
    }

    /// In-memory chain keyed by normalized IDs
    #[derive(Debug, Default)]
    struct MockChain {
        objects: HashMap<String, SuiObjectData>,
        owned: HashMap<String, Vec<SuiObjectData>>,
        coins: HashMap<String, Vec<Coin>>,
        dynamic_fields: HashMap<String, Vec<DynamicFieldInfo>>,
        balance_error: Option<RpcError>,
    }

    impl MockChain {
        fn with_vault(reserve: u64) -> Self {
            let vault_type = format!("{}::vault::Vault<0x2::sui::SUI, 0xabc::vlt::VLT>", id(PACKAGE));
            let mut chain = Self::default();
            chain.objects.insert(
                id("0xa1"),
                object(
                    &id("0xa1"),
                    &vault_type,
                    json!({"rate": "2000000000", "rate_decimals": 9, "reserve": reserve.to_string()}),
                ),
            );
            chain
        }
    }

    impl ChainQuery for MockChain {
        async fn get_object(
            &self,
            object_id: &str,
            _options: ObjectDataOptions,
        ) -> sui_rpc_client::Result<SuiObjectData> {
            self.objects
                .get(object_id)
                .cloned()
                .ok_or_else(|| RpcError::ObjectNotFound {
                    object_id: object_id.to_string(),
                })
        }

        async fn get_balance(&self, _owner: &str, coin_type: &str) -> sui_rpc_client::Result<Balance> {
            if let Some(err) = &self.balance_error {
                return Err(err.clone());
            }
            Ok(Balance {
                coin_type: coin_type.to_string(),
                coin_object_count: 1,
                total_balance: "1234".into(),
            })
        }

        async fn get_coins(
            &self,
            owner: &str,
            _coin_type: &str,
            _cursor: Option<String>,
            _limit: Option<u32>,
        ) -> sui_rpc_client::Result<CoinPage> {
            Ok(Page {
                data: self.coins.get(owner).cloned().unwrap_or_default(),
                next_cursor: None,
                has_next_page: false,
            })
        }

        async fn get_owned_objects(
            &self,
            owner: &str,
            query: OwnedObjectsQuery,
            _cursor: Option<String>,
            _limit: Option<u32>,
        ) -> sui_rpc_client::Result<ObjectPage> {
            let wanted = match query.filter {
                Some(ObjectFilter::StructType(t)) => Some(t),
                _ => None,
            };
            let data = self
                .owned
                .get(owner)
                .into_iter()
                .flatten()
                .filter(|o| wanted.is_none() || o.object_type == wanted)
                .map(|o| SuiObjectResponse {
                    data: Some(o.clone()),
                    error: None,
                })
                .collect();
            Ok(Page {
                data,
                next_cursor: None,
                has_next_page: false,
            })
        }

        async fn get_dynamic_fields(
            &self,
            parent_id: &str,
            _cursor: Option<String>,
            _limit: Option<u32>,
        ) -> sui_rpc_client::Result<DynamicFieldPage> {
            Ok(Page {
                data: self.dynamic_fields.get(parent_id).cloned().unwrap_or_default(),
                next_cursor: None,
                has_next_page: false,
            })
        }
    }

    fn coin(object_id: &str, balance: u64) -> Coin {
        Coin {
            coin_type: "0x2::sui::SUI".into(),
            coin_object_id: object_id.into(),
            version: "1".into(),
            digest: "d".into(),
            balance: balance.to_string(),
        }
    }

    #[test]
    fn test_new_normalizes_package() {
        let client = VaultClient::new(MockChain::default(), PACKAGE).unwrap();
        assert_eq!(client.package_id(), id(PACKAGE));

        let err = VaultClient::new(MockChain::default(), "beef").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn test_mint_and_transfer_rejects_amount_coin() {
        let client = VaultClient::new(MockChain::default(), PACKAGE).unwrap();
        let mut tx = ProgrammableTransaction::new();
        let params = ExchangeParams {
            type_args: VaultTypeArgs::new("0x2::sui::SUI", "0xabc::vlt::VLT"),
            vault: "0xa1".into(),
            metadata: "0xa2".into(),
            coin: "1000000000".into(),
        };
        let err = client.mint_and_transfer(&mut tx, &params, "0x5").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert!(tx.is_empty());
    }

    #[test]
    fn test_mint_targets_client_package() {
        let client = VaultClient::new(MockChain::default(), PACKAGE).unwrap();
        let mut tx = ProgrammableTransaction::new();
        let params = ExchangeParams {
            type_args: VaultTypeArgs::new("0x2::sui::SUI", "0xabc::vlt::VLT"),
            vault: "0xa1".into(),
            metadata: "0xa2".into(),
            coin: Argument::GasCoin.into(),
        };
        client.mint(&mut tx, &params).unwrap();
        let call = tx.move_calls().next().unwrap();
        assert_eq!(call.package, id(PACKAGE));
        assert_eq!(call.arguments[2], Argument::GasCoin);
    }

    #[test]
    fn test_owner_operations_target_client_package() {
        let client = VaultClient::new(MockChain::default(), PACKAGE).unwrap();
        let type_args = VaultTypeArgs::new("0x2::sui::SUI", "0xabc::vlt::VLT");
        let mut tx = ProgrammableTransaction::new();

        let config = VaultConfig {
            rate: "2000000000".into(),
            rate_decimals: 9,
            symbol: "VLT".into(),
            name: "Vault Token".into(),
            description: "Minted at a fixed rate".into(),
            icon_url: None,
            input_type: "0x2::sui::SUI".into(),
            output_type: "0xabc::vlt::VLT".into(),
        };
        client
            .create_vault(&mut tx, &config, &ObjectHandle::from("0x7e"))
            .unwrap();
        client
            .deposit(
                &mut tx,
                &DepositParams {
                    type_args: type_args.clone(),
                    owner_cap: "0xca".into(),
                    vault: "0xa1".into(),
                    coin: Argument::GasCoin.into(),
                },
            )
            .unwrap();
        client
            .update_rate(
                &mut tx,
                &UpdateRateParams {
                    type_args,
                    owner_cap: "0xca".into(),
                    vault: "0xa1".into(),
                    new_rate: 3_000_000_000u64.into(),
                },
            )
            .unwrap();

        let targets: Vec<String> = tx.move_calls().map(|c| c.target()).collect();
        assert_eq!(
            targets,
            vec![
                "0x1::option::none".to_string(),
                format!("{}::vault::create_vault", id(PACKAGE)),
                format!("{}::vault::deposit", id(PACKAGE)),
                format!("{}::vault::update_rate", id(PACKAGE)),
            ]
        );
    }

    #[test]
    fn test_owner_operation_errors_append_nothing() {
        let client = VaultClient::new(MockChain::default(), PACKAGE).unwrap();
        let mut tx = ProgrammableTransaction::new();
        let err = client
            .update_rate(
                &mut tx,
                &UpdateRateParams {
                    type_args: VaultTypeArgs::new("0x2::sui::SUI", "0xabc::vlt::VLT"),
                    owner_cap: "cap".into(),
                    vault: "0xa1".into(),
                    new_rate: 1u64.into(),
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert!(tx.is_empty());
    }

    #[tokio::test]
    async fn test_get_vault_state_and_type_args() {
        let client = VaultClient::new(MockChain::with_vault(10), PACKAGE).unwrap();

        let state = client.get_vault_state("0xa1").await.unwrap();
        assert_eq!(state.rate, 2_000_000_000);
        assert_eq!(state.reserve, 10);

        let args = client.infer_type_arguments("0xa1").await.unwrap();
        assert_eq!(args.input_type, "0x2::sui::SUI");
        assert_eq!(args.output_type, "0xabc::vlt::VLT");
    }

    #[tokio::test]
    async fn test_missing_vault_is_invalid_parameters() {
        let client = VaultClient::new(MockChain::default(), PACKAGE).unwrap();
        let err = client.get_vault_state("0xdead").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[tokio::test]
    async fn test_quotes() {
        let client = VaultClient::new(MockChain::with_vault(3_000_000_000), PACKAGE).unwrap();

        let mint = client
            .get_quote("0xa1", "1000000000", QuoteDirection::Mint)
            .await
            .unwrap();
        assert_eq!(mint.output_amount, 2_000_000_000);
        assert_eq!(mint.price_impact, None);

        let redeem = client
            .get_quote("0xa1", 4_000_000_000u64, QuoteDirection::Redeem)
            .await
            .unwrap();
        assert_eq!(redeem.output_amount, 2_000_000_000);

        let err = client
            .get_quote("0xa1", 8_000_000_000u64, QuoteDirection::Redeem)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientReserves);
    }

    #[tokio::test]
    async fn test_balance_degrades_to_zero() {
        let mut chain = MockChain::default();
        assert_eq!(
            VaultClient::new(MockChain::default(), PACKAGE)
                .unwrap()
                .get_balance("0x5", "0x2::sui::SUI")
                .await,
            1234
        );

        chain.balance_error = Some(RpcError::Timeout { timeout_secs: 30 });
        let client = VaultClient::new(chain, PACKAGE).unwrap();
        assert_eq!(client.get_balance("0x5", "0x2::sui::SUI").await, 0);
        assert_eq!(client.get_balance("not-an-address", "0x2::sui::SUI").await, 0);
    }

    #[tokio::test]
    async fn test_coins_and_ensure_balance() {
        let mut chain = MockChain::default();
        chain
            .coins
            .insert(id("0x5"), vec![coin("0xc1", 40), coin("0xc2", 2)]);
        let client = VaultClient::new(chain, PACKAGE).unwrap();

        assert_eq!(client.get_coins("0x5", "0x2::sui::SUI").await.unwrap().len(), 2);
        assert_eq!(client.total_coin_balance("0x5", "0x2::sui::SUI").await.unwrap(), 42);
        assert!(client.ensure_balance("0x5", "0x2::sui::SUI", 42).await.is_ok());

        let err = client
            .ensure_balance("0x5", "0x2::sui::SUI", 43)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
    }

    #[tokio::test]
    async fn test_find_owner_cap_by_vault() {
        let cap_type = format!("{}::vault::OwnerCap", id(PACKAGE));
        let mut chain = MockChain::default();
        chain.owned.insert(
            id("0x5"),
            vec![
                object("0xcap1", &cap_type, json!({"vault_id": "0xb2"})),
                object("0xcap2", &cap_type, json!({"vault_id": id("0xa1")})),
            ],
        );
        let client = VaultClient::new(chain, PACKAGE).unwrap();

        let cap = client.find_owner_cap("0x5", Some("0xa1")).await.unwrap();
        assert_eq!(cap.as_deref(), Some("0xcap2"));

        let any = client.find_owner_cap("0x5", None).await.unwrap();
        assert_eq!(any.as_deref(), Some("0xcap1"));

        let none = client.find_owner_cap("0x5", Some("0xff")).await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_find_vault_metadata_and_read_it() {
        let mut chain = MockChain::with_vault(0);
        chain.dynamic_fields.insert(
            id("0xa1"),
            vec![DynamicFieldInfo {
                name: json!({"type": "vector<u8>", "value": "metadata"}),
                field_type: "DynamicObject".into(),
                object_type: format!("{}::vault::VaultMetadata", id(PACKAGE)),
                object_id: id("0xa2"),
                version: None,
                digest: None,
            }],
        );
        chain.objects.insert(
            id("0xa2"),
            object(
                &id("0xa2"),
                "0xbeef::vault::VaultMetadata",
                json!({"name": "Vault Token", "symbol": "VLT", "description": "Fixed", "icon_url": null}),
            ),
        );
        let client = VaultClient::new(chain, PACKAGE).unwrap();

        let metadata_id = client.find_vault_metadata("0xa1").await.unwrap().unwrap();
        let metadata = client.get_vault_metadata(&metadata_id).await.unwrap();
        assert_eq!(metadata.symbol, "VLT");
        assert!(metadata.icon_url.is_none());
    }
}

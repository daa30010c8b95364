//! JSON-RPC request and response types
//!
//! Mirrors the subset of the fullnode JSON-RPC schema used by the vault client.
//! Large integers arrive as decimal strings and are parsed on access.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vault_core::RpcError;

/// Which parts of an object to return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    pub show_type: bool,
    pub show_owner: bool,
    pub show_content: bool,
}

impl ObjectDataOptions {
    /// Type and Move content
    pub fn with_content() -> Self {
        Self {
            show_type: true,
            show_owner: false,
            show_content: true,
        }
    }

    /// Type string only
    pub fn type_only() -> Self {
        Self {
            show_type: true,
            ..Self::default()
        }
    }
}

/// Object data returned by `sui_getObject` and owned-object listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectData {
    pub object_id: String,
    pub version: String,
    pub digest: String,
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
}

impl SuiObjectData {
    /// Move struct type, from the type projection or the content
    pub fn move_type(&self) -> Option<&str> {
        self.object_type
            .as_deref()
            .or_else(|| self.content.as_ref()?.get("type")?.as_str())
    }

    /// Move struct fields, when content was requested
    pub fn fields(&self) -> Option<&serde_json::Map<String, Value>> {
        self.content.as_ref()?.get("fields")?.as_object()
    }
}

/// Envelope around object data; exactly one of `data` and `error` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiObjectResponse {
    #[serde(default)]
    pub data: Option<SuiObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl SuiObjectResponse {
    /// Unwrap the object data, reporting a missing object as `ObjectNotFound`
    pub fn into_data(self, object_id: &str) -> Result<SuiObjectData, RpcError> {
        match self.data {
            Some(data) => Ok(data),
            None => match self.error {
                Some(err) if err.get("code").and_then(Value::as_str) == Some("notExists") => {
                    Err(RpcError::ObjectNotFound {
                        object_id: object_id.to_string(),
                    })
                }
                Some(err) => Err(RpcError::Rpc {
                    code: 0,
                    message: err.to_string(),
                }),
                None => Err(RpcError::ObjectNotFound {
                    object_id: object_id.to_string(),
                }),
            },
        }
    }
}

/// Aggregate balance of one coin type for an owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin_type: String,
    pub coin_object_count: u64,
    pub total_balance: String,
}

impl Balance {
    pub fn total(&self) -> Result<u64, RpcError> {
        parse_u64_string(&self.total_balance)
    }
}

/// A single coin object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_type: String,
    pub coin_object_id: String,
    pub version: String,
    pub digest: String,
    pub balance: String,
}

impl Coin {
    pub fn amount(&self) -> Result<u64, RpcError> {
        parse_u64_string(&self.balance)
    }
}

/// Dynamic field entry of a parent object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldInfo {
    pub name: Value,
    #[serde(rename = "type")]
    pub field_type: String,
    pub object_type: String,
    pub object_id: String,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub digest: Option<String>,
}

/// Cursor-paginated result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

pub type CoinPage = Page<Coin>;
pub type ObjectPage = Page<SuiObjectResponse>;
pub type DynamicFieldPage = Page<DynamicFieldInfo>;

/// Filter for owned-object listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectFilter {
    /// Fully qualified struct type, e.g. `0xpkg::vault::OwnerCap`
    StructType(String),
}

/// Query for `suix_getOwnedObjects`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedObjectsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ObjectFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ObjectDataOptions>,
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T, RpcError> {
        if let Some(err) = self.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result
            .ok_or_else(|| RpcError::Parse("response has neither result nor error".to_string()))
    }
}

/// Parse a decimal u64 that the RPC encodes as a JSON string
pub fn parse_u64_string(raw: &str) -> Result<u64, RpcError> {
    raw.parse()
        .map_err(|_| RpcError::Parse(format!("'{}' is not a u64", raw)))
}

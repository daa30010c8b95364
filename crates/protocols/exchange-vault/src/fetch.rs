//! Vault Object Parsing
//!
//! Turns fullnode object responses into vault state, metadata, and type
//! arguments. Pure functions; the client does the fetching.

use serde_json::{Map, Value};
use sui_rpc_client::{DynamicFieldInfo, SuiObjectData};
use vault_core::{Error, Result};

use crate::constants::{fields, structs, VAULT_MODULE};
use crate::state::{VaultMetadata, VaultState, VaultTypeArgs};

/// Split a struct type into its base and top-level type arguments
///
/// `0xp::vault::Vault<0x2::sui::SUI, 0xa::m::Coin<0xb::c::C>>` yields
/// `0xp::vault::Vault` and the two arguments, nested generics intact.
pub fn split_type(type_str: &str) -> Result<(&str, Vec<String>)> {
    let type_str = type_str.trim();
    let Some(open) = type_str.find('<') else {
        return Ok((type_str, Vec::new()));
    };
    let inner = type_str[open + 1..]
        .strip_suffix('>')
        .ok_or_else(|| Error::invalid_parameters(format!("Malformed type '{}'", type_str)))?;

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::invalid_parameters(format!("Unbalanced type '{}'", type_str))
                })?
            }
            ',' if depth == 0 => {
                args.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::invalid_parameters(format!(
            "Unbalanced type '{}'",
            type_str
        )));
    }
    args.push(inner[start..].trim().to_string());

    if args.iter().any(String::is_empty) {
        return Err(Error::invalid_parameters(format!(
            "Empty type argument in '{}'",
            type_str
        )));
    }
    Ok((&type_str[..open], args))
}

/// Read `Vault<Input, Output>` type arguments from a vault type string
pub fn parse_vault_type(type_str: &str) -> Result<VaultTypeArgs> {
    let (base, args) = split_type(type_str)?;
    let suffix = format!("::{}::{}", VAULT_MODULE, structs::VAULT);
    if !base.ends_with(&suffix) {
        return Err(Error::invalid_parameters(format!(
            "'{}' is not a vault type",
            type_str
        )));
    }
    match <[String; 2]>::try_from(args) {
        Ok([input_type, output_type]) => Ok(VaultTypeArgs {
            input_type,
            output_type,
        }),
        Err(args) => Err(Error::invalid_parameters(format!(
            "Vault type '{}' has {} type arguments, expected 2",
            type_str,
            args.len()
        ))),
    }
}

fn object_fields<'a>(data: &'a SuiObjectData) -> Result<&'a Map<String, Value>> {
    data.fields().ok_or_else(|| {
        Error::validation(format!("Object {} has no Move content", data.object_id))
    })
}

fn layout_error(object_id: &str, field: &str) -> Error {
    Error::validation(format!(
        "Object {} has a missing or malformed '{}' field",
        object_id, field
    ))
}

/// Numeric Move field: u64 arrives as a string, u8 as a number, and
/// `Balance<T>` either as a string or as `{ fields: { value } }`.
fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        Value::Object(_) => value_as_u64(value.get("fields")?.get("value")?),
        _ => None,
    }
}

/// Move `String`, or `vector<u8>` rendered as a byte array
fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let bytes: Option<Vec<u8>> = items
                .iter()
                .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect();
            String::from_utf8(bytes?).ok()
        }
        _ => None,
    }
}

/// `Option<Url>`: null, a bare string, a `Url { url }` struct, or the older
/// `{ vec: [..] }` option encoding
fn value_as_optional_url(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            if let Some(url) = map.get("url") {
                return value_as_string(url);
            }
            if let Some(vec) = map.get("vec").and_then(Value::as_array) {
                return vec.first().and_then(value_as_optional_url);
            }
            map.get("fields").and_then(value_as_optional_url)
        }
        _ => None,
    }
}

fn read_u64(fields_map: &Map<String, Value>, object_id: &str, field: &str) -> Result<u64> {
    fields_map
        .get(field)
        .and_then(value_as_u64)
        .ok_or_else(|| layout_error(object_id, field))
}

fn read_string(fields_map: &Map<String, Value>, object_id: &str, field: &str) -> Result<String> {
    fields_map
        .get(field)
        .and_then(value_as_string)
        .ok_or_else(|| layout_error(object_id, field))
}

/// Parse a vault object fetched with type and content
pub fn parse_vault_object(data: &SuiObjectData) -> Result<VaultState> {
    let type_str = data
        .move_type()
        .ok_or_else(|| Error::validation(format!("Object {} has no type", data.object_id)))?;
    let type_args = parse_vault_type(type_str)?;
    let fields_map = object_fields(data)?;

    let rate = read_u64(fields_map, &data.object_id, fields::RATE)?;
    let rate_decimals = read_u64(fields_map, &data.object_id, fields::RATE_DECIMALS)?;
    let rate_decimals =
        u8::try_from(rate_decimals).map_err(|_| layout_error(&data.object_id, fields::RATE_DECIMALS))?;
    let reserve = read_u64(fields_map, &data.object_id, fields::RESERVE)?;

    Ok(VaultState {
        vault_id: data.object_id.clone(),
        input_type: type_args.input_type,
        output_type: type_args.output_type,
        rate,
        rate_decimals,
        reserve,
    })
}

/// Parse a vault metadata object fetched with content
pub fn parse_metadata_object(data: &SuiObjectData) -> Result<VaultMetadata> {
    let fields_map = object_fields(data)?;
    let id = &data.object_id;

    Ok(VaultMetadata {
        metadata_id: id.clone(),
        name: read_string(fields_map, id, fields::NAME)?,
        symbol: read_string(fields_map, id, fields::SYMBOL)?,
        description: read_string(fields_map, id, fields::DESCRIPTION)?,
        icon_url: fields_map.get(fields::ICON_URL).and_then(value_as_optional_url),
    })
}

/// Vault an owner capability is bound to, if the cap records it
pub fn owner_cap_vault_id(data: &SuiObjectData) -> Option<String> {
    let value = data.fields()?.get(fields::VAULT_ID)?;
    match value {
        Value::String(s) => Some(s.clone()),
        // UID / ID rendered as { id: "0x.." }
        Value::Object(map) => map.get("id").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Metadata object among a vault's dynamic fields
pub fn find_metadata_field(fields_list: &[DynamicFieldInfo]) -> Option<&DynamicFieldInfo> {
    let suffix = format!("::{}::{}", VAULT_MODULE, structs::METADATA);
    fields_list.iter().find(|f| {
        split_type(&f.object_type)
            .map(|(base, _)| base.ends_with(&suffix))
            .unwrap_or(false)
    })
}

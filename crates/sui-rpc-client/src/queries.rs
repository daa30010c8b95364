//! Pagination helpers over `ChainQuery`


use crate::{
    ChainQuery, Coin, DynamicFieldInfo, ObjectDataOptions, ObjectFilter, OwnedObjectsQuery,
    Result, SuiObjectData,
};

/// Page size requested from the node
pub const PAGE_LIMIT: u32 = 50;

/// Upper bound on pages followed by a single helper call
pub const MAX_PAGES: usize = 100;

/// Collect every coin of `coin_type` owned by `owner`
pub async fn get_all_coins<C: ChainQuery>(
    client: &C,
    owner: &str,
    coin_type: &str,
) -> Result<Vec<Coin>> {
    let mut coins = Vec::new();
    let mut cursor = None;

    for _ in 0..MAX_PAGES {
        let page = client
            .get_coins(owner, coin_type, cursor, Some(PAGE_LIMIT))
            .await?;
        coins.extend(page.data);
        if !page.has_next_page || page.next_cursor.is_none() {
            return Ok(coins);
        }
        cursor = page.next_cursor;
    }

    tracing::warn!(owner, coin_type, pages = MAX_PAGES, "Coin listing truncated");
    Ok(coins)
}

/// Sum of all coin balances, computed from individual coin objects
pub async fn total_coin_balance<C: ChainQuery>(
    client: &C,
    owner: &str,
    coin_type: &str,
) -> vault_core::Result<u64> {
    let coins = get_all_coins(client, owner, coin_type).await?;
    coins.iter().try_fold(0u64, |acc, coin| {
        acc.checked_add(coin.amount()?).ok_or_else(|| {
            vault_core::Error::overflow(format!(
                "Sum of {} coins owned by {} exceeds u64",
                coin_type, owner
            ))
        })
    })
}

/// Every object of `struct_type` owned by `owner`, with content
pub async fn list_owned_objects<C: ChainQuery>(
    client: &C,
    owner: &str,
    struct_type: &str,
) -> Result<Vec<SuiObjectData>> {
    let mut objects = Vec::new();
    let mut cursor = None;

    for _ in 0..MAX_PAGES {
        let query = OwnedObjectsQuery {
            filter: Some(ObjectFilter::StructType(struct_type.to_string())),
            options: Some(ObjectDataOptions::with_content()),
        };
        let page = client
            .get_owned_objects(owner, query, cursor, Some(PAGE_LIMIT))
            .await?;

        objects.extend(page.data.into_iter().filter_map(|r| r.data));
        if !page.has_next_page || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
    }

    Ok(objects)
}

/// Collect every dynamic field of `parent_id`
pub async fn get_all_dynamic_fields<C: ChainQuery>(
    client: &C,
    parent_id: &str,
) -> Result<Vec<DynamicFieldInfo>> {
    let mut fields = Vec::new();
    let mut cursor = None;

    for _ in 0..MAX_PAGES {
        let page = client
            .get_dynamic_fields(parent_id, cursor, Some(PAGE_LIMIT))
            .await?;
        fields.extend(page.data);
        if !page.has_next_page || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
    }

    Ok(fields)
}

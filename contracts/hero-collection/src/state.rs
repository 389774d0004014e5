use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<CollectionConfig> = Item::new("config");
pub const TOKENS: Map<u64, TokenInfo> = Map::new("tokens");
pub const BALANCES: Map<(&Addr, u64), Uint128> = Map::new("balances");
/// (owner, operator) pairs where the operator may burn on the owner's behalf
pub const APPROVALS: Map<(&Addr, &Addr), ()> = Map::new("approvals");
/// (capability key, holder)
pub const ROLES: Map<(&str, &Addr), ()> = Map::new("roles");

#[cw_serde]
pub struct CollectionConfig {
    pub admin: Addr,
    /// Metadata base URI, `{uri}{id}` resolves an item
    pub uri: String,
}

#[cw_serde]
pub struct TokenInfo {
    pub id: u64,
    /// Zero means uncapped
    pub max_supply: Uint128,
    pub total_supply: Uint128,
}

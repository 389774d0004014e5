use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<ClaimConfig> = Item::new("config");
pub const CLAIMS: Map<&Addr, ClaimRecord> = Map::new("claims");
pub const TOTAL_CLAIMED: Item<u64> = Item::new("total_claimed");

#[cw_serde]
pub struct ClaimConfig {
    pub admin: Addr,
    pub collection: Addr,
    /// Token minted once to every claimant
    pub reward_item_id: u64,
    /// Inclusive bounds
    pub claim_start: Timestamp,
    pub claim_end: Timestamp,
}

#[cw_serde]
pub struct ClaimRecord {
    pub claimed: bool,
    pub claimed_at: Timestamp,
}

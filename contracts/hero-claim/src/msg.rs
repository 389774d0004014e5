use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Timestamp, Uint128};

use crate::state::{ClaimConfig, ClaimRecord};

#[cw_serde]
pub struct InstantiateMsg {
    pub collection: String,
    pub reward_item_id: u64,
    pub claim_start: Timestamp,
    pub claim_end: Timestamp,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint the reward item to the sender, once per address, inside the window.
    Claim {},
    /// Replace the claim window. Admin only. Existing claims are kept.
    SetWindow { start: Timestamp, end: Timestamp },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        collection: Option<String>,
        reward_item_id: Option<u64>,
    },
}

/// Subset of the collection's execute messages used for rewards.
#[cw_serde]
pub enum CollectionExecuteMsg {
    Mint {
        to: String,
        id: u64,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ClaimConfig)]
    Config {},
    #[returns(Option<ClaimRecord>)]
    ClaimRecord { address: String },
    #[returns(bool)]
    HasClaimed { address: String },
    #[returns(WindowStatusResponse)]
    WindowStatus {},
    #[returns(ClaimStatsResponse)]
    ClaimStats {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct WindowStatusResponse {
    pub start: Timestamp,
    pub end: Timestamp,
    pub is_open: bool,
}

#[cw_serde]
pub struct ClaimStatsResponse {
    pub total_claimed: u64,
}

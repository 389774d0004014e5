use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Uint128, Uint256};
use kombat_common::{ProbabilityTable, Tier};

use crate::state::{MixRequest, MixStateInfo, MixerConfig};

#[cw_serde]
pub struct InstantiateMsg {
    pub collection: String,
    pub randomness: RandomnessSourceMsg,
}

#[cw_serde]
pub enum RandomnessSourceMsg {
    Immediate {},
    Oracle {
        coordinator: String,
        key_hash: String,
        fee: Option<Coin>,
    },
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Replace the item pool of a tier. Admin only.
    SetEditionMapping { tier: Tier, item_ids: Vec<u64> },
    /// Set the output distribution for an input tier. Admin only.
    /// `chances` are per mille and must sum to 1000.
    SetProbabilityTable {
        input_tier: Tier,
        output_tiers: Vec<Tier>,
        chances: Vec<u16>,
    },
    /// Burn exactly three same-tier items for one drawn item.
    /// The mixer must be an approved operator of the sender on the collection.
    Mix { item_ids: Vec<u64> },
    /// Oracle callback completing a pending mix. Coordinator only.
    FulfillRandomness {
        request_id: String,
        randomness: Uint256,
    },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        collection: Option<String>,
        randomness: Option<RandomnessSourceMsg>,
    },
}

/// Subset of the collection's execute messages used by the mixer.
#[cw_serde]
pub enum CollectionExecuteMsg {
    Mint {
        to: String,
        id: u64,
        amount: Uint128,
    },
    Burn {
        from: String,
        id: u64,
        amount: Uint128,
    },
}

/// Subset of the collection's queries used by the mixer.
#[cw_serde]
pub enum CollectionQueryMsg {
    BalanceOf { owner: String, id: u64 },
    IsApprovedForAll { owner: String, operator: String },
}

/// Message sent to the randomness coordinator for each oracle-backed mix.
#[cw_serde]
pub enum CoordinatorExecuteMsg {
    RequestRandomness {
        key_hash: String,
        seed: Uint256,
        request_id: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(MixerConfig)]
    Config {},
    #[returns(MixStateInfo)]
    MixState {},
    #[returns(Vec<u64>)]
    EditionMapping { tier: Tier },
    #[returns(Option<ProbabilityTable>)]
    ProbabilityTable { tier: Tier },
    #[returns(Option<Tier>)]
    ItemTier { item_id: u64 },
    #[returns(Option<MixRequest>)]
    MixRequest { request_id: String },
    #[returns(MixRequestsResponse)]
    MixRequests {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(MixRequestsResponse)]
    UserMixRequests {
        address: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Preview the outcome a given random value would produce for an input
    /// tier under the current configuration.
    #[returns(SimulateDrawResponse)]
    SimulateDraw {
        input_tier: Tier,
        randomness: Uint256,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct MixRequestsResponse {
    pub requests: Vec<MixRequest>,
}

#[cw_serde]
pub struct SimulateDrawResponse {
    pub roll: u64,
    pub output_tier: Tier,
    pub output_item_id: u64,
}

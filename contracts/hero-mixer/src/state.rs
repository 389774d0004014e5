use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Timestamp, Uint128, Uint256};
use cw_storage_plus::{Item, Map};
use kombat_common::{MixRequestStatus, ProbabilityTable, Tier};

pub const CONFIG: Item<MixerConfig> = Item::new("config");
pub const MIX_STATE: Item<MixStateInfo> = Item::new("mix_state");

/// Tier key → ordered pool of item ids
pub const EDITIONS: Map<&str, Vec<u64>> = Map::new("editions");
/// Reverse index of `EDITIONS`: item id → tier
pub const ITEM_TIERS: Map<u64, Tier> = Map::new("item_tiers");
/// Input tier key → probability table
pub const PROBABILITY_TABLES: Map<&str, ProbabilityTable> = Map::new("probability_tables");

/// Oracle-backed requests by request id. Entries are never removed so a
/// fulfilled id can always be recognised as a replay.
pub const MIX_REQUESTS: Map<&str, MixRequest> = Map::new("mix_requests");
/// Per-user request index
pub const USER_REQUESTS: Map<(&Addr, &str), ()> = Map::new("user_requests");

#[cw_serde]
pub struct MixerConfig {
    pub admin: Addr,
    /// Item ledger the mixer burns from and mints on
    pub collection: Addr,
    pub randomness: RandomnessSource,
}

/// Where a mix gets its random value from.
#[cw_serde]
pub enum RandomnessSource {
    /// Derived from block and caller context; the mix completes in one call.
    Immediate,
    /// Requested from an oracle coordinator; the mix completes when the
    /// coordinator calls back with `FulfillRandomness`.
    Oracle {
        coordinator: Addr,
        key_hash: String,
        /// Paid to the coordinator per request, from the mixer's balance
        fee: Option<Coin>,
    },
}

#[cw_serde]
pub struct MixStateInfo {
    pub request_nonce: u64,
    pub total_mixes_requested: u64,
    pub total_mixes_completed: u64,
    pub total_items_burned: Uint128,
}

#[cw_serde]
pub struct MixRequest {
    pub request_id: String,
    pub requester: Addr,
    pub input_tier: Tier,
    pub input_item_ids: Vec<u64>,
    pub seed: Uint256,
    /// Table in force when the request was created; fulfillment draws from it
    pub table: ProbabilityTable,
    pub status: MixRequestStatus,
    pub created_at: Timestamp,
    pub fulfilled_at: Option<Timestamp>,
    pub randomness: Option<Uint256>,
    pub output_tier: Option<Tier>,
    pub output_item_id: Option<u64>,
}

/// Mirrors `BalanceResponse` from the collection contract.
#[cw_serde]
pub struct CollectionBalanceResponse {
    pub balance: Uint128,
}

/// Mirrors `ApprovalResponse` from the collection contract.
#[cw_serde]
pub struct CollectionApprovalResponse {
    pub approved: bool,
}

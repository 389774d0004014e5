use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use kombat_common::Capability;

use crate::state::{CollectionConfig, TokenInfo};

#[cw_serde]
pub struct InstantiateMsg {
    pub uri: String,
    /// Addresses granted the minter role at instantiation
    pub minters: Vec<String>,
}

#[cw_serde]
pub struct NewToken {
    pub id: u64,
    pub max_supply: Uint128,
    /// Minted to the creator
    pub initial_supply: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a new token id. Admin only.
    Create {
        id: u64,
        max_supply: Uint128,
        initial_supply: Uint128,
    },
    /// Register several token ids at once. Admin only.
    CreateBatch { tokens: Vec<NewToken> },
    /// Mint units of an existing token. Minter only.
    Mint {
        to: String,
        id: u64,
        amount: Uint128,
    },
    /// Burn units. Owner or an approved operator of the owner.
    Burn {
        from: String,
        id: u64,
        amount: Uint128,
    },
    /// Allow or revoke an operator for all of the sender's tokens.
    SetApprovalForAll { operator: String, approved: bool },
    /// Grant a capability. Admin only; only `minter` is grantable.
    GrantRole { role: Capability, address: String },
    /// Revoke a capability. Admin only.
    RevokeRole { role: Capability, address: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CollectionConfig)]
    Config {},

    #[returns(Option<TokenInfo>)]
    TokenInfo { id: u64 },

    #[returns(BalanceResponse)]
    BalanceOf { owner: String, id: u64 },

    #[returns(ApprovalResponse)]
    IsApprovedForAll { owner: String, operator: String },

    #[returns(bool)]
    HasRole { role: Capability, address: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct ApprovalResponse {
    pub approved: bool,
}

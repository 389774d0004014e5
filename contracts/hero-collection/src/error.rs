use cosmwasm_std::{StdError, Uint128};
use kombat_common::Capability;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("token {id} not found")]
    TokenNotFound { id: u64 },

    #[error("token {id} already exists")]
    TokenAlreadyExists { id: u64 },

    #[error("minting {requested} of token {id} would exceed max supply {max_supply}")]
    SupplyExceeded {
        id: u64,
        max_supply: Uint128,
        requested: Uint128,
    },

    #[error("insufficient balance of token {id}: need {needed}, have {available}")]
    InsufficientBalance {
        id: u64,
        needed: Uint128,
        available: Uint128,
    },

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("role {role} cannot be granted on the collection")]
    RoleNotGrantable { role: Capability },
}

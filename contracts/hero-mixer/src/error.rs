use cosmwasm_std::StdError;
use kombat_common::{ConfigError, Tier};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    // ── Validation ──
    #[error("mix takes exactly {expected} items, got {got}")]
    WrongCount { expected: usize, got: usize },

    #[error("items of different tiers: {first} and {other}")]
    MixedTiers { first: Tier, other: Tier },

    #[error("item {item_id} is not mapped to any tier")]
    UnknownItem { item_id: u64 },

    // ── Authorization ──
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("{participant} cannot mix these items: {reason}")]
    NotOwner { participant: String, reason: String },

    #[error("{sender} is not the randomness coordinator")]
    NotCoordinator { sender: String },

    // ── State ──
    #[error("mix request {request_id} not found")]
    UnknownRequest { request_id: String },

    #[error("mix request {request_id} already fulfilled")]
    AlreadyFulfilled { request_id: String },

    // ── Config ──
    #[error("item {item_id} is already mapped to tier {tier}")]
    ItemAlreadyMapped { item_id: u64, tier: Tier },

    #[error("insufficient oracle fee balance: need {needed}, have {available}")]
    InsufficientFee { needed: String, available: String },
}

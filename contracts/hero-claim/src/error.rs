use cosmwasm_std::{StdError, Timestamp};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("claim window is [{start}, {end}], now {now}")]
    OutOfWindow {
        start: Timestamp,
        end: Timestamp,
        now: Timestamp,
    },

    #[error("{participant} has already claimed")]
    AlreadyClaimed { participant: String },

    #[error("invalid claim window: start {start} is after end {end}")]
    InvalidWindow { start: Timestamp, end: Timestamp },
}

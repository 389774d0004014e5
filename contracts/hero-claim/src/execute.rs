use cosmwasm_std::{
    to_json_binary, Addr, DepsMut, Env, Event, MessageInfo, Response, Timestamp, Uint128,
    WasmMsg,
};
use kombat_common::Capability;

use crate::error::ContractError;
use crate::msg::CollectionExecuteMsg;
use crate::state::{ClaimConfig, ClaimRecord, CLAIMS, CONFIG, TOTAL_CLAIMED};

pub fn validate_window(start: Timestamp, end: Timestamp) -> Result<(), ContractError> {
    if start > end {
        return Err(ContractError::InvalidWindow { start, end });
    }
    Ok(())
}

/// Only the admin capability exists on the claim contract.
pub fn has_capability(config: &ClaimConfig, addr: &Addr, capability: Capability) -> bool {
    match capability {
        Capability::Administrator => *addr == config.admin,
        Capability::Minter | Capability::Coordinator => false,
    }
}

fn ensure_admin(config: &ClaimConfig, sender: &Addr, action: &str) -> Result<(), ContractError> {
    if !has_capability(config, sender, Capability::Administrator) {
        return Err(ContractError::Unauthorized {
            reason: format!("only admin can {}", action),
        });
    }
    Ok(())
}

/// Inclusive on both ends.
pub fn window_is_open(config: &ClaimConfig, now: Timestamp) -> bool {
    now >= config.claim_start && now <= config.claim_end
}

/// Mint the reward item to the sender. One successful claim per address,
/// only while the window is open.
pub fn claim(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let now = env.block.time;
    if !window_is_open(&config, now) {
        return Err(ContractError::OutOfWindow {
            start: config.claim_start,
            end: config.claim_end,
            now,
        });
    }

    let already = CLAIMS
        .may_load(deps.storage, &info.sender)?
        .is_some_and(|record| record.claimed);
    if already {
        return Err(ContractError::AlreadyClaimed {
            participant: info.sender.to_string(),
        });
    }

    CLAIMS.save(
        deps.storage,
        &info.sender,
        &ClaimRecord {
            claimed: true,
            claimed_at: now,
        },
    )?;
    let total = TOTAL_CLAIMED.may_load(deps.storage)?.unwrap_or_default() + 1;
    TOTAL_CLAIMED.save(deps.storage, &total)?;

    let mint = WasmMsg::Execute {
        contract_addr: config.collection.to_string(),
        msg: to_json_binary(&CollectionExecuteMsg::Mint {
            to: info.sender.to_string(),
            id: config.reward_item_id,
            amount: Uint128::one(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(mint)
        .add_attribute("action", "claim")
        .add_attribute("participant", info.sender.to_string())
        .add_attribute("reward_item_id", config.reward_item_id.to_string())
        .add_event(
            Event::new("kombat_claimed")
                .add_attribute("participant", info.sender.to_string())
                .add_attribute("reward_item_id", config.reward_item_id.to_string())
                .add_attribute("total_claimed", total.to_string())
                .add_attribute("timestamp", now.seconds().to_string()),
        ))
}

/// Replace the claim window. Admin only.
pub fn set_window(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    start: Timestamp,
    end: Timestamp,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set the claim window")?;
    validate_window(start, end)?;

    config.claim_start = start;
    config.claim_end = end;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_window")
        .add_attribute("start", start.seconds().to_string())
        .add_attribute("end", end.seconds().to_string()))
}

pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    collection: Option<String>,
    reward_item_id: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "update config")?;

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(collection) = collection {
        config.collection = deps.api.addr_validate(&collection)?;
    }
    if let Some(id) = reward_item_id {
        config.reward_item_id = id;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}

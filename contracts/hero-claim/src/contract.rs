use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{ClaimConfig, CONFIG, TOTAL_CLAIMED};

const CONTRACT_NAME: &str = "crates.io:hero-claim";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_window(msg.claim_start, msg.claim_end)?;

    let config = ClaimConfig {
        admin: info.sender.clone(),
        collection: deps.api.addr_validate(&msg.collection)?,
        reward_item_id: msg.reward_item_id,
        claim_start: msg.claim_start,
        claim_end: msg.claim_end,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_CLAIMED.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "hero-claim")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("reward_item_id", msg.reward_item_id.to_string())
        .add_attribute("claim_start", msg.claim_start.seconds().to_string())
        .add_attribute("claim_end", msg.claim_end.seconds().to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Claim {} => execute::claim(deps, env, info),
        ExecuteMsg::SetWindow { start, end } => execute::set_window(deps, env, info, start, end),
        ExecuteMsg::UpdateConfig {
            admin,
            collection,
            reward_item_id,
        } => execute::update_config(deps, env, info, admin, collection, reward_item_id),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::ClaimRecord { address } => query::query_claim_record(deps, address),
        QueryMsg::HasClaimed { address } => query::query_has_claimed(deps, address),
        QueryMsg::WindowStatus {} => query::query_window_status(deps, env),
        QueryMsg::ClaimStats {} => query::query_claim_stats(deps),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};
use kombat_common::Capability;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, NewToken, QueryMsg};
use crate::query;
use crate::state::{CollectionConfig, CONFIG, ROLES};

const CONTRACT_NAME: &str = "crates.io:hero-collection";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = CollectionConfig {
        admin: info.sender.clone(),
        uri: msg.uri,
    };
    CONFIG.save(deps.storage, &config)?;

    for minter in &msg.minters {
        let addr = deps.api.addr_validate(minter)?;
        ROLES.save(deps.storage, (Capability::Minter.as_str(), &addr), &())?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "hero-collection")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Create {
            id,
            max_supply,
            initial_supply,
        } => execute::create_tokens(
            deps,
            env,
            info,
            vec![NewToken {
                id,
                max_supply,
                initial_supply,
            }],
        ),
        ExecuteMsg::CreateBatch { tokens } => execute::create_tokens(deps, env, info, tokens),
        ExecuteMsg::Mint { to, id, amount } => execute::mint(deps, env, info, to, id, amount),
        ExecuteMsg::Burn { from, id, amount } => execute::burn(deps, env, info, from, id, amount),
        ExecuteMsg::SetApprovalForAll { operator, approved } => {
            execute::set_approval_for_all(deps, env, info, operator, approved)
        }
        ExecuteMsg::GrantRole { role, address } => {
            execute::update_role(deps, env, info, role, address, true)
        }
        ExecuteMsg::RevokeRole { role, address } => {
            execute::update_role(deps, env, info, role, address, false)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::TokenInfo { id } => query::query_token_info(deps, id),
        QueryMsg::BalanceOf { owner, id } => query::query_balance_of(deps, owner, id),
        QueryMsg::IsApprovedForAll { owner, operator } => {
            query::query_is_approved_for_all(deps, owner, operator)
        }
        QueryMsg::HasRole { role, address } => query::query_has_role(deps, role, address),
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

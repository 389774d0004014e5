use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{MixStateInfo, MixerConfig, RandomnessSource, CONFIG, MIX_STATE};

const CONTRACT_NAME: &str = "crates.io:hero-mixer";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let collection = deps.api.addr_validate(&msg.collection)?;
    let randomness = execute::validate_randomness_source(deps.api, msg.randomness)?;
    let mode = match &randomness {
        RandomnessSource::Immediate => "immediate",
        RandomnessSource::Oracle { .. } => "oracle",
    };

    let config = MixerConfig {
        admin: info.sender.clone(),
        collection: collection.clone(),
        randomness,
    };
    CONFIG.save(deps.storage, &config)?;

    MIX_STATE.save(
        deps.storage,
        &MixStateInfo {
            request_nonce: 0,
            total_mixes_requested: 0,
            total_mixes_completed: 0,
            total_items_burned: Uint128::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "hero-mixer")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("collection", collection.to_string())
        .add_attribute("randomness", mode))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetEditionMapping { tier, item_ids } => {
            execute::set_edition_mapping(deps, env, info, tier, item_ids)
        }
        ExecuteMsg::SetProbabilityTable {
            input_tier,
            output_tiers,
            chances,
        } => execute::set_probability_table(deps, env, info, input_tier, output_tiers, chances),
        ExecuteMsg::Mix { item_ids } => execute::mix(deps, env, info, item_ids),
        ExecuteMsg::FulfillRandomness {
            request_id,
            randomness,
        } => execute::fulfill_randomness(deps, env, info, request_id, randomness),
        ExecuteMsg::UpdateConfig {
            admin,
            collection,
            randomness,
        } => execute::update_config(deps, env, info, admin, collection, randomness),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::MixState {} => query::query_mix_state(deps),
        QueryMsg::EditionMapping { tier } => query::query_edition_mapping(deps, tier),
        QueryMsg::ProbabilityTable { tier } => query::query_probability_table(deps, tier),
        QueryMsg::ItemTier { item_id } => query::query_item_tier(deps, item_id),
        QueryMsg::MixRequest { request_id } => query::query_mix_request(deps, request_id),
        QueryMsg::MixRequests { start_after, limit } => {
            query::query_mix_requests(deps, start_after, limit)
        }
        QueryMsg::UserMixRequests {
            address,
            start_after,
            limit,
        } => query::query_user_mix_requests(deps, address, start_after, limit),
        QueryMsg::SimulateDraw {
            input_tier,
            randomness,
        } => query::query_simulate_draw(deps, input_tier, randomness),
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

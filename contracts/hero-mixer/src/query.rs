use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdError, StdResult, Uint256};
use cw_storage_plus::Bound;
use kombat_common::{ConfigError, Tier};

use crate::execute::resolve_outcome;
use crate::msg::{MixRequestsResponse, SimulateDrawResponse};
use crate::state::{
    CONFIG, EDITIONS, ITEM_TIERS, MIX_REQUESTS, MIX_STATE, PROBABILITY_TABLES, USER_REQUESTS,
};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_mix_state(deps: Deps) -> StdResult<Binary> {
    let state = MIX_STATE.load(deps.storage)?;
    to_json_binary(&state)
}

pub fn query_edition_mapping(deps: Deps, tier: Tier) -> StdResult<Binary> {
    let pool = EDITIONS
        .may_load(deps.storage, tier.as_str())?
        .unwrap_or_default();
    to_json_binary(&pool)
}

pub fn query_probability_table(deps: Deps, tier: Tier) -> StdResult<Binary> {
    let table = PROBABILITY_TABLES.may_load(deps.storage, tier.as_str())?;
    to_json_binary(&table)
}

pub fn query_item_tier(deps: Deps, item_id: u64) -> StdResult<Binary> {
    let tier = ITEM_TIERS.may_load(deps.storage, item_id)?;
    to_json_binary(&tier)
}

pub fn query_mix_request(deps: Deps, request_id: String) -> StdResult<Binary> {
    let request = MIX_REQUESTS.may_load(deps.storage, &request_id)?;
    to_json_binary(&request)
}

pub fn query_mix_requests(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let requests: Vec<_> = MIX_REQUESTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, request)| request)
        .collect();

    to_json_binary(&MixRequestsResponse { requests })
}

pub fn query_user_mix_requests(
    deps: Deps,
    address: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let request_ids: Vec<String> = USER_REQUESTS
        .prefix(&addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<_>>()?;

    let requests = request_ids
        .iter()
        .map(|id| MIX_REQUESTS.load(deps.storage, id))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&MixRequestsResponse { requests })
}

pub fn query_simulate_draw(deps: Deps, input_tier: Tier, randomness: Uint256) -> StdResult<Binary> {
    let table = PROBABILITY_TABLES
        .may_load(deps.storage, input_tier.as_str())?
        .ok_or_else(|| {
            StdError::generic_err(ConfigError::NotConfigured { tier: input_tier }.to_string())
        })?;
    let outcome = resolve_outcome(deps.storage, input_tier, &table, randomness)
        .map_err(|e| StdError::generic_err(e.to_string()))?;

    to_json_binary(&SimulateDrawResponse {
        roll: outcome.roll,
        output_tier: outcome.output_tier,
        output_item_id: outcome.output_item_id,
    })
}

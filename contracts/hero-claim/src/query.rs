use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdResult};

use crate::execute::window_is_open;
use crate::msg::{ClaimStatsResponse, WindowStatusResponse};
use crate::state::{CLAIMS, CONFIG, TOTAL_CLAIMED};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_claim_record(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let record = CLAIMS.may_load(deps.storage, &addr)?;
    to_json_binary(&record)
}

pub fn query_has_claimed(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let claimed = CLAIMS
        .may_load(deps.storage, &addr)?
        .is_some_and(|record| record.claimed);
    to_json_binary(&claimed)
}

pub fn query_window_status(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&WindowStatusResponse {
        start: config.claim_start,
        end: config.claim_end,
        is_open: window_is_open(&config, env.block.time),
    })
}

pub fn query_claim_stats(deps: Deps) -> StdResult<Binary> {
    let total_claimed = TOTAL_CLAIMED.may_load(deps.storage)?.unwrap_or_default();
    to_json_binary(&ClaimStatsResponse { total_claimed })
}

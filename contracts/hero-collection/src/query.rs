use cosmwasm_std::{to_json_binary, Binary, Deps, StdResult};
use kombat_common::Capability;

use crate::execute::has_capability;
use crate::msg::{ApprovalResponse, BalanceResponse};
use crate::state::{APPROVALS, BALANCES, CONFIG, TOKENS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_token_info(deps: Deps, id: u64) -> StdResult<Binary> {
    let token = TOKENS.may_load(deps.storage, id)?;
    to_json_binary(&token)
}

pub fn query_balance_of(deps: Deps, owner: String, id: u64) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let balance = BALANCES
        .may_load(deps.storage, (&owner, id))?
        .unwrap_or_default();
    to_json_binary(&BalanceResponse { balance })
}

pub fn query_is_approved_for_all(deps: Deps, owner: String, operator: String) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let operator = deps.api.addr_validate(&operator)?;
    let approved = APPROVALS.has(deps.storage, (&owner, &operator));
    to_json_binary(&ApprovalResponse { approved })
}

pub fn query_has_role(deps: Deps, role: Capability, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&has_capability(deps.storage, &config, &addr, role))
}

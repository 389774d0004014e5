use cosmwasm_std::{
    Addr, DepsMut, Env, Event, MessageInfo, Response, StdError, Storage, Uint128,
};
use kombat_common::Capability;

use crate::error::ContractError;
use crate::msg::NewToken;
use crate::state::{CollectionConfig, TokenInfo, APPROVALS, BALANCES, CONFIG, ROLES, TOKENS};

/// Whether `addr` holds `capability` on this collection.
pub fn has_capability(
    storage: &dyn Storage,
    config: &CollectionConfig,
    addr: &Addr,
    capability: Capability,
) -> bool {
    match capability {
        Capability::Administrator => *addr == config.admin,
        Capability::Minter => ROLES.has(storage, (capability.as_str(), addr)),
        Capability::Coordinator => false,
    }
}

fn ensure_capability(
    storage: &dyn Storage,
    config: &CollectionConfig,
    addr: &Addr,
    capability: Capability,
) -> Result<(), ContractError> {
    if !has_capability(storage, config, addr, capability) {
        return Err(ContractError::Unauthorized {
            reason: format!("{} capability required", capability),
        });
    }
    Ok(())
}

/// Register token ids and mint their initial supply to the creator. Admin only.
pub fn create_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    tokens: Vec<NewToken>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_capability(deps.storage, &config, &info.sender, Capability::Administrator)?;

    let mut response = Response::new().add_attribute("action", "create");
    let mut ids = Vec::with_capacity(tokens.len());

    for token in tokens {
        if TOKENS.has(deps.storage, token.id) {
            return Err(ContractError::TokenAlreadyExists { id: token.id });
        }
        if !token.max_supply.is_zero() && token.initial_supply > token.max_supply {
            return Err(ContractError::SupplyExceeded {
                id: token.id,
                max_supply: token.max_supply,
                requested: token.initial_supply,
            });
        }

        TOKENS.save(
            deps.storage,
            token.id,
            &TokenInfo {
                id: token.id,
                max_supply: token.max_supply,
                total_supply: token.initial_supply,
            },
        )?;
        if !token.initial_supply.is_zero() {
            add_balance(deps.storage, &info.sender, token.id, token.initial_supply)?;
        }

        ids.push(token.id.to_string());
        response = response.add_event(
            Event::new("kombat_token_created")
                .add_attribute("id", token.id.to_string())
                .add_attribute("max_supply", token.max_supply.to_string())
                .add_attribute("initial_supply", token.initial_supply.to_string())
                .add_attribute("creator", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        );
    }

    Ok(response.add_attribute("ids", ids.join(",")))
}

/// Mint units of an existing token. Minter only.
pub fn mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: String,
    id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_capability(deps.storage, &config, &info.sender, Capability::Minter)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient = deps.api.addr_validate(&to)?;

    let mut token = TOKENS
        .may_load(deps.storage, id)?
        .ok_or(ContractError::TokenNotFound { id })?;

    let new_supply = token
        .total_supply
        .checked_add(amount)
        .map_err(StdError::from)?;
    if !token.max_supply.is_zero() && new_supply > token.max_supply {
        return Err(ContractError::SupplyExceeded {
            id,
            max_supply: token.max_supply,
            requested: amount,
        });
    }
    token.total_supply = new_supply;
    TOKENS.save(deps.storage, id, &token)?;
    add_balance(deps.storage, &recipient, id, amount)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("to", recipient.to_string())
        .add_attribute("id", id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("kombat_minted")
                .add_attribute("minter", info.sender.to_string())
                .add_attribute("to", recipient.to_string())
                .add_attribute("id", id.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("total_supply", token.total_supply.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Burn units from `from`. The sender must be the owner or an approved operator.
pub fn burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    from: String,
    id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let owner = deps.api.addr_validate(&from)?;
    if info.sender != owner && !APPROVALS.has(deps.storage, (&owner, &info.sender)) {
        return Err(ContractError::Unauthorized {
            reason: "sender is neither owner nor approved operator".to_string(),
        });
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let mut token = TOKENS
        .may_load(deps.storage, id)?
        .ok_or(ContractError::TokenNotFound { id })?;

    let balance = BALANCES
        .may_load(deps.storage, (&owner, id))?
        .unwrap_or_default();
    if balance < amount {
        return Err(ContractError::InsufficientBalance {
            id,
            needed: amount,
            available: balance,
        });
    }

    token.total_supply = token
        .total_supply
        .checked_sub(amount)
        .map_err(StdError::from)?;

    let remaining = balance - amount;
    if remaining.is_zero() {
        BALANCES.remove(deps.storage, (&owner, id));
    } else {
        BALANCES.save(deps.storage, (&owner, id), &remaining)?;
    }
    TOKENS.save(deps.storage, id, &token)?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("from", owner.to_string())
        .add_attribute("id", id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("kombat_burned")
                .add_attribute("operator", info.sender.to_string())
                .add_attribute("from", owner.to_string())
                .add_attribute("id", id.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

pub fn set_approval_for_all(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    operator: String,
    approved: bool,
) -> Result<Response, ContractError> {
    let operator_addr = deps.api.addr_validate(&operator)?;

    if approved {
        APPROVALS.save(deps.storage, (&info.sender, &operator_addr), &())?;
    } else {
        APPROVALS.remove(deps.storage, (&info.sender, &operator_addr));
    }

    Ok(Response::new()
        .add_attribute("action", "set_approval_for_all")
        .add_event(
            Event::new("kombat_approval")
                .add_attribute("owner", info.sender.to_string())
                .add_attribute("operator", operator_addr.to_string())
                .add_attribute("approved", approved.to_string()),
        ))
}

/// Grant or revoke a role. Admin only; only the minter role lives here.
pub fn update_role(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    role: Capability,
    address: String,
    grant: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_capability(deps.storage, &config, &info.sender, Capability::Administrator)?;

    if role != Capability::Minter {
        return Err(ContractError::RoleNotGrantable { role });
    }
    let addr = deps.api.addr_validate(&address)?;

    if grant {
        ROLES.save(deps.storage, (role.as_str(), &addr), &())?;
    } else {
        ROLES.remove(deps.storage, (role.as_str(), &addr));
    }

    Ok(Response::new()
        .add_attribute("action", if grant { "grant_role" } else { "revoke_role" })
        .add_attribute("role", role.as_str())
        .add_attribute("address", addr.to_string()))
}

fn add_balance(
    storage: &mut dyn Storage,
    owner: &Addr,
    id: u64,
    amount: Uint128,
) -> Result<(), ContractError> {
    BALANCES.update(storage, (owner, id), |balance| -> Result<_, ContractError> {
        Ok(balance
            .unwrap_or_default()
            .checked_add(amount)
            .map_err(StdError::from)?)
    })?;
    Ok(())
}

use std::collections::BTreeMap;

use cosmwasm_std::{
    to_json_binary, Addr, Api, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdResult, Storage, Uint128, Uint256, WasmMsg,
};
use kombat_common::{
    compute_request_id, derive_randomness, resolve_edition, split_randomness, Capability,
    ConfigError, MixRequestStatus, ProbabilityTable, Tier, MIX_INPUT_COUNT,
};

use crate::error::ContractError;
use crate::msg::{
    CollectionExecuteMsg, CollectionQueryMsg, CoordinatorExecuteMsg, RandomnessSourceMsg,
};
use crate::state::{
    CollectionApprovalResponse, CollectionBalanceResponse, MixRequest, MixerConfig,
    RandomnessSource, CONFIG, EDITIONS, ITEM_TIERS, MIX_REQUESTS, MIX_STATE,
    PROBABILITY_TABLES, USER_REQUESTS,
};

/// Result of resolving one random value against a table and the edition pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixOutcome {
    pub roll: u64,
    pub output_tier: Tier,
    pub output_item_id: u64,
}

pub fn validate_randomness_source(
    api: &dyn Api,
    source: RandomnessSourceMsg,
) -> StdResult<RandomnessSource> {
    Ok(match source {
        RandomnessSourceMsg::Immediate {} => RandomnessSource::Immediate,
        RandomnessSourceMsg::Oracle {
            coordinator,
            key_hash,
            fee,
        } => RandomnessSource::Oracle {
            coordinator: api.addr_validate(&coordinator)?,
            key_hash,
            fee: fee.filter(|coin| !coin.amount.is_zero()),
        },
    })
}

/// Whether `addr` holds `capability` under the current config. The mixer
/// never mints on its own authority, so `Minter` is never held.
pub fn has_capability(config: &MixerConfig, addr: &Addr, capability: Capability) -> bool {
    match capability {
        Capability::Administrator => *addr == config.admin,
        Capability::Coordinator => match &config.randomness {
            RandomnessSource::Oracle { coordinator, .. } => addr == coordinator,
            RandomnessSource::Immediate => false,
        },
        Capability::Minter => false,
    }
}

fn ensure_admin(config: &MixerConfig, sender: &Addr, action: &str) -> Result<(), ContractError> {
    if !has_capability(config, sender, Capability::Administrator) {
        return Err(ContractError::Unauthorized {
            reason: format!("only admin can {}", action),
        });
    }
    Ok(())
}

/// Replace the item pool of a tier. Admin only.
pub fn set_edition_mapping(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    tier: Tier,
    item_ids: Vec<u64>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set edition mappings")?;

    if item_ids.is_empty() {
        return Err(ConfigError::EmptyPool { tier }.into());
    }
    for id in &item_ids {
        if let Some(existing) = ITEM_TIERS.may_load(deps.storage, *id)? {
            if existing != tier {
                return Err(ContractError::ItemAlreadyMapped {
                    item_id: *id,
                    tier: existing,
                });
            }
        }
    }

    // Drop reverse entries of the pool being replaced
    let previous = EDITIONS
        .may_load(deps.storage, tier.as_str())?
        .unwrap_or_default();
    for id in previous {
        ITEM_TIERS.remove(deps.storage, id);
    }
    for id in &item_ids {
        ITEM_TIERS.save(deps.storage, *id, &tier)?;
    }
    EDITIONS.save(deps.storage, tier.as_str(), &item_ids)?;

    Ok(Response::new()
        .add_attribute("action", "set_edition_mapping")
        .add_attribute("tier", tier.as_str())
        .add_attribute("pool_size", item_ids.len().to_string()))
}

/// Set the output distribution for an input tier. Admin only.
pub fn set_probability_table(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    input_tier: Tier,
    output_tiers: Vec<Tier>,
    chances: Vec<u16>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set probability tables")?;

    let table = ProbabilityTable::new(output_tiers, chances)?;
    PROBABILITY_TABLES.save(deps.storage, input_tier.as_str(), &table)?;

    let outputs: Vec<String> = table
        .output_tiers
        .iter()
        .zip(table.chances.iter())
        .map(|(tier, chance)| format!("{}:{}", tier, chance))
        .collect();

    Ok(Response::new()
        .add_attribute("action", "set_probability_table")
        .add_attribute("input_tier", input_tier.as_str())
        .add_attribute("outputs", outputs.join(",")))
}

/// Burn three same-tier items and either draw the output immediately or
/// request randomness from the oracle coordinator.
pub fn mix(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    item_ids: Vec<u64>,
) -> Result<Response, ContractError> {
    if item_ids.len() != MIX_INPUT_COUNT {
        return Err(ContractError::WrongCount {
            expected: MIX_INPUT_COUNT,
            got: item_ids.len(),
        });
    }

    let config = CONFIG.load(deps.storage)?;

    let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
    for id in &item_ids {
        *counts.entry(*id).or_default() += 1;
    }
    ensure_can_burn(
        deps.as_ref(),
        &config.collection,
        &info.sender,
        &env.contract.address,
        &counts,
    )?;

    let input_tier = common_tier(deps.storage, &item_ids)?;
    let table = PROBABILITY_TABLES
        .may_load(deps.storage, input_tier.as_str())?
        .ok_or(ConfigError::NotConfigured { tier: input_tier })?;

    let mut messages: Vec<CosmosMsg> = Vec::with_capacity(counts.len() + 1);
    for (id, count) in &counts {
        messages.push(collection_msg(
            &config.collection,
            &CollectionExecuteMsg::Burn {
                from: info.sender.to_string(),
                id: *id,
                amount: Uint128::from(*count),
            },
        )?);
    }

    let mut state = MIX_STATE.load(deps.storage)?;
    let nonce = state.request_nonce;
    state.request_nonce += 1;
    state.total_mixes_requested += 1;
    state.total_items_burned += Uint128::from(MIX_INPUT_COUNT as u64);

    let tx_index = env
        .transaction
        .as_ref()
        .map(|tx| tx.index)
        .unwrap_or_default();
    let randomness = derive_randomness(&[
        env.block.chain_id.as_bytes(),
        &env.block.height.to_be_bytes(),
        &env.block.time.nanos().to_be_bytes(),
        &tx_index.to_be_bytes(),
        info.sender.as_bytes(),
        &nonce.to_be_bytes(),
    ]);

    let ids_attr = item_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    match config.randomness {
        RandomnessSource::Immediate => {
            let outcome = resolve_outcome(deps.storage, input_tier, &table, randomness)?;
            messages.push(collection_msg(
                &config.collection,
                &CollectionExecuteMsg::Mint {
                    to: info.sender.to_string(),
                    id: outcome.output_item_id,
                    amount: Uint128::one(),
                },
            )?);

            state.total_mixes_completed += 1;
            MIX_STATE.save(deps.storage, &state)?;

            Ok(Response::new()
                .add_messages(messages)
                .add_attribute("action", "mix")
                .add_attribute("requester", info.sender.to_string())
                .add_attribute("input_tier", input_tier.as_str())
                .add_attribute("item_ids", ids_attr)
                .add_event(mix_success_event(&env, &info.sender, &outcome, None)))
        }
        RandomnessSource::Oracle {
            coordinator,
            key_hash,
            fee,
        } => {
            if let Some(fee) = &fee {
                let available = deps
                    .querier
                    .query_balance(env.contract.address.as_str(), &fee.denom)?;
                if available.amount < fee.amount {
                    return Err(ContractError::InsufficientFee {
                        needed: fee.to_string(),
                        available: available.to_string(),
                    });
                }
            }

            // The locally derived value only seeds the oracle request here
            let seed = randomness;
            let request_id =
                compute_request_id(&key_hash, seed, env.contract.address.as_str(), nonce);

            let request = MixRequest {
                request_id: request_id.clone(),
                requester: info.sender.clone(),
                input_tier,
                input_item_ids: item_ids,
                seed,
                table,
                status: MixRequestStatus::Pending,
                created_at: env.block.time,
                fulfilled_at: None,
                randomness: None,
                output_tier: None,
                output_item_id: None,
            };
            MIX_REQUESTS.save(deps.storage, &request_id, &request)?;
            USER_REQUESTS.save(deps.storage, (&info.sender, &request_id), &())?;
            MIX_STATE.save(deps.storage, &state)?;

            messages.push(
                WasmMsg::Execute {
                    contract_addr: coordinator.to_string(),
                    msg: to_json_binary(&CoordinatorExecuteMsg::RequestRandomness {
                        key_hash,
                        seed,
                        request_id: request_id.clone(),
                    })?,
                    funds: fee.into_iter().collect(),
                }
                .into(),
            );

            Ok(Response::new()
                .add_messages(messages)
                .add_attribute("action", "mix")
                .add_attribute("requester", info.sender.to_string())
                .add_attribute("input_tier", input_tier.as_str())
                .add_attribute("item_ids", ids_attr)
                .add_attribute("request_id", request_id.clone())
                .add_event(
                    Event::new("kombat_mix_requested")
                        .add_attribute("requester", info.sender.to_string())
                        .add_attribute("request_id", request_id)
                        .add_attribute("input_tier", input_tier.as_str())
                        .add_attribute("timestamp", env.block.time.seconds().to_string()),
                ))
        }
    }
}

/// Complete a pending oracle-backed mix. Coordinator only.
///
/// Draws from the table captured when the request was created and resolves
/// the item against the current edition pools. A failure leaves the request
/// pending so it can be fulfilled again after the configuration is fixed.
pub fn fulfill_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: String,
    randomness: Uint256,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !has_capability(&config, &info.sender, Capability::Coordinator) {
        return Err(ContractError::NotCoordinator {
            sender: info.sender.to_string(),
        });
    }

    let mut request = MIX_REQUESTS
        .may_load(deps.storage, &request_id)?
        .ok_or_else(|| ContractError::UnknownRequest {
            request_id: request_id.clone(),
        })?;
    if request.status == MixRequestStatus::Fulfilled {
        return Err(ContractError::AlreadyFulfilled { request_id });
    }

    let outcome = resolve_outcome(deps.storage, request.input_tier, &request.table, randomness)?;

    request.status = MixRequestStatus::Fulfilled;
    request.fulfilled_at = Some(env.block.time);
    request.randomness = Some(randomness);
    request.output_tier = Some(outcome.output_tier);
    request.output_item_id = Some(outcome.output_item_id);
    MIX_REQUESTS.save(deps.storage, &request_id, &request)?;

    MIX_STATE.update(deps.storage, |mut state| -> StdResult<_> {
        state.total_mixes_completed += 1;
        Ok(state)
    })?;

    let mint = collection_msg(
        &config.collection,
        &CollectionExecuteMsg::Mint {
            to: request.requester.to_string(),
            id: outcome.output_item_id,
            amount: Uint128::one(),
        },
    )?;

    Ok(Response::new()
        .add_message(mint)
        .add_attribute("action", "fulfill_randomness")
        .add_attribute("request_id", request_id.clone())
        .add_attribute("requester", request.requester.to_string())
        .add_event(mix_success_event(
            &env,
            &request.requester,
            &outcome,
            Some(&request_id),
        )))
}

pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    collection: Option<String>,
    randomness: Option<RandomnessSourceMsg>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "update config")?;

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(collection) = collection {
        config.collection = deps.api.addr_validate(&collection)?;
    }
    if let Some(source) = randomness {
        config.randomness = validate_randomness_source(deps.api, source)?;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}

/// Turn a random value into an output tier and a concrete item.
pub fn resolve_outcome(
    storage: &dyn Storage,
    input_tier: Tier,
    table: &ProbabilityTable,
    randomness: Uint256,
) -> Result<MixOutcome, ContractError> {
    table.validate()?;
    let roll = split_randomness(randomness);
    let output_tier = table
        .draw(roll.draw)
        .ok_or(ConfigError::NotConfigured { tier: input_tier })?;
    let pool = EDITIONS
        .may_load(storage, output_tier.as_str())?
        .unwrap_or_default();
    let output_item_id = resolve_edition(output_tier, &pool, roll.index)?;

    Ok(MixOutcome {
        roll: roll.draw,
        output_tier,
        output_item_id,
    })
}

/// The mixer must be an approved operator of `owner`, and `owner` must hold
/// every id at least as many times as it appears in the request.
fn ensure_can_burn(
    deps: Deps,
    collection: &Addr,
    owner: &Addr,
    operator: &Addr,
    counts: &BTreeMap<u64, u64>,
) -> Result<(), ContractError> {
    let approval: CollectionApprovalResponse = deps.querier.query_wasm_smart(
        collection,
        &CollectionQueryMsg::IsApprovedForAll {
            owner: owner.to_string(),
            operator: operator.to_string(),
        },
    )?;
    if !approval.approved {
        return Err(ContractError::NotOwner {
            participant: owner.to_string(),
            reason: "mixer is not an approved operator".to_string(),
        });
    }

    for (id, count) in counts {
        let held: CollectionBalanceResponse = deps.querier.query_wasm_smart(
            collection,
            &CollectionQueryMsg::BalanceOf {
                owner: owner.to_string(),
                id: *id,
            },
        )?;
        if held.balance < Uint128::from(*count) {
            return Err(ContractError::NotOwner {
                participant: owner.to_string(),
                reason: format!("holds {} of item {}, needs {}", held.balance, id, count),
            });
        }
    }
    Ok(())
}

fn common_tier(storage: &dyn Storage, item_ids: &[u64]) -> Result<Tier, ContractError> {
    let mut first: Option<Tier> = None;
    for id in item_ids {
        let tier = ITEM_TIERS
            .may_load(storage, *id)?
            .ok_or(ContractError::UnknownItem { item_id: *id })?;
        match first {
            None => first = Some(tier),
            Some(first) if first != tier => {
                return Err(ContractError::MixedTiers { first, other: tier });
            }
            Some(_) => {}
        }
    }
    first.ok_or(ContractError::WrongCount {
        expected: MIX_INPUT_COUNT,
        got: 0,
    })
}

fn collection_msg(collection: &Addr, msg: &CollectionExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: collection.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}

fn mix_success_event(
    env: &Env,
    requester: &Addr,
    outcome: &MixOutcome,
    request_id: Option<&str>,
) -> Event {
    let event = Event::new("kombat_heroes_mix_success")
        .add_attribute("requester", requester.to_string())
        .add_attribute("output_tier", outcome.output_tier.as_str())
        .add_attribute("output_item_id", outcome.output_item_id.to_string())
        .add_attribute("roll", outcome.roll.to_string())
        .add_attribute("timestamp", env.block.time.seconds().to_string());
    match request_id {
        Some(id) => event.add_attribute("request_id", id),
        None => event,
    }
}

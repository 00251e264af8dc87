//! Pool storage and settlement.
//!
//! Pools are addressed by a dense `u32` index assigned at creation; the index
//! never changes and pools are never removed (set the weight to zero
//! instead). The sum of all weights is kept alongside so settlement does not
//! have to walk the registry.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::config::EmissionConfig;
use crate::errors::ContractError;
use crate::ledger;

const POOL: Symbol = symbol_short!("POOL");
const POOL_TOKEN: Symbol = symbol_short!("POOL_TOK");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub id: u32,
    pub stake_token: Address,
    /// Allocation points.
    pub weight: u32,
    /// Reward per staked unit, scaled by [`ledger::PRECISION`].
    pub acc_reward_per_share: i128,
    /// Ledger sequence of the last settlement.
    pub last_settled: u32,
    pub total_staked: i128,
    pub deposit_fee_bp: u32,
}

fn pool_key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

fn token_key(token: &Address) -> (Symbol, Address) {
    (POOL_TOKEN, token.clone())
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

fn set_total_weight(env: &Env, total: u64) {
    env.storage().instance().set(&TOTAL_WEIGHT, &total);
}

pub fn load_pool(env: &Env, id: u32) -> Result<PoolInfo, ContractError> {
    env.storage()
        .persistent()
        .get(&pool_key(id))
        .ok_or(ContractError::PoolNotFound)
}

pub fn store_pool(env: &Env, pool: &PoolInfo) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn pool_for_token(env: &Env, token: &Address) -> Option<u32> {
    env.storage().persistent().get(&token_key(token))
}

/// Append a pool starting its accrual at `now`. The caller must mass-update
/// first: the new weight changes every other pool's share from here on.
pub fn create_pool(
    env: &Env,
    stake_token: Address,
    weight: u32,
    deposit_fee_bp: u32,
    now: u32,
) -> Result<PoolInfo, ContractError> {
    if pool_for_token(env, &stake_token).is_some() {
        return Err(ContractError::PoolAlreadyExists);
    }

    let id = pool_count(env);
    let next_count = id.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;
    let total = total_weight(env)
        .checked_add(weight as u64)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let pool = PoolInfo {
        id,
        stake_token: stake_token.clone(),
        weight,
        acc_reward_per_share: 0,
        last_settled: now,
        total_staked: 0,
        deposit_fee_bp,
    };

    store_pool(env, &pool);
    env.storage().persistent().set(&token_key(&stake_token), &id);
    env.storage().instance().set(&POOL_COUNT, &next_count);
    set_total_weight(env, total);

    Ok(pool)
}

/// Replace a pool's weight, keeping the stored total in step. The caller
/// must mass-update first.
pub fn reweight(env: &Env, pool: &mut PoolInfo, weight: u32) -> Result<(), ContractError> {
    let total = total_weight(env)
        .checked_sub(pool.weight as u64)
        .and_then(|t| t.checked_add(weight as u64))
        .ok_or(ContractError::ArithmeticOverflow)?;
    pool.weight = weight;
    store_pool(env, pool);
    set_total_weight(env, total);
    Ok(())
}

/// Settle pool `id` up to the current ledger sequence and persist it.
pub fn settle_pool(
    env: &Env,
    id: u32,
    config: &EmissionConfig,
) -> Result<PoolInfo, ContractError> {
    let mut pool = load_pool(env, id)?;
    let before = pool.last_settled;
    ledger::settle(
        env,
        &mut pool,
        env.ledger().sequence(),
        config.tokens_per_block,
        total_weight(env),
    )?;
    if pool.last_settled != before {
        store_pool(env, &pool);
    }
    Ok(pool)
}

/// Settle every pool. Must precede any change to the total weight or the
/// emission rate, otherwise the new denominator or rate would be applied to
/// blocks that already elapsed.
pub fn mass_update(env: &Env, config: &EmissionConfig) -> Result<(), ContractError> {
    for id in 0..pool_count(env) {
        settle_pool(env, id, config)?;
    }
    Ok(())
}

/// Accumulator pool `id` would have if settled now, without writing it.
pub fn projected_acc(
    env: &Env,
    pool: &PoolInfo,
    config: &EmissionConfig,
) -> Result<i128, ContractError> {
    let mut projected = pool.clone();
    ledger::settle(
        env,
        &mut projected,
        env.ledger().sequence(),
        config.tokens_per_block,
        total_weight(env),
    )?;
    Ok(projected.acc_reward_per_share)
}

//! Reward accrual arithmetic.
//!
//! `acc_reward_per_share` and every amount are `i128`. The two products that
//! can outgrow it, `reward × PRECISION` and `amount × acc`, are carried out in
//! [`I256`]: a product of two `i128` values always fits there. Results are
//! narrowed back with a checked conversion that fails closed with
//! [`ContractError::ArithmeticOverflow`]. Reward debt stays wide, since a
//! late depositor's share of the whole accumulator can exceed `i128` even when
//! what they are owed never does.
//!
//! Divisions floor. The remainder of `elapsed × rate × weight / total_weight`
//! and of `reward × PRECISION / total_staked` is never credited to anyone: a
//! few base units per settlement stay in the reserve. This is the intended
//! economics, not a rounding bug to be fixed.

use common::BASIS_POINTS;
use soroban_sdk::{contracttype, Env, I256};

use crate::errors::ContractError;
use crate::registry::PoolInfo;

/// Fixed-point scale of `acc_reward_per_share`.
pub const PRECISION: i128 = 1_000_000_000_000;

/// How one payout is divided between the staker and the protocol.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardSplit {
    pub user: i128,
    pub fee: i128,
    pub dev: i128,
}

/// Tokens emitted to one pool over `elapsed` blocks.
///
/// A pool with zero weight earns nothing. A weighted pool seeing a zero total
/// is an inconsistent registry and is rejected rather than read as zero.
pub fn pool_reward(
    elapsed: u32,
    tokens_per_block: i128,
    weight: u32,
    total_weight: u64,
) -> Result<i128, ContractError> {
    if weight == 0 || elapsed == 0 || tokens_per_block == 0 {
        return Ok(0);
    }
    if total_weight == 0 {
        return Err(ContractError::DivisionByZeroWeight);
    }
    let gross = (elapsed as i128)
        .checked_mul(tokens_per_block)
        .and_then(|v| v.checked_mul(weight as i128))
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(gross / total_weight as i128)
}

fn wide(env: &Env, v: i128) -> I256 {
    I256::from_i128(env, v)
}

fn narrow(v: &I256) -> Result<i128, ContractError> {
    v.to_i128().ok_or(ContractError::ArithmeticOverflow)
}

/// Bring `pool` up to block `now`.
///
/// `last_settled` moves to `now` even when nothing is staked, so an empty
/// window is never credited retroactively. Calling this again at the same
/// height changes nothing.
pub fn settle(
    env: &Env,
    pool: &mut PoolInfo,
    now: u32,
    tokens_per_block: i128,
    total_weight: u64,
) -> Result<(), ContractError> {
    if now <= pool.last_settled {
        return Ok(());
    }
    let elapsed = now - pool.last_settled;

    if pool.total_staked > 0 {
        let reward = pool_reward(elapsed, tokens_per_block, pool.weight, total_weight)?;
        if reward > 0 {
            let increment = narrow(
                &wide(env, reward)
                    .mul(&wide(env, PRECISION))
                    .div(&wide(env, pool.total_staked)),
            )?;
            pool.acc_reward_per_share = pool
                .acc_reward_per_share
                .checked_add(increment)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
    }

    pool.last_settled = now;
    Ok(())
}

/// `amount × acc / PRECISION`: the share of `acc` owned by a stake.
pub fn reward_debt(env: &Env, amount: i128, acc_reward_per_share: i128) -> I256 {
    wide(env, amount)
        .mul(&wide(env, acc_reward_per_share))
        .div(&wide(env, PRECISION))
}

/// Reward accrued by a stake since its debt was last synced.
pub fn pending(
    env: &Env,
    amount: i128,
    acc_reward_per_share: i128,
    debt: &I256,
) -> Result<i128, ContractError> {
    narrow(&reward_debt(env, amount, acc_reward_per_share).sub(debt))
}

/// `amount × bp / 10_000`, floored.
pub fn bp_share(amount: i128, bp: u32) -> Result<i128, ContractError> {
    amount
        .checked_mul(bp as i128)
        .map(|v| v / BASIS_POINTS)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Divide a payout. Both protocol cuts floor, so rounding always lands on
/// the user's side.
pub fn split_reward(
    pending: i128,
    harvest_fee_bp: u32,
    dev_cut_bp: u32,
) -> Result<RewardSplit, ContractError> {
    let fee = bp_share(pending, harvest_fee_bp)?;
    let dev = bp_share(pending, dev_cut_bp)?;
    let user = pending
        .checked_sub(fee)
        .and_then(|v| v.checked_sub(dev))
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(RewardSplit { user, fee, dev })
}

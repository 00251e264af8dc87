#![no_std]

pub mod account;
pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod registry;

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

pub use account::StakeAccount;
pub use config::{
    EmissionConfig, DEFAULT_DEV_CUT_BP, DEFAULT_HARVEST_FEE_BP, DEFAULT_TOKENS_PER_BLOCK,
    MAX_DEPOSIT_FEE_BP, MAX_REWARD_CUT_BP,
};
pub use errors::{ContractError, ErrorCategory};
pub use ledger::{RewardSplit, PRECISION};
pub use registry::PoolInfo;

// ── Storage key constants ────────────────────────────────────────────────────

/// Reward tokens the farm may pay out. Tracked apart from the token balance so
/// staked principal is never paid out as reward.
const RESERVE: Symbol = symbol_short!("RESERVE");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");

// ── Token helpers ────────────────────────────────────────────────────────────

/// Move `amount` of `token` from this contract to `to`.
fn send(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    match token::Client::new(env, token).try_transfer(
        &env.current_contract_address(),
        to,
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pull `amount` of `token` from `from` using the allowance `from` granted
/// this contract.
fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    let this = env.current_contract_address();
    if client.allowance(from, &this) < amount {
        return Err(ContractError::InsufficientAllowance);
    }
    match client.try_transfer_from(&this, from, &this, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

fn load_reserve(env: &Env) -> i128 {
    env.storage().instance().get(&RESERVE).unwrap_or(0)
}

fn store_reserve(env: &Env, reserve: i128) {
    env.storage().instance().set(&RESERVE, &reserve);
}

/// Pay `pending` reward out of the reserve, split between the user, the fee
/// address and the dev address.
fn pay_reward(
    env: &Env,
    config: &EmissionConfig,
    user: &Address,
    pool: u32,
    pending: i128,
) -> Result<RewardSplit, ContractError> {
    if pending <= 0 {
        return Ok(RewardSplit::default());
    }

    let reserve = load_reserve(env);
    if pending > reserve {
        return Err(ContractError::TransferFailed);
    }
    store_reserve(env, reserve - pending);

    let split = ledger::split_reward(pending, config.harvest_fee_bp, config.dev_cut_bp)?;
    send(env, &config.reward_token, user, split.user)?;
    send(env, &config.reward_token, &config.fee_address, split.fee)?;
    send(env, &config.reward_token, &config.dev_address, split.dev)?;

    events::publish_reward_paid(env, user.clone(), pool, split.clone());

    Ok(split)
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ShepherdContract;

#[contractimpl]
impl ShepherdContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `admin`            – receives the `SuperAdmin` tier. Hand the
    ///                        `Governor` tier to the Timelock and step back.
    /// * `reward_token`     – token paid out to stakers.
    /// * `dev_address`      – receives `dev_cut_bp` of every payout.
    /// * `fee_address`      – receives `harvest_fee_bp` of every payout and
    ///                        all deposit fees.
    /// * `tokens_per_block` – emission shared by all pools per ledger.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        dev_address: Address,
        fee_address: Address,
        tokens_per_block: i128,
    ) -> Result<(), ContractError> {
        if config::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        let cfg = EmissionConfig::new(
            reward_token.clone(),
            dev_address.clone(),
            fee_address.clone(),
            tokens_per_block,
        )?;
        config::store(&env, &cfg);
        admin_tiers::set_super_admin(&env, &admin);

        events::publish_initialized(
            &env,
            admin,
            reward_token,
            dev_address,
            fee_address,
            tokens_per_block,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` of the pool's token.
    ///
    /// Rewards already pending on an existing position are paid out first, so
    /// `amount == 0` is a plain harvest. The deposit fee, if any, is taken
    /// from `amount` before it is credited.
    pub fn deposit(env: Env, user: Address, pool: u32, amount: i128) -> Result<(), ContractError> {
        user.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        let cfg = config::load(&env)?;

        let mut info = registry::settle_pool(&env, pool, &cfg)?;
        let mut acct = account::load(&env, pool, &user);

        let pending = acct.pending(&env, info.acc_reward_per_share)?;
        pay_reward(&env, &cfg, &user, pool, pending)?;

        let mut deposit_fee = 0;
        if amount > 0 {
            pull(&env, &info.stake_token, &user, amount)?;

            deposit_fee = ledger::bp_share(amount, info.deposit_fee_bp)?;
            send(&env, &info.stake_token, &cfg.fee_address, deposit_fee)?;

            let credited = amount - deposit_fee;
            acct.credit(credited)?;
            info.total_staked = info
                .total_staked
                .checked_add(credited)
                .ok_or(ContractError::ArithmeticOverflow)?;
            registry::store_pool(&env, &info);
        }

        acct.sync_debt(&env, info.acc_reward_per_share);
        account::store(&env, pool, &user, &acct);

        events::publish_deposit(&env, user, pool, amount, deposit_fee, acct.amount);

        Ok(())
    }

    /// Unstake `amount`, paying out pending rewards on the way.
    pub fn withdraw(env: Env, user: Address, pool: u32, amount: i128) -> Result<(), ContractError> {
        user.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        let cfg = config::load(&env)?;

        let mut acct = account::load(&env, pool, &user);
        if amount > acct.amount {
            return Err(ContractError::InsufficientBalance);
        }

        let mut info = registry::settle_pool(&env, pool, &cfg)?;

        let pending = acct.pending(&env, info.acc_reward_per_share)?;
        pay_reward(&env, &cfg, &user, pool, pending)?;

        if amount > 0 {
            acct.debit(amount)?;
            info.total_staked -= amount;
            registry::store_pool(&env, &info);
            send(&env, &info.stake_token, &user, amount)?;
        }

        acct.sync_debt(&env, info.acc_reward_per_share);
        account::store(&env, pool, &user, &acct);

        events::publish_withdraw(&env, user, pool, amount, acct.amount);

        Ok(())
    }

    /// Pay out pending rewards without touching the stake. Returns the
    /// user's share after the fee and dev cuts.
    pub fn harvest(env: Env, user: Address, pool: u32) -> Result<i128, ContractError> {
        user.require_auth();
        let cfg = config::load(&env)?;

        let info = registry::settle_pool(&env, pool, &cfg)?;
        let mut acct = account::load(&env, pool, &user);

        let pending = acct.pending(&env, info.acc_reward_per_share)?;
        let split = pay_reward(&env, &cfg, &user, pool, pending)?;

        acct.sync_debt(&env, info.acc_reward_per_share);
        account::store(&env, pool, &user, &acct);

        Ok(split.user)
    }

    /// Return the whole stake immediately, forfeiting pending rewards.
    ///
    /// Accrual is never touched: the pool is not settled and nothing is paid,
    /// so the stake comes back even when settlement itself fails or the
    /// reward reserve is empty. The reported forfeit is measured at the last
    /// settlement and reads as zero if it cannot be represented.
    pub fn emergency_withdraw(env: Env, user: Address, pool: u32) -> Result<i128, ContractError> {
        user.require_auth();
        config::load(&env)?;

        let acct = account::load(&env, pool, &user);
        if acct.amount == 0 {
            return Err(ContractError::InsufficientBalance);
        }

        let mut info = registry::load_pool(&env, pool)?;
        let forfeited = acct
            .pending(&env, info.acc_reward_per_share)
            .unwrap_or(0);

        info.total_staked = info
            .total_staked
            .checked_sub(acct.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        registry::store_pool(&env, &info);
        account::remove(&env, pool, &user);
        send(&env, &info.stake_token, &user, acct.amount)?;

        events::publish_emergency_withdraw(&env, user, pool, acct.amount, forfeited);

        Ok(acct.amount)
    }

    /// Top up the reward reserve from `from`'s reward-token balance.
    pub fn fund_rewards(env: Env, from: Address, amount: i128) -> Result<i128, ContractError> {
        from.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let cfg = config::load(&env)?;

        match token::Client::new(&env, &cfg.reward_token).try_transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        ) {
            Ok(Ok(())) => {}
            _ => return Err(ContractError::TransferFailed),
        }

        let reserve = load_reserve(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        store_reserve(&env, reserve);

        events::publish_rewards_funded(&env, from, amount, reserve);

        Ok(reserve)
    }

    // ── Settlement ──────────────────────────────────────────────────────────

    /// Settle one pool up to the current ledger. Anyone may call this.
    pub fn update_pool(env: Env, pool: u32) -> Result<PoolInfo, ContractError> {
        let cfg = config::load(&env)?;
        registry::settle_pool(&env, pool, &cfg)
    }

    /// Settle every pool. Anyone may call this.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        let cfg = config::load(&env)?;
        registry::mass_update(&env, &cfg)
    }

    // ── Governance ──────────────────────────────────────────────────────────

    /// Register a new pool for `stake_token`. Requires the `Governor` tier.
    pub fn add_pool(
        env: Env,
        caller: Address,
        stake_token: Address,
        weight: u32,
        deposit_fee_bp: u32,
    ) -> Result<u32, ContractError> {
        let cfg = Self::require_governor(&env, &caller)?;
        config::validate_deposit_fee(deposit_fee_bp)?;

        registry::mass_update(&env, &cfg)?;
        let info = registry::create_pool(
            &env,
            stake_token.clone(),
            weight,
            deposit_fee_bp,
            env.ledger().sequence(),
        )?;

        events::publish_pool_added(&env, info.id, stake_token, weight, deposit_fee_bp);

        Ok(info.id)
    }

    /// Change a pool's weight and deposit fee. Every pool is settled at the
    /// old total weight first.
    pub fn set_pool_weight(
        env: Env,
        caller: Address,
        pool: u32,
        weight: u32,
        deposit_fee_bp: u32,
    ) -> Result<(), ContractError> {
        let cfg = Self::require_governor(&env, &caller)?;
        config::validate_deposit_fee(deposit_fee_bp)?;

        registry::mass_update(&env, &cfg)?;
        let mut info = registry::load_pool(&env, pool)?;
        info.deposit_fee_bp = deposit_fee_bp;
        registry::reweight(&env, &mut info, weight)?;

        events::publish_pool_set(
            &env,
            pool,
            weight,
            deposit_fee_bp,
            registry::total_weight(&env),
        );

        Ok(())
    }

    /// Change the emission rate. Blocks already elapsed keep the old rate.
    pub fn set_emission_rate(
        env: Env,
        caller: Address,
        tokens_per_block: i128,
    ) -> Result<(), ContractError> {
        let mut cfg = Self::require_governor(&env, &caller)?;
        config::validate_rate(tokens_per_block)?;

        registry::mass_update(&env, &cfg)?;
        cfg.tokens_per_block = tokens_per_block;
        config::store(&env, &cfg);

        events::publish_emission_rate_set(&env, tokens_per_block);

        Ok(())
    }

    /// Change the protocol cuts taken from each payout.
    pub fn set_reward_split(
        env: Env,
        caller: Address,
        harvest_fee_bp: u32,
        dev_cut_bp: u32,
    ) -> Result<(), ContractError> {
        let mut cfg = Self::require_governor(&env, &caller)?;
        config::validate_split(harvest_fee_bp, dev_cut_bp)?;

        cfg.harvest_fee_bp = harvest_fee_bp;
        cfg.dev_cut_bp = dev_cut_bp;
        config::store(&env, &cfg);

        events::publish_reward_split_set(&env, harvest_fee_bp, dev_cut_bp);

        Ok(())
    }

    pub fn set_dev_address(env: Env, caller: Address, dev_address: Address) -> Result<(), ContractError> {
        let mut cfg = Self::require_governor(&env, &caller)?;
        let old = core::mem::replace(&mut cfg.dev_address, dev_address.clone());
        config::store(&env, &cfg);

        events::publish_dev_address_set(&env, old, dev_address);

        Ok(())
    }

    pub fn set_fee_address(env: Env, caller: Address, fee_address: Address) -> Result<(), ContractError> {
        let mut cfg = Self::require_governor(&env, &caller)?;
        let old = core::mem::replace(&mut cfg.fee_address, fee_address.clone());
        config::store(&env, &cfg);

        events::publish_fee_address_set(&env, old, fee_address);

        Ok(())
    }

    // ── Ownership transfer (two-step) ──────────────────────────────────────

    /// Propose a new owner. Production hands ownership to the Timelock so the
    /// bootstrap key loses every tier once the Timelock accepts.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        config::load(&env)?;
        current_admin.require_auth();
        admin_tiers::require_tier(&env, &current_admin, &AdminTier::SuperAdmin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Complete a transfer. Only the proposed address may accept; the
    /// previous owner is stripped of its tier.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        config::load(&env)?;
        new_admin.require_auth();

        let pending: Option<Address> = env.storage().instance().get(&PENDING_ADMIN);
        if pending.as_ref() != Some(&new_admin) {
            return Err(ContractError::Unauthorized);
        }

        let old_admin =
            admin_tiers::get_super_admin(&env).ok_or(ContractError::NotInitialized)?;
        admin_tiers::replace_super_admin(&env, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin_tiers::get_super_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        config::load(&env)?;
        caller.require_auth();
        admin_tiers::promote_admin(&env, &caller, &target, tier)?;
        Ok(())
    }

    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        config::load(&env)?;
        caller.require_auth();
        admin_tiers::demote_admin(&env, &caller, &target)?;
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    pub fn list_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn pool_count(env: Env) -> u32 {
        registry::pool_count(&env)
    }

    pub fn get_pool(env: Env, pool: u32) -> Result<PoolInfo, ContractError> {
        registry::load_pool(&env, pool)
    }

    pub fn get_account(env: Env, pool: u32, user: Address) -> StakeAccount {
        account::load(&env, pool, &user)
    }

    /// Reward `user` could harvest from `pool` right now, before cuts.
    pub fn pending_reward(env: Env, pool: u32, user: Address) -> Result<i128, ContractError> {
        let cfg = config::load(&env)?;
        let info = registry::load_pool(&env, pool)?;
        let acc = registry::projected_acc(&env, &info, &cfg)?;
        account::load(&env, pool, &user).pending(&env, acc)
    }

    pub fn get_config(env: Env) -> Result<EmissionConfig, ContractError> {
        config::load(&env)
    }

    pub fn total_weight(env: Env) -> u64 {
        registry::total_weight(&env)
    }

    pub fn reward_reserve(env: Env) -> i128 {
        load_reserve(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::has_config(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Authenticate `caller`, check it holds at least `Governor`, and hand
    /// back the current config.
    fn require_governor(env: &Env, caller: &Address) -> Result<EmissionConfig, ContractError> {
        let cfg = config::load(env)?;
        caller.require_auth();
        admin_tiers::require_tier(env, caller, &AdminTier::Governor)?;
        Ok(cfg)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_governance;

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::ledger::RewardSplit;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub dev_address: Address,
    pub fee_address: Address,
    pub tokens_per_block: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool: u32,
    pub stake_token: Address,
    pub weight: u32,
    pub deposit_fee_bp: u32,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSetEvent {
    pub pool: u32,
    pub weight: u32,
    pub deposit_fee_bp: u32,
    pub total_weight: u64,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmissionRateSetEvent {
    pub tokens_per_block: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSplitSetEvent {
    pub harvest_fee_bp: u32,
    pub dev_cut_bp: u32,
    pub timestamp: u64,
}

/// Fired when either the dev or the fee address changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressSetEvent {
    pub old_address: Address,
    pub new_address: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub pool: u32,
    pub amount: i128,
    pub deposit_fee: i128,
    pub new_balance: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub pool: u32,
    pub amount: i128,
    pub new_balance: i128,
    pub block: u32,
}

/// Fired for every non-zero reward payout, whichever entry point caused it.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub user: Address,
    pub pool: u32,
    pub split: RewardSplit,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub user: Address,
    pub pool: u32,
    pub amount: i128,
    pub forfeited: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub from: Address,
    pub amount: i128,
    pub new_reserve: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_token: Address,
    dev_address: Address,
    fee_address: Address,
    tokens_per_block: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            dev_address,
            fee_address,
            tokens_per_block,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool: u32,
    stake_token: Address,
    weight: u32,
    deposit_fee_bp: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool),
        PoolAddedEvent {
            pool,
            stake_token,
            weight,
            deposit_fee_bp,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_set(env: &Env, pool: u32, weight: u32, deposit_fee_bp: u32, total_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool),
        PoolSetEvent {
            pool,
            weight,
            deposit_fee_bp,
            total_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_emission_rate_set(env: &Env, tokens_per_block: i128) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        EmissionRateSetEvent {
            tokens_per_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_split_set(env: &Env, harvest_fee_bp: u32, dev_cut_bp: u32) {
    env.events().publish(
        (symbol_short!("SPLIT_SET"),),
        RewardSplitSetEvent {
            harvest_fee_bp,
            dev_cut_bp,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_dev_address_set(env: &Env, old_address: Address, new_address: Address) {
    env.events().publish(
        (symbol_short!("DEV_SET"),),
        AddressSetEvent {
            old_address,
            new_address,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_address_set(env: &Env, old_address: Address, new_address: Address) {
    env.events().publish(
        (symbol_short!("FEE_SET"),),
        AddressSetEvent {
            old_address,
            new_address,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    user: Address,
    pool: u32,
    amount: i128,
    deposit_fee: i128,
    new_balance: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone(), pool),
        DepositEvent {
            user,
            pool,
            amount,
            deposit_fee,
            new_balance,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(env: &Env, user: Address, pool: u32, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone(), pool),
        WithdrawEvent {
            user,
            pool,
            amount,
            new_balance,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, user: Address, pool: u32, split: RewardSplit) {
    env.events().publish(
        (symbol_short!("HARVEST"), user.clone(), pool),
        RewardPaidEvent {
            user,
            pool,
            split,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(
    env: &Env,
    user: Address,
    pool: u32,
    amount: i128,
    forfeited: i128,
) {
    env.events().publish(
        (symbol_short!("EMERG_WD"), user.clone(), pool),
        EmergencyWithdrawEvent {
            user,
            pool,
            amount,
            forfeited,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, from: Address, amount: i128, new_reserve: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), from.clone()),
        RewardsFundedEvent {
            from,
            amount,
            new_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

extern crate std;

use common::admin_tiers::AdminTier;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    vec, Address, IntoVal, Symbol,
};
use timelock::{
    EntryStatus, ExecutionOutcome, TimelockContract, TimelockContractClient, TESTNET_DELAY,
};

use crate::test::{expect_err, setup};
use crate::{ContractError, MAX_DEPOSIT_FEE_BP, MAX_REWARD_CUT_BP};

// ── Access control ────────────────────────────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let farm = setup(100);
    assert_eq!(farm.client.get_admin_tier(&farm.admin), Some(AdminTier::SuperAdmin));
}

#[test]
fn test_non_governor_cannot_change_parameters() {
    let farm = setup(100);
    let token = farm.new_stake_token();
    let guardian = Address::generate(&farm.env);
    farm.client
        .promote_admin(&farm.admin, &guardian, &AdminTier::Guardian);

    expect_err(
        farm.client.try_add_pool(&guardian, &token, &1, &0),
        ContractError::Unauthorized,
    );
    expect_err(
        farm.client.try_set_emission_rate(&guardian, &5),
        ContractError::Unauthorized,
    );
    expect_err(
        farm.client.try_set_reward_split(&guardian, &0, &0),
        ContractError::Unauthorized,
    );
    expect_err(
        farm.client.try_set_dev_address(&guardian, &guardian),
        ContractError::Unauthorized,
    );
    expect_err(
        farm.client
            .try_promote_admin(&guardian, &guardian, &AdminTier::Governor),
        ContractError::Unauthorized,
    );
}

#[test]
fn test_governor_can_add_pools() {
    let farm = setup(100);
    let governor = Address::generate(&farm.env);
    farm.client
        .promote_admin(&farm.admin, &governor, &AdminTier::Governor);

    let token = farm.new_stake_token();
    assert_eq!(farm.client.add_pool(&governor, &token, &5, &0), 0);

    farm.client.demote_admin(&farm.admin, &governor);
    let other = farm.new_stake_token();
    expect_err(
        farm.client.try_add_pool(&governor, &other, &5, &0),
        ContractError::Unauthorized,
    );
}

#[test]
fn test_two_step_ownership_transfer() {
    let farm = setup(100);
    let next = Address::generate(&farm.env);
    let stranger = Address::generate(&farm.env);

    expect_err(farm.client.try_accept_admin(&next), ContractError::Unauthorized);
    expect_err(
        farm.client.try_propose_admin(&stranger, &stranger),
        ContractError::Unauthorized,
    );

    farm.client.propose_admin(&farm.admin, &next);
    assert_eq!(farm.client.get_pending_admin(), Some(next.clone()));
    expect_err(farm.client.try_accept_admin(&stranger), ContractError::Unauthorized);

    farm.client.accept_admin(&next);
    assert_eq!(farm.client.get_admin(), next);
    assert_eq!(farm.client.get_pending_admin(), None);
    assert_eq!(farm.client.get_admin_tier(&next), Some(AdminTier::SuperAdmin));
    assert_eq!(farm.client.get_admin_tier(&farm.admin), None);
    assert_eq!(farm.client.list_admins(), vec![&farm.env, next.clone()]);
}

// ── Pools ─────────────────────────────────────────────────────────────────────

#[test]
fn test_add_pool_validation() {
    let farm = setup(100);
    let token = farm.new_stake_token();

    expect_err(
        farm.client
            .try_add_pool(&farm.admin, &token, &1, &(MAX_DEPOSIT_FEE_BP + 1)),
        ContractError::FeeTooHigh,
    );

    farm.add_pool(&token, 1);
    expect_err(
        farm.client.try_add_pool(&farm.admin, &token, &1, &0),
        ContractError::PoolAlreadyExists,
    );
    assert_eq!(farm.client.pool_count(), 1);
}

#[test]
fn test_set_pool_weight_settles_old_window_first() {
    let farm = setup(100);
    let token_a = farm.new_stake_token();
    let token_b = farm.new_stake_token();
    let alice = Address::generate(&farm.env);
    let bob = Address::generate(&farm.env);

    let pool_a = farm.add_pool(&token_a, 1);
    let pool_b = farm.add_pool(&token_b, 1);

    farm.at_block(10);
    farm.deposit(pool_a, &token_a, &alice, 1_000);
    farm.deposit(pool_b, &token_b, &bob, 1_000);

    farm.at_block(20);
    farm.client.set_pool_weight(&farm.admin, &pool_a, &3, &0);
    assert_eq!(farm.client.total_weight(), 4);
    assert_eq!(farm.client.get_pool(&pool_b).last_settled, 20);

    // Blocks 10..20 at 1:1, blocks 20..30 at 3:1.
    farm.at_block(30);
    assert_eq!(farm.client.pending_reward(&pool_a, &alice), 500 + 750);
    assert_eq!(farm.client.pending_reward(&pool_b, &bob), 500 + 250);
}

#[test]
fn test_zero_weight_pool_stops_earning() {
    let farm = setup(100);
    let token = farm.new_stake_token();
    let user = Address::generate(&farm.env);

    let pool = farm.add_pool(&token, 1);
    farm.at_block(10);
    farm.deposit(pool, &token, &user, 1_000);

    farm.at_block(20);
    farm.client.set_pool_weight(&farm.admin, &pool, &0, &0);
    assert_eq!(farm.client.total_weight(), 0);

    farm.at_block(40);
    assert_eq!(farm.client.pending_reward(&pool, &user), 1_000);

    farm.client.withdraw(&user, &pool, &1_000);
    assert_eq!(farm.balance(&farm.reward_token, &user), 900);
    assert_eq!(farm.balance(&token, &user), 1_000);
}

#[test]
fn test_set_pool_weight_unknown_pool() {
    let farm = setup(100);
    expect_err(
        farm.client.try_set_pool_weight(&farm.admin, &7, &1, &0),
        ContractError::PoolNotFound,
    );
}

// ── Emission ──────────────────────────────────────────────────────────────────

#[test]
fn test_rate_change_applies_to_future_blocks_only() {
    let farm = setup(100);
    let token = farm.new_stake_token();
    let user = Address::generate(&farm.env);

    let pool = farm.add_pool(&token, 1);
    farm.at_block(10);
    farm.deposit(pool, &token, &user, 1_000);

    farm.at_block(20);
    farm.client.set_emission_rate(&farm.admin, &50);
    assert_eq!(farm.client.get_config().tokens_per_block, 50);

    farm.at_block(30);
    assert_eq!(farm.client.pending_reward(&pool, &user), 1_000 + 500);

    expect_err(
        farm.client.try_set_emission_rate(&farm.admin, &-1),
        ContractError::InvalidInput,
    );
}

#[test]
fn test_reward_split_and_addresses() {
    let farm = setup(1_000);
    let token = farm.new_stake_token();
    let user = Address::generate(&farm.env);
    let new_dev = Address::generate(&farm.env);
    let new_fee = Address::generate(&farm.env);

    expect_err(
        farm.client
            .try_set_reward_split(&farm.admin, &MAX_REWARD_CUT_BP, &1),
        ContractError::FeeTooHigh,
    );

    farm.client.set_reward_split(&farm.admin, &500, &500);
    farm.client.set_dev_address(&farm.admin, &new_dev);
    farm.client.set_fee_address(&farm.admin, &new_fee);

    let pool = farm.add_pool(&token, 1);
    farm.at_block(10);
    farm.deposit(pool, &token, &user, 1_000);
    farm.at_block(20);

    assert_eq!(farm.client.harvest(&user, &pool), 9_000);
    assert_eq!(farm.balance(&farm.reward_token, &new_fee), 500);
    assert_eq!(farm.balance(&farm.reward_token, &new_dev), 500);
    assert_eq!(farm.balance(&farm.reward_token, &farm.dev), 0);
}

// ── Timelock-gated governance ─────────────────────────────────────────────────

#[test]
fn test_emission_change_through_timelock() {
    let farm = setup(100);
    farm.env.ledger().set_timestamp(1_000);

    let timelock_id = farm.env.register(TimelockContract, ());
    let timelock = TimelockContractClient::new(&farm.env, &timelock_id);
    timelock.initialize(&farm.admin, &TESTNET_DELAY, &None);

    // The timelock becomes the farm's governor.
    farm.client
        .promote_admin(&farm.admin, &timelock_id, &AdminTier::Governor);

    let eta = 1_000 + TESTNET_DELAY;
    let id = timelock.queue(
        &farm.admin,
        &farm.client.address,
        &Symbol::new(&farm.env, "set_emission_rate"),
        &vec![
            &farm.env,
            timelock_id.into_val(&farm.env),
            50i128.into_val(&farm.env),
        ],
        &eta,
    );

    farm.env.ledger().set_timestamp(eta - 1);
    match timelock.try_execute(&farm.admin, &id) {
        Err(Ok(e)) => assert_eq!(e, timelock::ContractError::NotYetEligible),
        other => unreachable!("expected NotYetEligible, got {:?}", other),
    }
    assert_eq!(farm.client.get_config().tokens_per_block, 100);

    farm.env.ledger().set_timestamp(eta);
    match timelock.execute(&farm.admin, &id) {
        ExecutionOutcome::Returned(_) => {}
        other => unreachable!("expected Returned, got {:?}", other),
    }
    assert_eq!(farm.client.get_config().tokens_per_block, 50);
}

#[test]
fn test_rejected_change_through_timelock_is_recorded() {
    let farm = setup(100);
    farm.env.ledger().set_timestamp(1_000);

    let timelock_id = farm.env.register(TimelockContract, ());
    let timelock = TimelockContractClient::new(&farm.env, &timelock_id);
    timelock.initialize(&farm.admin, &TESTNET_DELAY, &None);
    farm.client
        .promote_admin(&farm.admin, &timelock_id, &AdminTier::Governor);

    let eta = 1_000 + TESTNET_DELAY;
    let id = timelock.queue(
        &farm.admin,
        &farm.client.address,
        &Symbol::new(&farm.env, "set_reward_split"),
        &vec![
            &farm.env,
            timelock_id.into_val(&farm.env),
            MAX_REWARD_CUT_BP.into_val(&farm.env),
            1u32.into_val(&farm.env),
        ],
        &eta,
    );

    farm.env.ledger().set_timestamp(eta);
    match timelock.execute(&farm.admin, &id) {
        ExecutionOutcome::Reverted(code) => assert_eq!(code, ContractError::FeeTooHigh as u32),
        other => unreachable!("expected Reverted, got {:?}", other),
    }

    assert_eq!(timelock.get_entry(&id).status, EntryStatus::Executed);
    let cfg = farm.client.get_config();
    assert_eq!(cfg.harvest_fee_bp + cfg.dev_cut_bp, 1_000);
}

#[test]
fn test_ownership_handed_to_timelock_locks_out_bootstrap_key() {
    let farm = setup(100);
    farm.env.ledger().set_timestamp(1_000);

    let timelock_id = farm.env.register(TimelockContract, ());
    let timelock = TimelockContractClient::new(&farm.env, &timelock_id);
    timelock.initialize(&farm.admin, &TESTNET_DELAY, &None);

    farm.client.propose_admin(&farm.admin, &timelock_id);

    let eta = 1_000 + TESTNET_DELAY;
    let id = timelock.queue(
        &farm.admin,
        &farm.client.address,
        &Symbol::new(&farm.env, "accept_admin"),
        &vec![&farm.env, timelock_id.into_val(&farm.env)],
        &eta,
    );
    farm.env.ledger().set_timestamp(eta);
    match timelock.execute(&farm.admin, &id) {
        ExecutionOutcome::Returned(_) => {}
        other => unreachable!("expected Returned, got {:?}", other),
    }

    assert_eq!(farm.client.get_admin(), timelock_id);
    assert_eq!(farm.client.get_admin_tier(&farm.admin), None);

    // Every parameter change now has to pass the delay.
    expect_err(
        farm.client.try_set_emission_rate(&farm.admin, &5),
        ContractError::Unauthorized,
    );
    expect_err(
        farm.client.try_set_pool_weight(&farm.admin, &0, &1, &0),
        ContractError::Unauthorized,
    );
    expect_err(
        farm.client
            .try_promote_admin(&farm.admin, &farm.admin, &AdminTier::Governor),
        ContractError::Unauthorized,
    );
    assert_eq!(farm.client.get_config().tokens_per_block, 100);
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shepherd::{ShepherdContract, ShepherdContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Advance { blocks: u8 },
    Deposit { pool: u8, amount: u64 },
    Withdraw { pool: u8, amount: u64 },
    Harvest { pool: u8 },
    EmergencyWithdraw { pool: u8 },
    SetWeight { pool: u8, weight: u16 },
    SetRate { rate: u64 },
}

const RESERVE: i128 = 1_000_000_000_000_000_000;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let reward_token = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let contract_id = env.register(ShepherdContract, ());
    let client = ShepherdContractClient::new(&env, &contract_id);
    client.initialize(&admin, &reward_token, &admin, &admin, &1_000i128);

    StellarAssetClient::new(&env, &reward_token).mint(&admin, &RESERVE);
    client.fund_rewards(&admin, &RESERVE);

    let mut tokens = Vec::new();
    for weight in [1u32, 3] {
        let token = env
            .register_stellar_asset_contract_v2(admin.clone())
            .address();
        client.add_pool(&admin, &token, &weight, &0);
        tokens.push(token);
    }

    let mut users = Vec::new();
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }

    // Looking for panics: every rejection must come back as a typed error.
    let mut block = env.ledger().sequence();
    for (i, action) in actions.into_iter().enumerate() {
        let user = &users[i % users.len()];
        match action {
            FuzzAction::Advance { blocks } => {
                block = block.saturating_add(blocks as u32);
                env.ledger().set_sequence_number(block);
            }
            FuzzAction::Deposit { pool, amount } => {
                let pool = pool as u32;
                let amt = amount as i128;
                if let Some(token) = tokens.get(pool as usize) {
                    StellarAssetClient::new(&env, token).mint(user, &amt);
                    TokenClient::new(&env, token).approve(user, &contract_id, &amt, &1_000_000);
                }
                let _ = client.try_deposit(user, &pool, &amt);
            }
            FuzzAction::Withdraw { pool, amount } => {
                let _ = client.try_withdraw(user, &(pool as u32), &(amount as i128));
            }
            FuzzAction::Harvest { pool } => {
                let _ = client.try_harvest(user, &(pool as u32));
            }
            FuzzAction::EmergencyWithdraw { pool } => {
                let _ = client.try_emergency_withdraw(user, &(pool as u32));
            }
            FuzzAction::SetWeight { pool, weight } => {
                let _ = client.try_set_pool_weight(&admin, &(pool as u32), &(weight as u32), &0);
            }
            FuzzAction::SetRate { rate } => {
                let _ = client.try_set_emission_rate(&admin, &(rate as i128));
            }
        }
    }

    assert!(client.reward_reserve() >= 0);
    for pool in 0..client.pool_count() {
        assert!(client.get_pool(&pool).total_staked >= 0);
    }
});

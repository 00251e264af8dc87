#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    vec, Address, Env, Symbol,
};
use timelock::{EntryStatus, TimelockContract, TimelockContractClient, TESTNET_DELAY};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Advance { seconds: u32 },
    Queue { extra_delay: u32 },
    Execute { id: u8 },
    Cancel { id: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let admin = Address::generate(&env);
    let contract_id = env.register(TimelockContract, ());
    let client = TimelockContractClient::new(&env, &contract_id);
    client.initialize(&admin, &TESTNET_DELAY, &None);

    // Queued calls hit a read-only token view.
    let target = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let function = Symbol::new(&env, "decimals");

    // Ids whose first successful execute or cancel has been observed.
    let mut resolved = Vec::new();
    let mut now = 1_000u64;
    for action in actions {
        match action {
            FuzzAction::Advance { seconds } => {
                now = now.saturating_add(seconds as u64);
                env.ledger().set_timestamp(now);
            }
            FuzzAction::Queue { extra_delay } => {
                let eta = now + TESTNET_DELAY + extra_delay as u64;
                let _ = client.try_queue(&admin, &target, &function, &vec![&env], &eta);
            }
            FuzzAction::Execute { id } => {
                let id = id as u64;
                if client.try_execute(&admin, &id).is_ok() {
                    assert!(!resolved.contains(&id), "entry {} executed twice", id);
                    resolved.push(id);
                }
            }
            FuzzAction::Cancel { id } => {
                let id = id as u64;
                if client.try_cancel(&admin, &id).is_ok() {
                    assert!(!resolved.contains(&id), "entry {} resolved twice", id);
                    resolved.push(id);
                }
            }
        }
    }

    for id in resolved {
        assert_ne!(client.get_entry(&id).status, EntryStatus::Queued);
    }
});

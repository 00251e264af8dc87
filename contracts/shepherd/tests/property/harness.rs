use proptest_derive::Arbitrary;
use shepherd::{ShepherdContract, ShepherdContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

pub const USERS: usize = 3;
pub const POOLS: u32 = 2;
pub const START_BLOCK: u32 = 1;
pub const RESERVE: i128 = 1_000_000_000_000_000;

/// One step of a randomly generated farm session.
#[derive(Arbitrary, Debug, Clone)]
pub enum Action {
    Advance(#[proptest(strategy = "1u32..20")] u32),
    Deposit {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
        #[proptest(strategy = "0i128..10_000")]
        amount: i128,
    },
    Withdraw {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
        #[proptest(strategy = "0i128..=100")]
        percent: i128,
    },
    Harvest {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
    },
    EmergencyWithdraw {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0u32..POOLS")]
        pool: u32,
    },
}

pub struct Harness {
    pub env: Env,
    pub client: ShepherdContractClient<'static>,
    pub reward_token: Address,
    pub stake_tokens: std::vec::Vec<Address>,
    pub users: std::vec::Vec<Address>,
    pub dev: Address,
    pub fee: Address,
    pub block: u32,
}

impl Harness {
    /// A funded farm emitting `rate` per block with `POOLS` pools of the given
    /// weights, all created at `START_BLOCK`.
    pub fn new(rate: i128, weights: [u32; POOLS as usize]) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_sequence_number(START_BLOCK);

        let reward_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let client = ShepherdContractClient::new(&env, &env.register(ShepherdContract, ()));

        let admin = Address::generate(&env);
        let dev = Address::generate(&env);
        let fee = Address::generate(&env);
        client.initialize(&admin, &reward_token, &dev, &fee, &rate);

        let funder = Address::generate(&env);
        StellarAssetClient::new(&env, &reward_token).mint(&funder, &RESERVE);
        client.fund_rewards(&funder, &RESERVE);

        let mut stake_tokens = std::vec::Vec::new();
        for weight in weights {
            let token = env
                .register_stellar_asset_contract_v2(Address::generate(&env))
                .address();
            client.add_pool(&admin, &token, &weight, &0);
            stake_tokens.push(token);
        }

        let users = (0..USERS).map(|_| Address::generate(&env)).collect();

        Self {
            env,
            client,
            reward_token,
            stake_tokens,
            users,
            dev,
            fee,
            block: START_BLOCK,
        }
    }

    pub fn advance(&mut self, blocks: u32) {
        self.block += blocks;
        self.env.ledger().set_sequence_number(self.block);
    }

    pub fn apply(&mut self, action: &Action) {
        match *action {
            Action::Advance(blocks) => self.advance(blocks),
            Action::Deposit { user, pool, amount } => {
                let who = self.users[user].clone();
                let token = self.stake_tokens[pool as usize].clone();
                if amount > 0 {
                    StellarAssetClient::new(&self.env, &token).mint(&who, &amount);
                    TokenClient::new(&self.env, &token).approve(
                        &who,
                        &self.client.address,
                        &amount,
                        &100_000,
                    );
                }
                self.client.deposit(&who, &pool, &amount);
            }
            Action::Withdraw { user, pool, percent } => {
                let who = self.users[user].clone();
                let staked = self.client.get_account(&pool, &who).amount;
                self.client.withdraw(&who, &pool, &(staked * percent / 100));
            }
            Action::Harvest { user, pool } => {
                let who = self.users[user].clone();
                self.client.harvest(&who, &pool);
            }
            Action::EmergencyWithdraw { user, pool } => {
                let who = self.users[user].clone();
                if self.client.get_account(&pool, &who).amount > 0 {
                    self.client.emergency_withdraw(&who, &pool);
                }
            }
        }
    }

    pub fn reward_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(who)
    }

    /// Reward paid out so far, across users, the fee address and the dev
    /// address.
    pub fn total_paid(&self) -> i128 {
        RESERVE - self.client.reward_reserve()
    }

    pub fn total_pending(&self) -> i128 {
        let mut sum = 0;
        for pool in 0..POOLS {
            for user in &self.users {
                sum += self.client.pending_reward(&pool, user);
            }
        }
        sum
    }
}

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::errors::ContractError;
use crate::ledger;

const ACCOUNT: Symbol = symbol_short!("ACCT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// A user's position in one pool.
///
/// `reward_debt` always equals `amount × acc_reward_per_share / PRECISION`
/// as of the last settlement that touched this account, which makes the
/// pending reward a pure function of stored state. It is kept at 256 bits:
/// see [`ledger`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeAccount {
    pub amount: i128,
    pub reward_debt: I256,
}

impl StakeAccount {
    pub fn empty(env: &Env) -> Self {
        StakeAccount {
            amount: 0,
            reward_debt: I256::from_i32(env, 0),
        }
    }

    pub fn pending(&self, env: &Env, acc_reward_per_share: i128) -> Result<i128, ContractError> {
        ledger::pending(env, self.amount, acc_reward_per_share, &self.reward_debt)
    }

    pub fn sync_debt(&mut self, env: &Env, acc_reward_per_share: i128) {
        self.reward_debt = ledger::reward_debt(env, self.amount, acc_reward_per_share);
    }

    pub fn credit(&mut self, amount: i128) -> Result<(), ContractError> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount > self.amount {
            return Err(ContractError::InsufficientBalance);
        }
        self.amount -= amount;
        Ok(())
    }
}

fn account_key(pool: u32, user: &Address) -> (Symbol, u32, Address) {
    (ACCOUNT, pool, user.clone())
}

/// Missing accounts read as empty.
pub fn load(env: &Env, pool: u32, user: &Address) -> StakeAccount {
    env.storage()
        .persistent()
        .get(&account_key(pool, user))
        .unwrap_or_else(|| StakeAccount::empty(env))
}

/// Persist `account`, dropping the entry once nothing is staked. A synced
/// empty account carries no debt.
pub fn store(env: &Env, pool: u32, user: &Address, account: &StakeAccount) {
    if account.amount == 0 {
        remove(env, pool, user);
        return;
    }
    let key = account_key(pool, user);
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove(env: &Env, pool: u32, user: &Address) {
    env.storage().persistent().remove(&account_key(pool, user));
}

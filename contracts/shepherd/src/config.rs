use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

/// One whole token per block, at 18 decimals.
pub const DEFAULT_TOKENS_PER_BLOCK: i128 = 1_000_000_000_000_000_000;
/// Cut of every payout sent to the fee address (1%).
pub const DEFAULT_HARVEST_FEE_BP: u32 = 100;
/// Cut of every payout sent to the dev address (9%).
pub const DEFAULT_DEV_CUT_BP: u32 = 900;
/// Ceiling on `harvest_fee_bp + dev_cut_bp`.
pub const MAX_REWARD_CUT_BP: u32 = 2_000;
/// Ceiling on a pool's deposit fee.
pub const MAX_DEPOSIT_FEE_BP: u32 = 400;

/// Farm-wide emission settings. Written by `initialize` and afterwards only
/// through the governor-gated setters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmissionConfig {
    pub reward_token: Address,
    pub dev_address: Address,
    pub fee_address: Address,
    pub tokens_per_block: i128,
    pub harvest_fee_bp: u32,
    pub dev_cut_bp: u32,
}

impl EmissionConfig {
    pub fn new(
        reward_token: Address,
        dev_address: Address,
        fee_address: Address,
        tokens_per_block: i128,
    ) -> Result<Self, ContractError> {
        validate_rate(tokens_per_block)?;
        Ok(Self {
            reward_token,
            dev_address,
            fee_address,
            tokens_per_block,
            harvest_fee_bp: DEFAULT_HARVEST_FEE_BP,
            dev_cut_bp: DEFAULT_DEV_CUT_BP,
        })
    }
}

pub fn validate_rate(tokens_per_block: i128) -> Result<(), ContractError> {
    if tokens_per_block < 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_split(harvest_fee_bp: u32, dev_cut_bp: u32) -> Result<(), ContractError> {
    match harvest_fee_bp.checked_add(dev_cut_bp) {
        Some(total) if total <= MAX_REWARD_CUT_BP => Ok(()),
        _ => Err(ContractError::FeeTooHigh),
    }
}

pub fn validate_deposit_fee(deposit_fee_bp: u32) -> Result<(), ContractError> {
    if deposit_fee_bp > MAX_DEPOSIT_FEE_BP {
        return Err(ContractError::FeeTooHigh);
    }
    Ok(())
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<EmissionConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, config: &EmissionConfig) {
    env.storage().instance().set(&CONFIG, config);
}

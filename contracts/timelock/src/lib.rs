#![no_std]

pub mod events;

use common::admin_tiers::{self, AdminTier};
use common::CommonError;
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, InvokeError, Symbol, Val,
    Vec,
};

// ── Delay presets ────────────────────────────────────────────────────────────

/// Six hours: the delay the production deployment is constructed with.
pub const MAINNET_DELAY: u64 = 21_600;
/// One minute, for test networks.
pub const TESTNET_DELAY: u64 = 60;
/// Upper bound accepted by `initialize` (30 days).
pub const MAXIMUM_DELAY: u64 = 30 * 24 * 60 * 60;
/// Staleness window callers are expected to pass when they want one (14 days).
pub const DEFAULT_GRACE_PERIOD: u64 = 14 * 24 * 60 * 60;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const DELAY: Symbol = symbol_short!("DELAY");
const GRACE: Symbol = symbol_short!("GRACE");
const ENTRY_CTR: Symbol = symbol_short!("ENT_CTR");
const ENTRY: Symbol = symbol_short!("ENTRY");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidDelay = 4,
    DelayTooShort = 5,
    NotYetEligible = 6,
    NotFound = 7,
    AlreadyResolved = 8,
    StaleQueued = 9,
    ArithmeticOverflow = 10,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::AccessDenied | CommonError::InvalidInput => ContractError::Unauthorized,
            CommonError::NotFound => ContractError::NotFound,
            CommonError::ArithmeticOverflow => ContractError::ArithmeticOverflow,
        }
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryStatus {
    Queued,
    Executed,
    Cancelled,
}

/// A privileged call waiting out the delay.
///
/// Once `status` leaves `Queued` the entry is never written again.
#[contracttype]
#[derive(Clone, Debug)]
pub struct TimelockEntry {
    pub id: u64,
    pub target: Address,
    pub function: Symbol,
    pub args: Vec<Val>,
    pub queued_at: u64,
    pub eta: u64,
    pub status: EntryStatus,
}

/// What happened when an executed entry called its target.
///
/// A failing target does not fail `execute`: the entry stays `Executed` and
/// the failure is reported here and in an `EXEC_FAIL` event.
#[contracttype]
#[derive(Clone, Debug)]
pub enum ExecutionOutcome {
    /// The target returned normally. Holds the single returned value.
    Returned(Vec<Val>),
    /// The target returned a contract error with this code.
    Reverted(u32),
    /// The target panicked or trapped.
    Aborted,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TimelockContract;

#[contractimpl]
impl TimelockContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the timelock.
    ///
    /// * `admin`        – receives the `SuperAdmin` tier.
    /// * `delay`        – minimum seconds between `queue` and `execute`. There
    ///                    is deliberately no setter.
    /// * `grace_period` – `Some(g)` makes entries unexecutable once
    ///                    `now > eta + g`; `None` keeps them valid forever.
    pub fn initialize(
        env: Env,
        admin: Address,
        delay: u64,
        grace_period: Option<u64>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if delay == 0 || delay > MAXIMUM_DELAY {
            return Err(ContractError::InvalidDelay);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&DELAY, &delay);
        if let Some(grace) = grace_period {
            env.storage().instance().set(&GRACE, &grace);
        }
        admin_tiers::set_super_admin(&env, &admin);

        events::publish_initialized(&env, admin, delay, grace_period);

        Ok(())
    }

    // ── Queue lifecycle ─────────────────────────────────────────────────────

    /// Queue `target.function(args)` for execution at or after `eta`.
    ///
    /// Requires the `Governor` tier and `eta >= now + delay`.
    pub fn queue(
        env: Env,
        caller: Address,
        target: Address,
        function: Symbol,
        args: Vec<Val>,
        eta: u64,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin_tiers::require_tier(&env, &caller, &AdminTier::Governor)?;

        let now = env.ledger().timestamp();
        let earliest = now
            .checked_add(Self::load_delay(&env)?)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if eta < earliest {
            return Err(ContractError::DelayTooShort);
        }

        let id = Self::next_entry_id(&env)?;
        let entry = TimelockEntry {
            id,
            target: target.clone(),
            function: function.clone(),
            args,
            queued_at: now,
            eta,
            status: EntryStatus::Queued,
        };
        Self::store_entry(&env, &entry);

        events::publish_queued(&env, id, target, function, eta);

        Ok(id)
    }

    /// Execute a queued entry whose `eta` has arrived.
    ///
    /// The entry is marked `Executed` before the target is called and stays
    /// that way whatever the target does; a failed target call is reported
    /// through [`ExecutionOutcome`] rather than as an error so the marker is
    /// not rolled back.
    pub fn execute(env: Env, caller: Address, id: u64) -> Result<ExecutionOutcome, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin_tiers::require_tier(&env, &caller, &AdminTier::Governor)?;

        let mut entry = Self::load_entry(&env, id).ok_or(ContractError::NotFound)?;
        if entry.status != EntryStatus::Queued {
            return Err(ContractError::NotFound);
        }

        let now = env.ledger().timestamp();
        if now < entry.eta {
            return Err(ContractError::NotYetEligible);
        }
        if Self::is_stale(&env, &entry, now) {
            return Err(ContractError::StaleQueued);
        }

        // Effects before the interaction.
        entry.status = EntryStatus::Executed;
        Self::store_entry(&env, &entry);

        let outcome = match env.try_invoke_contract::<Val, InvokeError>(
            &entry.target,
            &entry.function,
            entry.args.clone(),
        ) {
            Ok(Ok(value)) => ExecutionOutcome::Returned(Vec::from_array(&env, [value])),
            Ok(Err(_)) => ExecutionOutcome::Aborted,
            Err(Ok(InvokeError::Contract(code))) => ExecutionOutcome::Reverted(code),
            Err(_) => ExecutionOutcome::Aborted,
        };

        match &outcome {
            ExecutionOutcome::Returned(_) => {
                events::publish_executed(&env, id, entry.target, entry.function)
            }
            ExecutionOutcome::Reverted(code) => {
                events::publish_execution_failed(&env, id, entry.target, entry.function, *code)
            }
            ExecutionOutcome::Aborted => {
                events::publish_execution_failed(&env, id, entry.target, entry.function, 0)
            }
        }

        Ok(outcome)
    }

    /// Cancel a queued entry. Requires at least the `Guardian` tier.
    pub fn cancel(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin_tiers::require_tier(&env, &caller, &AdminTier::Guardian)?;

        let mut entry = Self::load_entry(&env, id).ok_or(ContractError::NotFound)?;
        if entry.status != EntryStatus::Queued {
            return Err(ContractError::AlreadyResolved);
        }

        entry.status = EntryStatus::Cancelled;
        Self::store_entry(&env, &entry);

        events::publish_cancelled(&env, id, caller);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_entry(env: Env, id: u64) -> Result<TimelockEntry, ContractError> {
        Self::load_entry(&env, id).ok_or(ContractError::NotFound)
    }

    /// True when `execute(id)` would pass every timing and status check.
    pub fn is_executable(env: Env, id: u64) -> bool {
        let Some(entry) = Self::load_entry(&env, id) else {
            return false;
        };
        let now = env.ledger().timestamp();
        entry.status == EntryStatus::Queued && now >= entry.eta && !Self::is_stale(&env, &entry, now)
    }

    pub fn get_delay(env: Env) -> Result<u64, ContractError> {
        Self::load_delay(&env)
    }

    pub fn get_grace_period(env: Env) -> Option<u64> {
        env.storage().instance().get(&GRACE)
    }

    /// Number of entries ever queued; handles run from 1 to this value.
    pub fn entry_count(env: Env) -> u64 {
        env.storage().instance().get(&ENTRY_CTR).unwrap_or(0)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin_tiers::get_super_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new bootstrap admin. The proposed address must call
    /// `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        admin_tiers::require_tier(&env, &current_admin, &AdminTier::SuperAdmin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NotFound)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = admin_tiers::get_super_admin(&env).ok_or(ContractError::NotInitialized)?;
        admin_tiers::replace_super_admin(&env, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin_tiers::promote_admin(&env, &caller, &target, tier)?;
        Ok(())
    }

    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
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

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn load_delay(env: &Env) -> Result<u64, ContractError> {
        env.storage()
            .instance()
            .get(&DELAY)
            .ok_or(ContractError::NotInitialized)
    }

    fn is_stale(env: &Env, entry: &TimelockEntry, now: u64) -> bool {
        let grace: Option<u64> = env.storage().instance().get(&GRACE);
        match grace {
            Some(g) => now > entry.eta.saturating_add(g),
            None => false,
        }
    }

    fn next_entry_id(env: &Env) -> Result<u64, ContractError> {
        let current: u64 = env.storage().instance().get(&ENTRY_CTR).unwrap_or(0);
        let next = current
            .checked_add(1)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().instance().set(&ENTRY_CTR, &next);
        Ok(next)
    }

    fn load_entry(env: &Env, id: u64) -> Option<TimelockEntry> {
        env.storage().persistent().get(&(ENTRY, id))
    }

    fn store_entry(env: &Env, entry: &TimelockEntry) {
        let key = (ENTRY, entry.id);
        env.storage().persistent().set(&key, entry);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

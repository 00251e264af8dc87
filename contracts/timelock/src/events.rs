#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the timelock is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub delay: u64,
    pub grace_period: Option<u64>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueuedEvent {
    pub id: u64,
    pub target: Address,
    pub function: Symbol,
    pub eta: u64,
    pub timestamp: u64,
}

/// Fired when an entry is executed, whether or not its target succeeded.
/// `error_code` is `None` on success.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutedEvent {
    pub id: u64,
    pub target: Address,
    pub function: Symbol,
    pub error_code: Option<u32>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CancelledEvent {
    pub id: u64,
    pub cancelled_by: Address,
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

pub fn publish_initialized(env: &Env, admin: Address, delay: u64, grace_period: Option<u64>) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            delay,
            grace_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_queued(env: &Env, id: u64, target: Address, function: Symbol, eta: u64) {
    env.events().publish(
        (symbol_short!("QUEUED"), id),
        QueuedEvent {
            id,
            target,
            function,
            eta,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_executed(env: &Env, id: u64, target: Address, function: Symbol) {
    env.events().publish(
        (symbol_short!("EXECUTED"), id),
        ExecutedEvent {
            id,
            target,
            function,
            error_code: None,
            timestamp: env.ledger().timestamp(),
        },
    );
}

/// `error_code` is 0 when the target aborted without a contract error.
pub fn publish_execution_failed(
    env: &Env,
    id: u64,
    target: Address,
    function: Symbol,
    error_code: u32,
) {
    env.events().publish(
        (symbol_short!("EXEC_FAIL"), id),
        ExecutedEvent {
            id,
            target,
            function,
            error_code: Some(error_code),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_cancelled(env: &Env, id: u64, cancelled_by: Address) {
    env.events().publish(
        (symbol_short!("CANCELLED"), id),
        CancelledEvent {
            id,
            cancelled_by,
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

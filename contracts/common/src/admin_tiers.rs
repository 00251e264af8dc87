use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val, Vec};

use crate::CommonError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ADMIN_TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");
const SUPER_ADMIN: Symbol = symbol_short!("S_ADMIN");
const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Governance roles shared by the Timelock and the Shepherd.
///
/// - `Guardian`   – May veto: cancel queued Timelock entries. Nothing else.
/// - `Governor`   – May queue and execute Timelock entries and change farm
///                  parameters (pools, emission rate, fee split, addresses).
///                  In production the Timelock contract itself is the only
///                  Shepherd governor.
/// - `SuperAdmin` – Everything above, plus assigning and removing roles.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    Guardian = 1,
    Governor = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::Guardian => 1,
            AdminTier::Governor => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// Returns true if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn admin_tier_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_TIER_PREFIX, admin.clone())
}

fn extend_ttl<K: IntoVal<Env, Val>>(env: &Env, key: &K) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Assigns a tier to `admin` and records it in the admin list.
/// Callers must verify authorization beforehand.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = admin_tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    extend_ttl(env, &key);
    track_admin(env, admin);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = admin_tier_key(admin);
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        extend_ttl(env, &key);
    }
    tier
}

/// Checks `caller` against the role table.
///
/// # Errors
/// [`CommonError::AccessDenied`] if the caller holds no tier or a tier below
/// `min_tier`.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> Result<(), CommonError> {
    match get_admin_tier(env, caller) {
        Some(tier) if tier.has_at_least(min_tier) => Ok(()),
        _ => Err(CommonError::AccessDenied),
    }
}

// ── SuperAdmin Registry ──────────────────────────────────────────────────────

/// Records the bootstrap admin during `initialize` and grants it SuperAdmin.
pub fn set_super_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&SUPER_ADMIN, admin);
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&SUPER_ADMIN)
}

/// Moves the bootstrap-admin record to `new_admin`, granting it SuperAdmin and
/// stripping every tier from the previous holder.
pub fn replace_super_admin(env: &Env, new_admin: &Address) {
    if let Some(old) = get_super_admin(env) {
        if old != *new_admin {
            remove_admin_tier(env, &old);
        }
    }
    set_super_admin(env, new_admin);
}

// ── Promote / Demote ─────────────────────────────────────────────────────────

/// Assigns `tier` to `target`. Only a `SuperAdmin` may call this; the caller
/// must already have been authenticated via `require_auth()`.
pub fn promote_admin(
    env: &Env,
    caller: &Address,
    target: &Address,
    tier: AdminTier,
) -> Result<(), CommonError> {
    require_tier(env, caller, &AdminTier::SuperAdmin)?;
    set_admin_tier(env, target, tier);
    Ok(())
}

/// Removes every tier from `target`. Only a `SuperAdmin` may call this, and
/// the bootstrap admin cannot be demoted (use the two-step transfer instead).
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> Result<(), CommonError> {
    require_tier(env, caller, &AdminTier::SuperAdmin)?;
    if get_super_admin(env).as_ref() == Some(target) {
        return Err(CommonError::InvalidInput);
    }
    remove_admin_tier(env, target);
    Ok(())
}

fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&admin_tier_key(admin));
    untrack_admin(env, admin);
}

// ── Admin list ───────────────────────────────────────────────────────────────

/// Every address currently holding a tier, in assignment order.
pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if !admins.contains(admin) {
        admins.push_back(admin.clone());
        store_admin_list(env, &admins);
    }
}

fn untrack_admin(env: &Env, admin: &Address) {
    let admins = list_admins(env);
    let mut kept = Vec::new(env);
    for a in admins.iter() {
        if a != *admin {
            kept.push_back(a);
        }
    }
    store_admin_list(env, &kept);
}

fn store_admin_list(env: &Env, admins: &Vec<Address>) {
    env.storage().persistent().set(&ADMIN_LIST, admins);
    extend_ttl(env, &ADMIN_LIST);
}

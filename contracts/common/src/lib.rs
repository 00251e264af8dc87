//! Shared utilities and error types for the Shepherd farm contracts.
//!
//! This crate provides:
//! - [`CommonError`] — error codes shared by the Timelock and Shepherd contracts.
//! - [`admin_tiers`] — the tiered role table every governance-gated entry point
//!   checks an explicit `caller` against.
//!
//! Contract-specific errors live in each contract's own `ContractError` enum
//! and convert from [`CommonError`] where the meanings overlap.

#![no_std]

use soroban_sdk::contracterror;

pub mod admin_tiers;

pub use admin_tiers::*;

/// Fixed denominator for every basis-point quantity in the suite.
pub const BASIS_POINTS: i128 = 10_000;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by the farm contracts.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 20 – 29 | Resource not found             |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Arithmetic                     |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// `initialize` was called more than once.
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller does not hold the admin tier the operation requires.
    AccessDenied = 10,

    // ── Not-found (20–29) ────────────────────────────────────
    /// The referenced entry does not exist in contract storage.
    NotFound = 20,

    // ── Validation (30–39) ───────────────────────────────────
    /// One or more input parameters are out of range.
    InvalidInput = 30,

    // ── Arithmetic (40–49) ───────────────────────────────────
    /// A checked operation overflowed; the call fails closed.
    ArithmeticOverflow = 40,
}

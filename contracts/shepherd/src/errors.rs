use common::CommonError;
use soroban_sdk::contracttype;

/// Coarse classification of [`ContractError`], for indexers and front-ends
/// that group failures.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Bad or out-of-range arguments.
    Validation = 1,
    /// Caller lacks the required role.
    Authorization = 2,
    /// Unknown pool.
    NotFound = 3,
    /// A balance, allowance or token movement failed.
    Funds = 4,
    /// Checked arithmetic failed closed.
    Arithmetic = 5,
    /// Initialisation ordering.
    Lifecycle = 6,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    PoolNotFound = 5,
    PoolAlreadyExists = 6,
    InsufficientBalance = 7,
    InsufficientAllowance = 8,
    TransferFailed = 9,
    DivisionByZeroWeight = 10,
    ArithmeticOverflow = 11,
    FeeTooHigh = 12,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::InvalidInput
            | ContractError::PoolAlreadyExists
            | ContractError::FeeTooHigh => ErrorCategory::Validation,
            ContractError::PoolNotFound => ErrorCategory::NotFound,
            ContractError::InsufficientBalance
            | ContractError::InsufficientAllowance
            | ContractError::TransferFailed => ErrorCategory::Funds,
            ContractError::DivisionByZeroWeight | ContractError::ArithmeticOverflow => {
                ErrorCategory::Arithmetic
            }
        }
    }
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::AccessDenied => ContractError::Unauthorized,
            CommonError::NotFound => ContractError::PoolNotFound,
            CommonError::InvalidInput => ContractError::InvalidInput,
            CommonError::ArithmeticOverflow => ContractError::ArithmeticOverflow,
        }
    }
}

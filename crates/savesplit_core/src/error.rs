use std::fmt;

use crate::model::AccountId;

/// Errors in the rate schedules or in references to them.
///
/// Raised per scenario: the scenario is dropped, the search continues.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    UnknownAccount(AccountId),
    UnknownAccountKey(String),
    DuplicateAccount { id: AccountId, key: String },
    NegativeTierCap {
        account: AccountId,
        index: usize,
        cap: f64,
    },
    /// Tier ceilings must be strictly increasing
    NonMonotonicTiers { account: AccountId, index: usize },
    InvalidRate {
        account: AccountId,
        label: String,
        rate: f64,
    },
    InvalidBonusBand {
        account: AccountId,
        label: String,
        from: f64,
        up_to: f64,
    },
    InvalidMaxCap { account: AccountId, cap: f64 },
    /// Amount handed to the tier evaluator is negative or not finite
    InvalidAmount { account: AccountId, amount: f64 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::UnknownAccount(id) => write!(f, "unknown account {id}"),
            ConfigurationError::UnknownAccountKey(key) => {
                write!(f, "unknown account key '{key}'")
            }
            ConfigurationError::DuplicateAccount { id, key } => {
                write!(f, "duplicate account {id} ('{key}')")
            }
            ConfigurationError::NegativeTierCap {
                account,
                index,
                cap,
            } => write!(f, "{account}: tier {index} has invalid cap {cap}"),
            ConfigurationError::NonMonotonicTiers { account, index } => {
                write!(
                    f,
                    "{account}: tier {index} cap does not increase over the previous tier"
                )
            }
            ConfigurationError::InvalidRate {
                account,
                label,
                rate,
            } => write!(f, "{account}: invalid rate {rate} for '{label}'"),
            ConfigurationError::InvalidBonusBand {
                account,
                label,
                from,
                up_to,
            } => write!(
                f,
                "{account}: bonus '{label}' has invalid band [{from}, {up_to})"
            ),
            ConfigurationError::InvalidMaxCap { account, cap } => {
                write!(f, "{account}: invalid allocation cap {cap}")
            }
            ConfigurationError::InvalidAmount { account, amount } => {
                write!(f, "{account}: cannot evaluate interest on amount {amount}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Invalid arguments to an optimization run, rejected before enumeration
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    NonFiniteAmount { field: &'static str, value: f64 },
    NegativeAmount { field: &'static str, value: f64 },
    /// Increment must be a positive, finite amount
    InvalidIncrement(f64),
    /// Funds split into more increment units than the enumerator can address
    IncrementTooFine { total: f64, increment: f64 },
    InvalidTopK(usize),
    InvalidBatchSize(usize),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonFiniteAmount { field, value } => {
                write!(f, "{field} must be finite (got {value})")
            }
            InputError::NegativeAmount { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            InputError::InvalidIncrement(value) => {
                write!(f, "increment must be positive and finite (got {value})")
            }
            InputError::IncrementTooFine { total, increment } => write!(
                f,
                "increment {increment} is too fine for total funds {total}"
            ),
            InputError::InvalidTopK(k) => write!(f, "top_k must be at least 1 (got {k})"),
            InputError::InvalidBatchSize(size) => {
                write!(f, "batch_size must be at least 1 (got {size})")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Validate a currency amount supplied by a caller
pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFiniteAmount { field, value });
    }
    if value < 0.0 {
        return Err(InputError::NegativeAmount { field, value });
    }
    Ok(value)
}

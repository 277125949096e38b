//! Savings allocation optimization library
//!
//! This crate finds the best way to split a sum of money across tiered
//! savings accounts. It supports:
//! - Tiered base rates with an overflow rule above the last tier
//! - Bonus rates gated on salary credit, card spend, GIRO bills, insurance,
//!   investments and balance growth
//! - Choosing the one account the salary should be credited to
//! - Exhaustive search over fixed-increment splits with top-K ranking
//! - Progress reporting, scenario and time limits, and cancellation
//!
//! # Builder DSL
//!
//! Rate schedules are described with a fluent builder:
//!
//! ```ignore
//! use savesplit_core::config::ScheduleBuilder;
//! use savesplit_core::model::{BonusCategory, Eligibility};
//! use savesplit_core::registry::RateRegistry;
//!
//! let registry = RateRegistry::from_builders(vec![
//!     ScheduleBuilder::new("example", "Example Saver")
//!         .tier(50_000.0, 0.0005, "")
//!         .overflow_rate(0.0005, "")
//!         .bonus(
//!             BonusCategory::Salary,
//!             "Salary bonus",
//!             50_000.0,
//!             0.02,
//!             Eligibility::Salary { min_amount: 1_800.0 },
//!         )
//!         .max_cap(100_000.0),
//! ])?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod enumerate;
pub mod error;
pub mod optimization;
pub mod registry;
pub mod salary;
pub mod scenario;
pub mod tiers;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::ScheduleBuilder;
pub use error::{ConfigurationError, InputError};
pub use optimization::{OptimizationConfig, OptimizationResult, optimize};
pub use registry::RateRegistry;

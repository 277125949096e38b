//! Rate schedule configuration
//!
//! Schedules are configuration-as-data. They are either loaded by the host
//! from a file or described with the builder DSL:
//!
//! ```ignore
//! use savesplit_core::config::ScheduleBuilder;
//! use savesplit_core::registry::RateRegistry;
//!
//! let registry = RateRegistry::from_builders(vec![
//!     ScheduleBuilder::ocbc_360(),
//!     ScheduleBuilder::new("cash", "Cash Saver").tier(50_000.0, 0.01, ""),
//! ])?;
//! ```

pub mod presets;
pub mod schedule_builder;

pub use presets::builtin_builders;
pub use schedule_builder::ScheduleBuilder;

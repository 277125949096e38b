//! Rate schedule registry
//!
//! The registry is the fixed, ordered table of account schedules for a
//! process. It is validated once on construction and never mutated; every
//! optimization run borrows it. Registry order is the account ordering used
//! by the enumerator and by every tie-break in the engine.

use rustc_hash::FxHashMap;

use crate::config::{ScheduleBuilder, builtin_builders};
use crate::error::ConfigurationError;
use crate::model::{AccountId, AccountRateSchedule};

#[derive(Debug, Clone)]
pub struct RateRegistry {
    schedules: Vec<AccountRateSchedule>,
    by_id: FxHashMap<AccountId, usize>,
    by_key: FxHashMap<String, usize>,
}

impl RateRegistry {
    /// Build a registry from schedules in their final order.
    ///
    /// Every schedule is validated; ids and keys must be unique.
    pub fn new(schedules: Vec<AccountRateSchedule>) -> Result<Self, ConfigurationError> {
        let mut by_id = FxHashMap::default();
        let mut by_key = FxHashMap::default();

        for (index, schedule) in schedules.iter().enumerate() {
            schedule.validate()?;
            let duplicate = by_id.insert(schedule.id, index).is_some()
                || by_key.insert(schedule.key.clone(), index).is_some();
            if duplicate {
                return Err(ConfigurationError::DuplicateAccount {
                    id: schedule.id,
                    key: schedule.key.clone(),
                });
            }
        }

        Ok(Self {
            schedules,
            by_id,
            by_key,
        })
    }

    /// Build from builders, assigning ids in order
    pub fn from_builders(builders: Vec<ScheduleBuilder>) -> Result<Self, ConfigurationError> {
        let schedules = builders
            .into_iter()
            .enumerate()
            .map(|(i, b)| b.build(AccountId(i as u16)))
            .collect();
        Self::new(schedules)
    }

    /// The built-in account table
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::from_builders(builtin_builders())
    }

    pub fn get(&self, id: AccountId) -> Result<&AccountRateSchedule, ConfigurationError> {
        self.by_id
            .get(&id)
            .map(|&i| &self.schedules[i])
            .ok_or(ConfigurationError::UnknownAccount(id))
    }

    pub fn by_key(&self, key: &str) -> Result<&AccountRateSchedule, ConfigurationError> {
        self.by_key
            .get(key)
            .map(|&i| &self.schedules[i])
            .ok_or_else(|| ConfigurationError::UnknownAccountKey(key.to_string()))
    }

    /// Position of an account in registry order
    #[must_use]
    pub fn position(&self, id: AccountId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Schedules in registry order
    pub fn iter(&self) -> impl Iterator<Item = &AccountRateSchedule> {
        self.schedules.iter()
    }

    /// Bypasses validation; lets tests reach the per-scenario error path
    #[cfg(test)]
    pub(crate) fn schedules_mut(&mut self) -> &mut [AccountRateSchedule] {
        &mut self.schedules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

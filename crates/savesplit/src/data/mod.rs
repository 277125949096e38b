//! YAML inputs for the command-line host
//!
//! The account table and the user profile are stored in a human-readable
//! form and converted to engine types on load.

pub mod convert;
pub mod profile_data;
pub mod registry_data;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use savesplit_core::ConfigurationError;
use savesplit_core::registry::RateRegistry;

pub use convert::{to_eligibility, to_registry};
pub use profile_data::ProfileData;
pub use registry_data::{
    AccountData, BonusData, ConditionData, OverflowData, RegistryData, TierData,
};

/// Error types for loading host data
#[derive(Debug)]
pub enum DataError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    UnknownCategory { account: String, category: String },
    Invalid(ConfigurationError),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
            DataError::Parse { path, message } => {
                write!(f, "Failed to parse {}: {}", path.display(), message)
            }
            DataError::UnknownCategory { account, category } => {
                write!(f, "Account '{account}' has unknown bonus category '{category}'")
            }
            DataError::Invalid(err) => write!(f, "Invalid account table: {err}"),
        }
    }
}

impl std::error::Error for DataError {}

fn read(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the account table from `path`, or the built-in table when absent
pub fn load_registry(path: Option<&Path>) -> Result<RateRegistry, DataError> {
    let Some(path) = path else {
        return RateRegistry::builtin().map_err(DataError::Invalid);
    };

    let data = RegistryData::from_yaml(&read(path)?).map_err(|e| DataError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let registry = to_registry(&data)?;
    tracing::info!(
        path = %path.display(),
        accounts = registry.len(),
        "loaded account table"
    );
    Ok(registry)
}

/// Load a user profile from `path`, or an empty profile when absent
pub fn load_profile(path: Option<&Path>) -> Result<ProfileData, DataError> {
    let Some(path) = path else {
        return Ok(ProfileData::default());
    };

    let profile = ProfileData::from_yaml(&read(path)?).map_err(|e| DataError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), "loaded profile");
    Ok(profile)
}

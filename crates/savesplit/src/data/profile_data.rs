use savesplit_core::model::UserRequirements;
use savesplit_core::optimization::OptimizationConfig;
use serde::{Deserialize, Serialize};

/// A saved user profile: monthly habits plus optional search settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileData {
    #[serde(default)]
    pub requirements: UserRequirements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationConfig>,
}

impl ProfileData {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }
}

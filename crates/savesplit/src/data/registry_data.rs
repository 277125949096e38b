use serde::{Deserialize, Serialize};

/// Human-readable account table, as stored in YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegistryData {
    #[serde(default)]
    pub accounts: Vec<AccountData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountData {
    /// Stable short name, e.g. `uob-one`
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cap: Option<f64>,
    /// Coarse gate on whether the account is worth funding at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<ConditionData>,
    #[serde(default)]
    pub accepts_salary_code: bool,
    #[serde(default)]
    pub tiers: Vec<TierData>,
    /// Rate above the last tier; when absent the last tier's rate continues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow: Option<OverflowData>,
    #[serde(default)]
    pub bonuses: Vec<BonusData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierData {
    pub up_to: f64,
    pub rate: f64,
    #[serde(default)]
    pub remark: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverflowData {
    pub rate: f64,
    #[serde(default)]
    pub remark: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BonusData {
    /// salary, spend, investment, insurance, giro (or bill), wealth, extra
    pub category: String,
    pub label: String,
    #[serde(default)]
    pub from: f64,
    pub up_to: f64,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<ConditionData>,
}

/// Eligibility condition; every field that is set must hold
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConditionData {
    /// Salary of at least this much credited to the account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_spend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_giro: Option<u32>,
    /// Minimum insurance premium
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<f64>,
    /// Minimum investment amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment: Option<f64>,
    /// Minimum home-loan instalment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_loan: Option<f64>,
    pub increased_balance: bool,
    pub grew_wealth: bool,
    /// At least one of these must hold
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any: Vec<ConditionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<ConditionData>>,
}

impl RegistryData {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }
}

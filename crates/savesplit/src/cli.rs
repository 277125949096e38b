use std::path::PathBuf;

use clap::Parser;
use savesplit_core::model::UserRequirements;
use savesplit_core::optimization::OptimizationConfig;

use crate::report::OutputFormat;

#[derive(Parser, Debug, Clone)]
#[command(name = "savesplit")]
#[command(about = "Find the best way to split savings across tiered interest accounts")]
pub struct Args {
    /// Amount to distribute
    pub amount: f64,

    /// Allocation step per account
    #[arg(short, long)]
    pub increment: Option<f64>,

    /// Number of distributions to show
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Account table (YAML); the built-in table is used when absent
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// User profile (YAML); flags below override it
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Monthly salary credited to one of the accounts
    #[arg(long)]
    pub salary: Option<f64>,

    /// Monthly card spend
    #[arg(long)]
    pub spend: Option<f64>,

    /// Number of GIRO bill payments per month
    #[arg(long)]
    pub giro: Option<u32>,

    /// Insurance premium bought through the bank
    #[arg(long)]
    pub insurance: Option<f64>,

    /// Amount invested through the bank
    #[arg(long)]
    pub investment: Option<f64>,

    /// Home-loan instalment paid through the bank
    #[arg(long)]
    pub home_loan: Option<f64>,

    #[arg(long)]
    pub increased_balance: bool,

    #[arg(long)]
    pub grew_wealth: bool,

    /// A salary-equivalent transfer code is available
    #[arg(long)]
    pub salary_code: bool,

    /// Stop after this many scenarios
    #[arg(long)]
    pub max_scenarios: Option<u64>,

    /// Stop after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Show the per-tier breakdown of every account
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the data directory (default: ~/.savesplit/)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Apply the command-line flags on top of a profile's requirements
    #[must_use]
    pub fn requirements(&self, mut base: UserRequirements) -> UserRequirements {
        if let Some(salary) = self.salary {
            base.has_salary = true;
            base.salary_amount = salary;
        }
        if let Some(spend) = self.spend {
            base.spend_amount = spend;
        }
        if let Some(giro) = self.giro {
            base.giro_count = giro;
        }
        if let Some(premium) = self.insurance {
            base.has_insurance = true;
            base.insurance_amount = premium;
        }
        if let Some(amount) = self.investment {
            base.has_investments = true;
            base.investment_amount = amount;
        }
        if let Some(instalment) = self.home_loan {
            base.has_home_loan = true;
            base.home_loan_amount = instalment;
        }
        base.increased_balance |= self.increased_balance;
        base.grew_wealth |= self.grew_wealth;
        base.salary_code |= self.salary_code;
        base
    }

    /// Apply the command-line flags on top of a profile's search settings
    #[must_use]
    pub fn optimization_config(&self, base: Option<OptimizationConfig>) -> OptimizationConfig {
        let mut config = base.unwrap_or_default();
        if let Some(increment) = self.increment {
            config.increment = increment;
        }
        if let Some(top) = self.top {
            config.top_k = top;
        }
        if self.max_scenarios.is_some() {
            config.max_scenarios = self.max_scenarios;
        }
        if self.time_limit_ms.is_some() {
            config.time_limit_ms = self.time_limit_ms;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("savesplit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["100000"]);
        assert_eq!(args.amount, 100_000.0);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.log_level, "info");
        assert_eq!(args.optimization_config(None), OptimizationConfig::default());
        assert_eq!(
            args.requirements(UserRequirements::default()),
            UserRequirements::default()
        );
    }

    #[test]
    fn test_flags_override_profile() {
        let args = parse(&["50000", "--salary", "4000", "--giro", "2", "--salary-code"]);
        let profile = UserRequirements {
            salary_amount: 2_000.0,
            giro_count: 5,
            spend_amount: 700.0,
            ..Default::default()
        };
        let req = args.requirements(profile);
        assert!(req.has_salary);
        assert_eq!(req.salary_amount, 4_000.0);
        assert_eq!(req.giro_count, 2);
        assert_eq!(req.spend_amount, 700.0);
        assert!(req.salary_code);
    }

    #[test]
    fn test_search_flags() {
        let args = parse(&[
            "80000",
            "-i",
            "10000",
            "-t",
            "5",
            "--max-scenarios",
            "100",
            "--format",
            "json",
        ]);
        let profile_config = OptimizationConfig {
            batch_size: 50,
            time_limit_ms: Some(1_000),
            ..Default::default()
        };
        let config = args.optimization_config(Some(profile_config));
        assert_eq!(config.increment, 10_000.0);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.max_scenarios, Some(100));
        assert_eq!(config.time_limit_ms, Some(1_000));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_amount_is_required() {
        assert!(Args::try_parse_from(["savesplit"]).is_err());
    }
}

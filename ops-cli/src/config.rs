use std::path::Path;

use billing_service::BillingPolicy;
use config_engine::{ConfigError, ConfigLoader, ConfigValidator};
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};

/// Environment prefix, e.g. `RUSTCARE_BILLING__NEGATIVE_TOTAL=reject`
pub const ENV_PREFIX: &str = "RUSTCARE_";

/// `rustcare` configuration
///
/// ```yaml
/// billing:
///   negative_total: clamp_at_zero   # allow | clamp_at_zero | reject
///   quantity: require_positive      # pass_through | require_positive
/// logging:
///   log_level: info
///   json: false
///   redaction_enabled: true
///   hash_for_correlation: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub billing: BillingPolicy,
    pub logging: LoggerConfig,
}

impl ConfigValidator for AppConfig {
    fn validate(&self) -> config_engine::Result<()> {
        if self.logging.log_level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.log_level must not be empty".to_string()));
        }
        Ok(())
    }
}

pub fn load(path: &Path) -> config_engine::Result<AppConfig> {
    ConfigLoader::new(ENV_PREFIX)
        .with_file(path)
        .load_validated()
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_service::{NegativeTotalPolicy, QuantityPolicy};
    use figment::Jail;

    #[test]
    fn test_defaults_match_unchecked_billing() {
        Jail::expect_with(|_jail| {
            let config = load(Path::new("rustcare.yaml")).map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.billing.negative_total, NegativeTotalPolicy::Allow);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "rustcare.yaml",
                "billing:\n  negative_total: clamp_at_zero\nlogging:\n  json: true\n",
            )?;
            jail.set_env("RUSTCARE_BILLING__QUANTITY", "require_positive");

            let config = load(Path::new("rustcare.yaml")).map_err(|e| e.to_string())?;
            assert_eq!(config.billing.negative_total, NegativeTotalPolicy::ClampAtZero);
            assert_eq!(config.billing.quantity, QuantityPolicy::RequirePositive);
            assert!(config.logging.json);
            assert_eq!(config.logging.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_policy_value_fails() {
        Jail::expect_with(|jail| {
            jail.set_env("RUSTCARE_BILLING__NEGATIVE_TOTAL", "ignore");
            assert!(load(Path::new("rustcare.yaml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_blank_log_level_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("rustcare.yaml", "logging:\n  log_level: \"\"\n")?;
            assert!(matches!(
                load(Path::new("rustcare.yaml")),
                Err(ConfigError::Validation(_))
            ));
            Ok(())
        });
    }
}

use regex::Regex;
use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use base64::{Engine as _, engine::general_purpose};

use crate::config::LoggerConfig;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"(?:\+91[-.\s]?)?\(?\b[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b").unwrap();
    static ref CREDIT_CARD_REGEX: Regex = Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b").unwrap();
    // Insurance policy numbers such as HG-2024-1234
    static ref POLICY_REGEX: Regex = Regex::new(r"\b[A-Z]{2,4}-\d{4}-\d{4}\b").unwrap();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_credit_cards: bool,
    pub redact_policy_numbers: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_credit_cards: true,
            redact_policy_numbers: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    pub fn from_logger_config(config: &LoggerConfig) -> Self {
        let enabled = config.redaction_enabled;
        Self {
            redact_emails: enabled,
            redact_phones: enabled,
            redact_credit_cards: enabled,
            redact_policy_numbers: enabled,
            hash_for_correlation: config.hash_for_correlation,
            custom_patterns: Vec::new(),
        }
    }

    /// Adds an organization-specific pattern; fails on an invalid regex.
    pub fn with_custom_pattern(mut self, pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        self.custom_patterns.push((Regex::new(pattern)?, replacement.to_string()));
        Ok(self)
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        if self.config.redact_credit_cards {
            result = self.replace(&CREDIT_CARD_REGEX, &result, "CC", "****-****-****-****");
        }

        if self.config.redact_policy_numbers {
            result = self.replace(&POLICY_REGEX, &result, "POLICY", "**-****-****");
        }

        if self.config.redact_phones {
            result = self.replace(&PHONE_REGEX, &result, "PHONE", "(***) ***-****");
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    /// Stable pseudonym for a free-form identifier such as a patient name.
    pub fn pseudonymize(&self, label: &str, value: &str) -> String {
        format!("{}[{}]", label, self.hash_value(value))
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX.replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if self.config.hash_for_correlation {
                format!("EMAIL[{}]", self.hash_value(email))
            } else {
                match email.split_once('@') {
                    Some((local, domain)) => format!(
                        "{}***@{}***",
                        local.chars().next().unwrap_or('*'),
                        domain.chars().next().unwrap_or('*')
                    ),
                    None => "***@***".to_string(),
                }
            }
        }).to_string()
    }

    fn replace(&self, regex: &Regex, text: &str, label: &str, mask: &str) -> String {
        regex.replace_all(text, |caps: &regex::Captures| {
            if self.config.hash_for_correlation {
                format!("{}[{}]", label, self.hash_value(&caps[0]))
            } else {
                mask.to_string()
            }
        }).to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(&result[..8]) // Use first 8 bytes for shorter hash
    }
}

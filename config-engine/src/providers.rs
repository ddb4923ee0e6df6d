use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::validation::ConfigValidator;

/// Layered configuration source.
///
/// Precedence, lowest first: `T::default()`, the YAML file (skipped when it
/// does not exist), then environment variables named `PREFIX` + the key
/// path with `__` between sections, e.g. `RUSTCARE_BILLING__NEGATIVE_TOTAL`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
    file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new<S: Into<String>>(env_prefix: S) -> Self {
        Self {
            env_prefix: env_prefix.into(),
            file: None,
        }
    }

    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn figment<T: Serialize + Default>(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(T::default()));
        if let Some(path) = &self.file {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(&self.env_prefix).split("__"))
    }

    pub fn load<T>(&self) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let config = self.figment::<T>().extract()?;
        tracing::debug!(
            env_prefix = %self.env_prefix,
            file = ?self.file,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn load_validated<T>(&self) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default + ConfigValidator,
    {
        let config: T = self.load()?;
        config.validate()?;
        Ok(config)
    }
}

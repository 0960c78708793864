use std::path::Path;

use anyhow::Context as _;

use crate::{Config, PolicyConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `${VAR}` placeholders, then deserializes and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a variable is unset,
    /// the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that every mapping policy is usable
    ///
    /// Template syntax is checked when the policies are compiled into a
    /// mapper.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty code, an empty title, or a status
    /// outside 100-599
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref default) = self.mapping.default {
            validate_policy("mapping.default", default)?;
        }

        for (code, policy) in &self.mapping.codes {
            if code.trim().is_empty() {
                anyhow::bail!("mapping.codes contains an empty code");
            }
            validate_policy(&format!("mapping.codes.{code}"), policy)?;
        }

        if self.telemetry.filter.trim().is_empty() {
            anyhow::bail!("telemetry.filter must not be empty");
        }

        Ok(())
    }
}

fn validate_policy(path: &str, policy: &PolicyConfig) -> anyhow::Result<()> {
    if !(100..=599).contains(&policy.status) {
        anyhow::bail!("{path}.status must be between 100 and 599, got {}", policy.status);
    }

    if policy.title.trim().is_empty() {
        anyhow::bail!("{path}.title must not be empty");
    }

    Ok(())
}

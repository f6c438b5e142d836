use std::path::Path;

use crate::Config;

/// Route served by the relay; other built-in routes must not shadow it
const GENERATE_PATH: &str = "/generate";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build the effective startup configuration
    ///
    /// Loads `path` when given, otherwise starts from defaults, then fills
    /// unset provider defaults from the environment. This is the only point
    /// where the environment is consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or validation fails
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.provider.apply_env_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the provider timeout is unusable or the health
    /// route is malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider_config()?;
        self.validate_health_config()?;
        Ok(())
    }

    fn validate_provider_config(&self) -> anyhow::Result<()> {
        let timeout = self.provider.timeout()?;
        if timeout.is_zero() {
            anyhow::bail!("provider.timeout must be greater than zero");
        }

        for name in self.provider.headers.keys() {
            if name.trim().is_empty() {
                anyhow::bail!("provider.headers must not contain an empty header name");
            }
        }

        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if !health.enabled {
            return Ok(());
        }

        if !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }

        if health.path == GENERATE_PATH {
            anyhow::bail!("server.health.path must not shadow {GENERATE_PATH}");
        }

        Ok(())
    }
}

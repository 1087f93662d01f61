use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, LedgerSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the configuration file,
/// deserializes it into our strongly-typed `Config` struct, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Optionally, one could add environment variables here as well.
        // .add_source(config::Environment::with_prefix("APP"));
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    validate(&config)?;

    Ok(config)
}

/// Rejects settings the ledger could never accept, so a bad file fails at
/// startup instead of on the first owner call.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.ledger.owner_address.is_empty() {
        return Err(ConfigError::ValidationError(
            "ledger.owner_address must not be empty".to_string(),
        ));
    }
    if config.ledger.max_claimable_sessions < 0 {
        return Err(ConfigError::ValidationError(
            "ledger.max_claimable_sessions must not be negative".to_string(),
        ));
    }
    Ok(())
}

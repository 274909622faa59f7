use tierdns_domain::{CliOverrides, Config};

/// Loads and validates the configuration. Any failure here aborts startup.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

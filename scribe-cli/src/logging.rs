//! Initialize tracing logs from the `[logging]` config table.
//!
//! `RUST_LOG`, when set, replaces the configured filter entirely. Logs go to
//! stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingToml;

/// Build the env filter for `config`, honouring `RUST_LOG`.
pub fn env_filter(config: &LoggingToml) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let mut filter = EnvFilter::new("").add_directive(config.level.into());
    for target in &config.module_levels {
        filter = filter.add_directive(target.directive()?);
    }
    Ok(filter)
}

/// Install the global subscriber.
pub fn init_tracing_logs(config: &LoggingToml) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    Ok(())
}

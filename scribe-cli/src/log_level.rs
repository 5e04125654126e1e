//! Log level values accepted in the `[logging]` table and on the command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::{Directive, LevelFilter};

/// Default level for every target, e.g. `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(pub LevelFilter);

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<LevelFilter>()
            .map(LogLevel)
            .map_err(|_| anyhow::anyhow!("invalid log level: {s}"))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LogLevel> for Directive {
    fn from(val: LogLevel) -> Self {
        val.0.into()
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(LevelFilter::WARN)
    }
}

/// A `target=level` directive, e.g. `scribe=debug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetLevel(String);

impl TargetLevel {
    /// Directive to add to the env filter.
    pub fn directive(&self) -> anyhow::Result<Directive> {
        self.0
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid target log level directive: {}", self.0))
    }
}

impl TryFrom<String> for TargetLevel {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (target, level) = value
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected `target=level`, got: {value}"))?;
        if target.trim().is_empty() {
            anyhow::bail!("missing target in log directive: {value}");
        }
        level.parse::<LogLevel>()?;
        Ok(TargetLevel(value))
    }
}

impl From<TargetLevel> for String {
    fn from(level: TargetLevel) -> Self {
        level.0
    }
}

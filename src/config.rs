use std::io::IsTerminal;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::view::DEFAULT_COUNT_UP;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict-price";

/// Runtime settings resolved from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: Url,
    pub timeout: Option<Duration>,
    pub count_up: Duration,
    pub color: bool,
    pub progress: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let stdout_is_terminal = std::io::stdout().is_terminal();
        let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
        let count_up = if cli.no_animation || !stdout_is_terminal {
            Duration::ZERO
        } else {
            DEFAULT_COUNT_UP
        };
        Ok(Self {
            endpoint: parse_endpoint(&cli.endpoint)?,
            timeout: cli.timeout.map(Duration::from_secs),
            count_up,
            color,
            progress: !cli.no_progress && std::io::stderr().is_terminal(),
        })
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 2022;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub events_file: PathBuf,
    pub port: u16,
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required flag -f <events file>")]
    MissingEventsFile,
    #[error("unknown flag {0}")]
    UnknownFlag(String),
    #[error("flag {0} given more than once")]
    RepeatedFlag(String),
    #[error("flag {0} is missing its value")]
    MissingValue(String),
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("invalid timeout {0:?} (expected a positive 32-bit number of seconds)")]
    InvalidTimeout(String),
}

impl ServerConfig {
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut events_file = None;
        let mut port = None;
        let mut timeout = None;

        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let value = args
                .next()
                .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;
            match flag.as_str() {
                "-f" => set_once(&mut events_file, &flag, PathBuf::from(value))?,
                "-p" => set_once(&mut port, &flag, parse_port(&value)?)?,
                "-t" => set_once(&mut timeout, &flag, parse_timeout(&value)?)?,
                _ => return Err(ConfigError::UnknownFlag(flag)),
            }
        }

        Ok(Self {
            events_file: events_file.ok_or(ConfigError::MissingEventsFile)?,
            port: port.unwrap_or(DEFAULT_PORT),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

fn set_once<T>(slot: &mut Option<T>, flag: &str, value: T) -> Result<(), ConfigError> {
    if slot.is_some() {
        return Err(ConfigError::RepeatedFlag(flag.to_string()));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

fn parse_timeout(value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u32>() {
        Ok(seconds) if seconds > 0 => Ok(u64::from(seconds)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig, ConfigError> {
        ServerConfig::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn file_alone_uses_defaults() {
        let config = parse(&["-f", "events.txt"]).unwrap();
        assert_eq!(config.events_file, PathBuf::from("events.txt"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn flags_parse_in_any_order() {
        let config = parse(&["-t", "30", "-f", "events.txt", "-p", "9000"]).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn missing_events_file_is_rejected() {
        assert_eq!(parse(&["-p", "9000"]), Err(ConfigError::MissingEventsFile));
        assert_eq!(parse(&[]), Err(ConfigError::MissingEventsFile));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert_eq!(
            parse(&["-f", "events.txt", "--file", "other"]),
            Err(ConfigError::UnknownFlag("--file".to_string()))
        );
    }

    #[test]
    fn repeated_flag_is_rejected() {
        assert_eq!(
            parse(&["-f", "a", "-f", "b"]),
            Err(ConfigError::RepeatedFlag("-f".to_string()))
        );
    }

    #[test]
    fn odd_argument_count_is_rejected() {
        assert_eq!(
            parse(&["-f", "events.txt", "-p"]),
            Err(ConfigError::MissingValue("-p".to_string()))
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert_eq!(
            parse(&["-f", "e", "-t", "0"]),
            Err(ConfigError::InvalidTimeout("0".to_string()))
        );
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        assert!(parse(&["-f", "e", "-t", "soon"]).is_err());
    }

    #[test]
    fn timeout_beyond_u32_is_rejected() {
        assert!(parse(&["-f", "e", "-t", "4294967296"]).is_err());
    }

    #[test]
    fn port_beyond_u16_is_rejected() {
        assert_eq!(
            parse(&["-f", "e", "-p", "70000"]),
            Err(ConfigError::InvalidPort("70000".to_string()))
        );
    }
}

// File: src/config.rs
use crate::core::loader::{DictionarySource, ReversePolicy};
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// The published chakma/bangla synonym table.
pub const DEFAULT_DICTIONARY_URL: &str = "https://gist.githubusercontent.com/junechakma/39b280baa4f01ea599b65f5c91cdbe60/raw/0eafe0ec3866e491ab1758b6d897d19799ae7b5b/gistfile1.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            RunMode::Development => "debug",
            RunMode::Production => "info",
        }
    }
}

/// Dictionary options shared by the server and the console.
#[derive(Debug, Clone, clap::Args)]
pub struct DictionaryArgs {
    /// CSV URL, CSV file path, or `.bin` snapshot path
    #[arg(long, env = "DICTIONARY_PATH", default_value = DEFAULT_DICTIONARY_URL)]
    pub dictionary: String,

    /// Upper bound on fetching a remote dictionary, in seconds
    #[arg(long, env = "DICTIONARY_FETCH_TIMEOUT_SECS", default_value_t = 30)]
    pub fetch_timeout_secs: u64,

    /// What bangla terms map to: `self-group` (published behavior) or `counterpart`
    #[arg(long, env = "REVERSE_POLICY", default_value = "self-group")]
    pub reverse_policy: ReversePolicy,
}

impl DictionaryArgs {
    pub fn source(&self) -> DictionarySource {
        DictionarySource::parse(&self.dictionary)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Chakma <-> Bangla dictionary translation server
#[derive(Debug, Clone, Parser)]
#[command(name = "translator_server", version)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long = "env", env = "APP_ENV", value_enum, default_value = "development")]
    pub mode: RunMode,

    /// Write a bincode snapshot of the loaded dictionary to this path
    #[arg(long, env = "SNAPSHOT_OUT")]
    pub snapshot_out: Option<PathBuf>,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Interactive chakma <-> bangla lookup console
#[derive(Debug, Clone, Parser)]
#[command(name = "translator_console", version)]
pub struct ConsoleConfig {
    /// Start in bangla -> chakma direction
    #[arg(long)]
    pub from_bangla: bool,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_defaults() {
        let config = ConsoleConfig::try_parse_from(["translator_console"]).unwrap();
        assert!(!config.from_bangla);
        assert_eq!(config.dictionary.reverse_policy, ReversePolicy::SelfGroup);
        assert_eq!(config.dictionary.fetch_timeout(), Duration::from_secs(30));
        assert!(matches!(config.dictionary.source(), DictionarySource::Remote(_)));
    }

    #[test]
    fn server_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "translator_server",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--env",
            "production",
            "--dictionary",
            "words.csv",
            "--reverse-policy",
            "counterpart",
            "--snapshot-out",
            "cache/dict.bin",
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.mode.default_log_filter(), "info");
        assert_eq!(config.dictionary.reverse_policy, ReversePolicy::Counterpart);
        assert_eq!(
            config.dictionary.source(),
            DictionarySource::CsvFile(PathBuf::from("words.csv"))
        );
        assert_eq!(config.snapshot_out, Some(PathBuf::from("cache/dict.bin")));
    }

    #[test]
    fn bad_reverse_policy_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "translator_server",
            "--reverse-policy",
            "sideways",
        ]);
        assert!(result.is_err());
    }
}

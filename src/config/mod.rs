mod file_config;

pub use file_config::FileConfig;

use crate::collection::{IdScheme, SortKey};
use crate::override_store::{OverrideBackend, DEFAULT_OVERRIDE_KEY};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_DATA_SOURCE: &str = "data.json";
pub const DEFAULT_EXPORT_PATH: &str = "data.json";
pub const DEFAULT_HTTP_TIMEOUT_SEC: u64 = 30;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub data_source: String,
    pub http_timeout_sec: u64,
    pub override_backend: OverrideBackend,
    pub override_path: Option<PathBuf>,
    pub override_key: String,
    pub export_path: PathBuf,
    pub id_scheme: IdScheme,
    pub default_sort: Option<String>,
    pub assume_yes: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            http_timeout_sec: DEFAULT_HTTP_TIMEOUT_SEC,
            override_backend: OverrideBackend::default(),
            override_path: None,
            override_key: DEFAULT_OVERRIDE_KEY.to_string(),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            id_scheme: IdScheme::default(),
            default_sort: None,
            assume_yes: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_source: String,
    pub http_timeout_sec: u64,

    pub override_backend: OverrideBackend,
    /// Unused by the memory backend.
    pub override_path: PathBuf,
    pub override_key: String,

    pub export_path: PathBuf,
    pub id_scheme: IdScheme,
    pub default_sort: Option<SortKey>,
    pub assume_yes: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let data_source = file
            .data_source
            .unwrap_or_else(|| cli.data_source.clone());
        if data_source.trim().is_empty() {
            bail!("data_source must not be empty");
        }

        let http_timeout_sec = file.http_timeout_sec.unwrap_or(cli.http_timeout_sec);
        if http_timeout_sec == 0 {
            bail!("http_timeout_sec must be greater than zero");
        }

        let override_backend = match file.override_backend {
            Some(s) => parse_override_backend(&s)
                .with_context(|| format!("Invalid override_backend '{}'", s))?,
            None => cli.override_backend,
        };

        let override_path = file
            .override_path
            .map(PathBuf::from)
            .or_else(|| cli.override_path.clone())
            .or_else(|| override_backend.default_path().map(PathBuf::from))
            .unwrap_or_default();

        let override_key = file
            .override_key
            .unwrap_or_else(|| cli.override_key.clone());
        if override_key.is_empty() {
            bail!("override_key must not be empty");
        }

        let export_path = file
            .export_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.export_path.clone());

        let id_scheme = match file.id_scheme {
            Some(s) => parse_id_scheme(&s).with_context(|| format!("Invalid id_scheme '{}'", s))?,
            None => cli.id_scheme,
        };

        let default_sort = match file.default_sort.or_else(|| cli.default_sort.clone()) {
            Some(token) => SortKey::parse_token(&token)
                .with_context(|| format!("Invalid default_sort '{}'", token))?,
            None => None,
        };

        let assume_yes = file.assume_yes.unwrap_or(cli.assume_yes);

        Ok(Self {
            data_source,
            http_timeout_sec,
            override_backend,
            override_path,
            override_key,
            export_path,
            id_scheme,
            default_sort,
            assume_yes,
        })
    }
}

/// Parses a backend name. Uses clap's ValueEnum trait for parsing.
fn parse_override_backend(s: &str) -> Result<OverrideBackend> {
    OverrideBackend::from_str(s, true).map_err(anyhow::Error::msg)
}

fn parse_id_scheme(s: &str) -> Result<IdScheme> {
    IdScheme::from_str(s, true).map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::SortField;

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();
        assert_eq!(config.data_source, "data.json");
        assert_eq!(config.http_timeout_sec, 30);
        assert_eq!(config.override_backend, OverrideBackend::File);
        assert_eq!(config.override_path, PathBuf::from("vinyl_records.json"));
        assert_eq!(config.override_key, "vinylRecords");
        assert_eq!(config.export_path, PathBuf::from("data.json"));
        assert_eq!(config.id_scheme, IdScheme::Timestamp);
        assert!(config.default_sort.is_none());
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_override_path_follows_backend() {
        let cli = CliConfig {
            override_backend: OverrideBackend::Sqlite,
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert_eq!(config.override_path, PathBuf::from("vinyl_records.db"));

        let file = FileConfig {
            override_backend: Some("memory".to_string()),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, Some(file)).unwrap();
        assert_eq!(config.override_backend, OverrideBackend::Memory);
        assert_eq!(config.override_path, PathBuf::new());
    }

    #[test]
    fn test_file_overrides_cli() {
        let cli = CliConfig {
            data_source: "cli.json".to_string(),
            override_path: Some(PathBuf::from("cli_overrides.json")),
            default_sort: Some("artist".to_string()),
            ..Default::default()
        };
        let file = FileConfig {
            data_source: Some("https://example.org/data.json".to_string()),
            default_sort: Some("Year-Desc".to_string()),
            id_scheme: Some("UUID".to_string()),
            assume_yes: Some(true),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file)).unwrap();
        assert_eq!(config.data_source, "https://example.org/data.json");
        assert_eq!(config.override_path, PathBuf::from("cli_overrides.json"));
        assert_eq!(config.default_sort, Some(SortKey::descending(SortField::Year)));
        assert_eq!(config.id_scheme, IdScheme::Uuid);
        assert!(config.assume_yes);
    }

    #[test]
    fn test_default_sort_token_default_means_insertion_order() {
        let cli = CliConfig {
            default_sort: Some("default".to_string()),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert!(config.default_sort.is_none());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad_sort = CliConfig {
            default_sort: Some("price".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&bad_sort, None).is_err());

        let bad_backend = FileConfig {
            override_backend: Some("redis".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&CliConfig::default(), Some(bad_backend)).is_err());

        let zero_timeout = FileConfig {
            http_timeout_sec: Some(0),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&CliConfig::default(), Some(zero_timeout)).is_err());

        let empty_key = FileConfig {
            override_key: Some(String::new()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&CliConfig::default(), Some(empty_key)).is_err());
    }
}

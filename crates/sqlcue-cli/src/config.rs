//! Configuration file handling

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::args::{CatalogArgs, OutputFormat};

pub const CONFIG_FILE: &str = "sqlcue.toml";

/// Configuration for sqlcue
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Catalog snapshot paths
    #[serde(default)]
    pub catalog: Vec<String>,

    /// Directory searched for `*.json` snapshots
    pub catalog_dir: Option<String>,

    /// SQL dialect (hive, impala, generic)
    #[serde(default)]
    pub dialect: Option<String>,

    /// Default database
    #[serde(default)]
    pub database: Option<String>,

    /// Per-fetch timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Output format (human, json)
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        Ok(config)
    }

    /// Try to find and load sqlcue.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let mut current_dir = std::env::current_dir().into_diagnostic()?;

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Ok(Some(Self::from_file(&config_path)?));
            }

            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Explicit config file if given, else the discovered one, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::find_and_load()?.unwrap_or_default()),
        }
    }

    /// Merge catalog arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_catalog_args(mut self, args: &CatalogArgs) -> Self {
        if !args.catalog.is_empty() {
            self.catalog = args.catalog.iter().map(|p| p.display().to_string()).collect();
        }

        if args.catalog_dir.is_some() {
            self.catalog_dir = args.catalog_dir.as_ref().map(|p| p.display().to_string());
        }

        self
    }

    /// Merge completion arguments into configuration
    pub fn merge_with_args(
        mut self,
        dialect: &Option<String>,
        database: &Option<String>,
        timeout_ms: Option<u64>,
        format: &Option<OutputFormat>,
    ) -> Self {
        if dialect.is_some() {
            self.dialect = dialect.clone();
        }

        if database.is_some() {
            self.database = database.clone();
        }

        if timeout_ms.is_some() {
            self.timeout_ms = timeout_ms;
        }

        if let Some(fmt) = format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        self
    }

    /// Snapshot files named directly plus those found under `catalog_dir`
    pub fn catalog_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self.catalog.iter().map(PathBuf::from).collect();

        if let Some(dir) = &self.catalog_dir {
            let pattern = format!("{}/**/*.json", dir);
            for path in glob::glob(&pattern).into_diagnostic()?.flatten() {
                files.push(path);
            }
        }

        Ok(files)
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
            catalog = ["catalog/warehouse.json"]
            dialect = "impala"
            timeout_ms = 250
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog, vec!["catalog/warehouse.json"]);
        assert_eq!(config.dialect.as_deref(), Some("impala"));
        assert_eq!(config.timeout_ms, Some(250));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.catalog_dir.is_none());
    }

    #[test]
    fn test_args_take_precedence() {
        let config = Config {
            dialect: Some("hive".to_string()),
            database: Some("sales".to_string()),
            format: Some("json".to_string()),
            ..Default::default()
        };

        let merged = config.merge_with_args(
            &Some("impala".to_string()),
            &None,
            Some(100),
            &Some(OutputFormat::Human),
        );

        assert_eq!(merged.dialect.as_deref(), Some("impala"));
        assert_eq!(merged.database.as_deref(), Some("sales"));
        assert_eq!(merged.timeout_ms, Some(100));
        assert_eq!(merged.output_format(), OutputFormat::Human);
    }

    #[test]
    fn test_catalog_args_replace_config_paths() {
        let config = Config {
            catalog: vec!["old.json".to_string()],
            ..Default::default()
        };
        let args = CatalogArgs {
            catalog: vec![PathBuf::from("new.json")],
            ..Default::default()
        };

        let merged = config.merge_catalog_args(&args);

        assert_eq!(merged.catalog_files().unwrap(), vec![PathBuf::from("new.json")]);
    }
}

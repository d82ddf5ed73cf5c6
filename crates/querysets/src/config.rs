//! TOML configuration.
//!
//! ```toml
//! dialect = "sqlite"
//!
//! [logging]
//! log_sql = true
//! max_sql_length = 200
//!
//! [search]
//! index_dir = "${DATA_DIR}/search"
//! ```
//!
//! `${VAR}` references in `search.index_dir` are expanded from the environment.
//! Relative paths resolve against the config file's directory.

use crate::builder::{QueryBuilder, SqlLogging};
use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::external_id::ExternalIdGenerator;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// `postgres` or `sqlite`.
    pub dialect: Dialect,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Emit built SQL at `DEBUG` (target `querysets::sql`).
    #[serde(default)]
    pub log_sql: bool,
    /// Truncate logged SQL to this many bytes; `0` disables truncation.
    #[serde(default = "default_max_sql_length")]
    pub max_sql_length: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_sql: false,
            max_sql_length: default_max_sql_length(),
        }
    }
}

fn default_max_sql_length() -> usize {
    200
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Directory holding one index file per entity.
    pub index_dir: Option<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QueryError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        let mut config = Self::parse(&raw)
            .map_err(|e| QueryError::config(format!("{}: {e}", path.display())))?;
        config.base_dir = Some(
            path.parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf(),
        );
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> QueryResult<Self> {
        Self::parse(raw).map_err(QueryError::config)
    }

    fn parse(raw: &str) -> Result<Self, String> {
        let mut config: Config =
            toml::from_str(raw).map_err(|e| format!("failed to parse config: {e}"))?;
        config.expand_env()?;
        config.validate()?;
        Ok(config)
    }

    fn expand_env(&mut self) -> Result<(), String> {
        if let Some(dir) = &mut self.search.index_dir {
            *dir = expand_env_vars(dir)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.search.index_dir {
            if dir.trim().is_empty() {
                return Err("search.index_dir must not be empty".to_string());
            }
        }
        Ok(())
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn sql_logging(&self) -> Option<SqlLogging> {
        self.logging.log_sql.then(|| SqlLogging {
            max_sql_length: match self.logging.max_sql_length {
                0 => None,
                n => Some(n),
            },
        })
    }

    /// A builder with the default external-id generator.
    pub fn query_builder(&self) -> QueryBuilder {
        self.apply_logging(QueryBuilder::new(self.dialect))
    }

    pub fn query_builder_with_external_ids(
        &self,
        external_ids: Arc<dyn ExternalIdGenerator>,
    ) -> QueryBuilder {
        self.apply_logging(QueryBuilder::with_external_ids(self.dialect, external_ids))
    }

    fn apply_logging(&self, qb: QueryBuilder) -> QueryBuilder {
        match self.sql_logging() {
            Some(logging) => qb.with_sql_logging(logging),
            None => qb,
        }
    }

    /// `search.index_dir`, resolved against the config file's directory.
    pub fn index_dir(&self) -> Option<PathBuf> {
        let dir = Path::new(self.search.index_dir.as_deref()?);
        Some(match &self.base_dir {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir.to_path_buf(),
        })
    }

    /// Open the on-disk search index for entity `name`.
    #[cfg(feature = "sqlite")]
    pub fn search_index(&self, name: &str) -> QueryResult<crate::search::SqliteSearchIndex> {
        let dir = self
            .index_dir()
            .ok_or_else(|| QueryError::config("search.index_dir is not set"))?;
        crate::search::SqliteSearchIndex::open(dir, name)
    }
}

fn expand_env_vars(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                return Err(format!("unterminated env var reference: ${{{key}"));
            }
            if key.is_empty() {
                return Err("invalid env var reference: ${}".to_string());
            }
            let value = std::env::var(&key)
                .map_err(|_| format!("missing env var for config expansion: {key}"))?;
            out.push_str(&value);
            continue;
        }
        out.push(c);
    }

    Ok(out)
}

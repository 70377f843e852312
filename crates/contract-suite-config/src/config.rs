// crates/contract-suite-config/src/config.rs
// ============================================================================
// Module: Contract Suite Configuration
// Description: Configuration loading and validation for contract discovery.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: class-filter, contract-suite-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `CONTRACT_SUITE_CONFIG`, then
//! `contract-suite.toml` in the working directory. Unknown keys, malformed
//! filter expressions, and invalid type names are rejected at load time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use class_filter::parse_filter;
use contract_suite_core::ClassPath;
use contract_suite_core::DiscoverySettings;
use contract_suite_core::TypeName;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "contract-suite.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CONTRACT_SUITE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of scan roots.
pub(crate) const MAX_ROOTS: usize = 256;
/// Maximum number of class path entries.
pub(crate) const MAX_CLASSPATH_ENTRIES: usize = 256;
/// Maximum number of skip list entries.
pub(crate) const MAX_SKIP_ENTRIES: usize = 1024;
/// Filter expression accepting every type.
const ACCEPT_ALL: &str = "True()";
/// Filter expression rejecting every type.
const REJECT_ALL: &str = "False()";

// ============================================================================
// SECTION: Top-Level Config
// ============================================================================

/// Contract suite configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSuiteConfig {
    /// Discovery configuration.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Report configuration.
    #[serde(default)]
    pub report: ReportConfig,
    /// Path the configuration was loaded from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ContractSuiteConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml(content)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discovery.validate()
    }
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Where and how contract tests are discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Package roots to scan; empty or `""` scans everything.
    #[serde(default)]
    pub roots: Vec<String>,
    /// Manifest directories and archives, searched in order.
    #[serde(default)]
    pub classpath: Vec<String>,
    /// Filter expression a type must satisfy to be considered.
    #[serde(default = "default_include")]
    pub include: String,
    /// Filter expression removing types from discovery.
    #[serde(default = "default_exclude")]
    pub exclude: String,
    /// Test classes or contract interfaces left out of the registry.
    #[serde(default)]
    pub skip: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            classpath: Vec::new(),
            include: default_include(),
            exclude: default_exclude(),
            skip: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Validates roots, skip entries, class path entries, and filters.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.roots.len() > MAX_ROOTS {
            return Err(ConfigError::Invalid("too many discovery.roots entries".to_string()));
        }
        for root in &self.roots {
            if !root.is_empty() && !TypeName::is_valid(root) {
                return Err(ConfigError::Invalid(format!(
                    "discovery.roots entry `{root}` is not a package or type name"
                )));
            }
        }
        if self.skip.len() > MAX_SKIP_ENTRIES {
            return Err(ConfigError::Invalid("too many discovery.skip entries".to_string()));
        }
        for entry in &self.skip {
            if !TypeName::is_valid(entry) {
                return Err(ConfigError::Invalid(format!(
                    "discovery.skip entry `{entry}` is not a type name"
                )));
            }
        }
        if self.classpath.len() > MAX_CLASSPATH_ENTRIES {
            return Err(ConfigError::Invalid("too many discovery.classpath entries".to_string()));
        }
        for entry in &self.classpath {
            validate_path_string("discovery.classpath", entry)?;
        }
        validate_filter("discovery.include", &self.include)?;
        validate_filter("discovery.exclude", &self.exclude)
    }

    /// Converts the section into core discovery settings.
    #[must_use]
    pub fn to_settings(&self) -> DiscoverySettings {
        let mut settings = DiscoverySettings::new()
            .include_expression(&self.include)
            .exclude_expression(&self.exclude);
        for root in &self.roots {
            settings = settings.with_root(root.as_str());
        }
        for entry in &self.skip {
            settings = settings.with_skip(entry.as_str());
        }
        settings
    }

    /// Builds the manifest class path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no class path entry is
    /// configured.
    pub fn class_path(&self) -> Result<ClassPath, ConfigError> {
        if self.classpath.is_empty() {
            return Err(ConfigError::Invalid(
                "discovery.classpath must list at least one directory or archive".to_string(),
            ));
        }
        Ok(ClassPath::new(self.classpath.iter().map(|entry| entry.trim())))
    }
}

/// Default include filter.
fn default_include() -> String {
    ACCEPT_ALL.to_string()
}

/// Default exclude filter.
fn default_exclude() -> String {
    REJECT_ALL.to_string()
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document.
    Json,
}

/// Which coverage sections a report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Show interfaces without a contract test.
    #[serde(default = "default_true")]
    pub untested: bool,
    /// Show classes no suite targets.
    #[serde(default = "default_true")]
    pub unimplemented: bool,
    /// Show configuration errors.
    #[serde(default = "default_true")]
    pub errors: bool,
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            untested: true,
            unimplemented: true,
            errors: true,
            format: ReportFormat::Text,
        }
    }
}

/// Serde default helper returning `true`.
const fn default_true() -> bool {
    true
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} entries must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} entry exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates that a filter expression parses.
fn validate_filter(field: &str, expression: &str) -> Result<(), ConfigError> {
    parse_filter(expression)
        .map(|_| ())
        .map_err(|err| ConfigError::Invalid(format!("{field} is not a valid filter: {err}")))
}

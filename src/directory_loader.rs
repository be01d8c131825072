//! Directory-based loading of enumeration types from JSON definition files.
//!
//! This module provides functionality to declare enumeration types from JSON
//! files stored in configurable directories. It is only available when the
//! `directory-loading` feature is enabled (which is the default).
//!
//! # Overview
//!
//! The module supports loading definitions from:
//! - A default directory: `~/.data-enums/`
//! - Custom directories specified at runtime
//!
//! Each `.json` file declares one enumeration type. Types loaded later
//! replace earlier types of the same name.
//!
//! # JSON File Format
//!
//! ```json
//! {
//!   "name": "Currency",
//!   "primary_attribute": "code",
//!   "registration": "eager",
//!   "attributes": ["symbol", ["name", true], "plural_name"],
//!   "members": [
//!     ["USD", "$", "United States dollar", "United States dollars"],
//!     {"code": "EUR", "symbol": "€", "name": "Euro", "plural_name": "Euros"}
//!   ]
//! }
//! ```
//!
//! Only `name` is required. An attribute is a name, or a `[name, unique]`
//! pair. A member is either an array of positional values or an object of
//! keyword values. Values may be `null`, booleans, integers or strings.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::debug;

use crate::{
    Args, AttributeSpec, ConfigurationError, DataEnum, RegistrationMode,
    Result, Schema, Value,
};

/// One member in a definition file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MemberEntry {
    /// Positional arguments, primary key first.
    Positional(Vec<JsonValue>),
    /// Keyword arguments.
    Named(serde_json::Map<String, JsonValue>),
}

impl MemberEntry {
    /// Converts the entry into construction arguments.
    pub fn to_args(&self) -> Result<Args> {
        match self {
            MemberEntry::Positional(values) => values
                .iter()
                .try_fold(Args::new(), |args, value| -> Result<Args> {
                    Ok(args.positional(json_value(value)?))
                }),
            MemberEntry::Named(values) => values
                .iter()
                .try_fold(Args::new(), |args, (name, value)| -> Result<Args> {
                    Ok(args.keyword(name.as_str(), json_value(value)?))
                }),
        }
    }
}

/// Root structure of an enumeration definition file.
#[derive(Debug, Deserialize)]
pub struct DefinitionFile {
    /// The enumeration type's name.
    pub name: String,
    /// The primary attribute; the reserved default when absent.
    pub primary_attribute: Option<String>,
    /// How members are registered.
    #[serde(default)]
    pub registration: RegistrationMode,
    /// Attribute declarations, validated when the schema is built.
    #[serde(default)]
    pub attributes: JsonValue,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<MemberEntry>,
    /// An optional human-readable description (ignored).
    pub description: Option<String>,
}

impl DefinitionFile {
    /// Parses the declared attribute list.
    pub fn attribute_specs(&self) -> Result<Vec<AttributeSpec>> {
        let entries = match &self.attributes {
            JsonValue::Null => return Ok(Vec::new()),
            JsonValue::Array(entries) => entries,
            _ => return Err(ConfigurationError::NotASequence.into()),
        };
        entries
            .iter()
            .map(|entry| match entry {
                JsonValue::String(name) => Ok(AttributeSpec::new(name.as_str())),
                JsonValue::Array(pair) => match pair.as_slice() {
                    [JsonValue::String(name), JsonValue::Bool(unique)] => {
                        Ok(AttributeSpec::from((name.as_str(), *unique)))
                    }
                    _ => Err(invalid_spec(entry)),
                },
                _ => Err(invalid_spec(entry)),
            })
            .collect()
    }

    pub fn schema(&self) -> Result<Schema> {
        let mut builder =
            Schema::builder(self.name.as_str()).specs(self.attribute_specs()?);
        if let Some(primary) = &self.primary_attribute {
            builder = builder.primary_attribute(primary.as_str());
        }
        builder.build()
    }

    /// Declares the type and constructs (and, in deferred mode, registers)
    /// every member.
    pub fn into_data_enum(self) -> Result<DataEnum> {
        let mut data_enum = DataEnum::new(self.schema()?, self.registration);
        let mut constructed = Vec::with_capacity(self.members.len());
        for entry in &self.members {
            constructed.push(data_enum.construct(entry.to_args()?)?);
        }
        if data_enum.mode() == RegistrationMode::Deferred {
            data_enum.register(constructed)?;
        }
        Ok(data_enum)
    }
}

fn invalid_spec(entry: &JsonValue) -> crate::Error {
    ConfigurationError::InvalidAttributeSpec(entry.to_string()).into()
}

fn json_value(value: &JsonValue) -> Result<Value> {
    match value {
        JsonValue::Null => Ok(Value::None),
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        JsonValue::Number(n) => n.as_i64().map(Value::Int).ok_or_else(|| {
            ConfigurationError::UnsupportedValue(n.to_string()).into()
        }),
        other => {
            Err(ConfigurationError::UnsupportedValue(other.to_string()).into())
        }
    }
}

/// Errors that can occur when loading enumeration definitions.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An I/O error occurred while reading files.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// A JSON parsing error occurred.
    #[error("JSON parse error in {}: {error}", .file.display())]
    Json {
        /// The file that caused the error.
        file: PathBuf,
        /// The underlying JSON error.
        #[source]
        error: serde_json::Error,
    },
    /// The file parsed but does not declare a valid enumeration.
    #[error("invalid definition in {}: {error}", .file.display())]
    Definition {
        /// The file that caused the error.
        file: PathBuf,
        /// The declaration, construction or registration error.
        #[source]
        error: crate::Error,
    },
}

/// Result of a directory loading operation.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Enumeration types loaded, keyed by name.
    pub enumerations: HashMap<String, DataEnum>,
    /// Definition files that were successfully loaded.
    pub files_processed: Vec<PathBuf>,
    /// Non-fatal errors encountered during loading.
    pub errors: Vec<(PathBuf, LoadError)>,
}

impl LoadResult {
    /// Returns the number of distinct types loaded.
    pub fn enumerations_count(&self) -> usize { self.enumerations.len() }

    /// Returns an iterator over the loaded types.
    pub fn enumerations_iter(&self) -> impl Iterator<Item = &DataEnum> {
        self.enumerations.values()
    }

    /// Consumes the result and returns the loaded types.
    pub fn into_enumerations(self) -> impl Iterator<Item = DataEnum> {
        self.enumerations.into_values()
    }

    /// Returns true if any errors occurred during loading.
    pub fn has_errors(&self) -> bool { !self.errors.is_empty() }
}

/// Configuration for loading definitions from directories.
///
/// Directories are processed in order, with types from later directories
/// replacing types of the same name from earlier directories.
///
/// # Examples
///
/// ```rust,ignore
/// use data_enum::DirectoryConfig;
///
/// // Use only the default directory (~/.data-enums/)
/// let config = DirectoryConfig::default_only();
///
/// // Use custom paths with default appended
/// let config = DirectoryConfig::with_paths_and_default(vec![
///     "/etc/data-enums".into(),
/// ]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    /// Search paths in priority order (later paths override earlier).
    paths: Vec<PathBuf>,
}

impl DirectoryConfig {
    /// Creates a new empty configuration with no search paths.
    pub fn new() -> Self { Self { paths: Vec::new() } }

    /// Creates configuration with only the default directory
    /// (`~/.data-enums/`).
    pub fn default_only() -> Self {
        Self { paths: vec![Self::default_directory()] }
    }

    /// Creates configuration with custom paths (processed in order).
    pub fn with_paths(paths: Vec<PathBuf>) -> Self { Self { paths } }

    /// Creates configuration with custom paths followed by the default
    /// directory, whose definitions therefore take precedence.
    pub fn with_paths_and_default(mut paths: Vec<PathBuf>) -> Self {
        paths.push(Self::default_directory());
        Self { paths }
    }

    /// Returns the default directory: `~/.data-enums/`
    ///
    /// Falls back to `./.data-enums/` if the home directory cannot be
    /// determined.
    pub fn default_directory() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".data-enums")
    }

    /// Returns the configured search paths.
    pub fn paths(&self) -> &[PathBuf] { &self.paths }

    /// Adds a path, processed after (and overriding) existing paths.
    pub fn add_path(&mut self, path: PathBuf) { self.paths.push(path); }
}

/// Loads every JSON definition file in a single directory.
///
/// Files are read in path order. A missing directory yields no types; the
/// first unreadable, unparsable or invalid file aborts the load.
///
/// # Examples
///
/// ```rust,ignore
/// use data_enum::load_from_directory;
/// use std::path::Path;
///
/// for data_enum in load_from_directory(Path::new("/etc/data-enums"))? {
///     println!("{}: {} members", data_enum.name(), data_enum.len());
/// }
/// ```
pub fn load_from_directory(
    path: &Path,
) -> std::result::Result<Vec<DataEnum>, LoadError> {
    json_files(path)?
        .iter()
        .map(|file_path| load_single_file(file_path))
        .collect()
}

/// Loads definitions from all directories in the given configuration.
///
/// This function is fault-tolerant: files that fail to load are recorded in
/// the returned `LoadResult` and skipped.
pub fn load_from_config(config: &DirectoryConfig) -> LoadResult {
    let mut result = LoadResult::default();

    for dir_path in config.paths() {
        let files = match json_files(dir_path) {
            Ok(files) => files,
            Err(e) => {
                result.errors.push((dir_path.clone(), e));
                continue;
            }
        };
        for file_path in files {
            match load_single_file(&file_path) {
                Ok(data_enum) => {
                    result
                        .enumerations
                        .insert(data_enum.name().to_string(), data_enum);
                    result.files_processed.push(file_path);
                }
                Err(e) => result.errors.push((file_path, e)),
            }
        }
    }

    result
}

/// Lists the `.json` files of a directory in path order.
fn json_files(path: &Path) -> std::result::Result<Vec<PathBuf>, LoadError> {
    if !path.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let file_path = entry?.path();
        if file_path.extension().is_some_and(|ext| ext == "json") {
            files.push(file_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads one enumeration type from a single JSON file.
fn load_single_file(path: &Path) -> std::result::Result<DataEnum, LoadError> {
    let content = fs::read_to_string(path)?;
    let definition: DefinitionFile =
        serde_json::from_str(&content).map_err(|e| LoadError::Json {
            file: path.to_path_buf(),
            error: e,
        })?;
    let data_enum =
        definition
            .into_data_enum()
            .map_err(|e| LoadError::Definition {
                file: path.to_path_buf(),
                error: e,
            })?;
    debug!(
        path = %path.display(),
        enumeration = %data_enum.name(),
        members = data_enum.len(),
        "loaded enumeration definition"
    );
    Ok(data_enum)
}

// Global configuration state
static CUSTOM_CONFIG: Mutex<Option<DirectoryConfig>> = Mutex::new(None);
static CONFIG_LOCKED: AtomicBool = AtomicBool::new(false);

/// Error returned when configuration cannot be modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration was attempted after the catalog was initialized.
    #[error(
        "Cannot modify directory configuration after CATALOG has been accessed"
    )]
    AlreadyInitialized,
}

/// Sets custom directory configuration for definition loading.
///
/// This function must be called **before** the first access to `CATALOG`.
/// Once `CATALOG` is accessed, the configuration is locked and cannot be
/// changed.
///
/// # Examples
///
/// ```rust,ignore
/// use data_enum::{set_directory_config, DirectoryConfig, CATALOG};
///
/// set_directory_config(DirectoryConfig::with_paths(vec![
///     "/custom/path".into(),
/// ])).expect("Configuration should succeed");
///
/// // Now access CATALOG - it will use the custom configuration
/// let binding = CATALOG.get();
/// ```
pub fn set_directory_config(
    config: DirectoryConfig,
) -> std::result::Result<(), ConfigError> {
    if CONFIG_LOCKED.load(Ordering::SeqCst) {
        return Err(ConfigError::AlreadyInitialized);
    }
    *CUSTOM_CONFIG.lock().unwrap_or_else(PoisonError::into_inner) = Some(config);
    Ok(())
}

/// Adds additional search paths to the directory configuration.
///
/// This function must be called **before** the first access to `CATALOG`.
/// If no configuration has been set, the paths are appended to the default
/// directory.
pub fn add_search_paths(
    paths: Vec<PathBuf>,
) -> std::result::Result<(), ConfigError> {
    if CONFIG_LOCKED.load(Ordering::SeqCst) {
        return Err(ConfigError::AlreadyInitialized);
    }
    let mut guard = CUSTOM_CONFIG.lock().unwrap_or_else(PoisonError::into_inner);
    let config = guard.get_or_insert_with(DirectoryConfig::default_only);
    for path in paths {
        config.add_path(path);
    }
    Ok(())
}

/// Gets the current directory configuration, locking it for future
/// modifications.
///
/// This is called internally during `CATALOG` initialization.
pub(crate) fn get_and_lock_config() -> DirectoryConfig {
    CONFIG_LOCKED.store(true, Ordering::SeqCst);
    CUSTOM_CONFIG
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .unwrap_or_else(DirectoryConfig::default_only)
}

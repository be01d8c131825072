//! Data Enums: enumerations whose members carry validated, uniquely indexed
//! data.
//!
//! A data enum is a closed set of singleton members. Each member has a unique
//! primary key and a value for every attribute declared by its type's
//! [`Schema`]. Attributes declared unique are also lookup keys.
//!
//! # Basic Usage
//!
//! ```rust
//! use data_enum::{DataEnum, Error, Schema, Value, args};
//!
//! // Declare the type
//! let schema = Schema::builder("Currency")
//!     .attribute("symbol")
//!     .unique_attribute("name")
//!     .attribute("plural_name")
//!     .build()
//!     .unwrap();
//! let mut currencies = DataEnum::eager(schema);
//!
//! // Construct members, positionally or by keyword
//! let usd = currencies
//!     .construct(args!(
//!         "USD",
//!         symbol = "$",
//!         name = "United States dollar",
//!         plural_name = "United States dollars",
//!     ))
//!     .unwrap();
//! currencies
//!     .construct(args!("EUR", "€", "Euro", "Euros"))
//!     .unwrap();
//!
//! // Look members up by primary key or unique attribute
//! assert_eq!(currencies.member("USD").unwrap(), usd);
//! assert_eq!(currencies.member_by("name", "Euro").unwrap().to_string(), "EUR");
//! assert_eq!(currencies.get(args!("AAA", default = &usd)).unwrap(), Value::from(&usd));
//! assert!(matches!(
//!     currencies.get(args!("AAA")),
//!     Err(Error::MemberNotFound { .. })
//! ));
//! ```
//!
//! # Registration Modes
//!
//! An [`eager`](DataEnum::eager) type checks and registers each member as it
//! is constructed. A [`deferred`](DataEnum::deferred) type only builds
//! members; a single [`register`](DataEnum::register) call validates the
//! batch and seals the type.
//!
//! # Directory Loading Feature
//!
//! When the `directory-loading` feature is enabled (default), enumeration
//! types can also be declared in JSON definition files.
//!
//! ## Default Behavior
//!
//! On first access to [`CATALOG`], the crate automatically:
//! 1. Scans `~/.data-enums/` for JSON files
//! 2. Declares one enumeration type per `*.json` file found
//! 3. Logs and skips files that fail to load
//!
//! ## Custom Configuration
//!
//! Configure search paths before first access (requires `directory-loading`
//! feature):
//!
//! ```rust,ignore
//! use data_enum::{set_directory_config, DirectoryConfig};
//!
//! set_directory_config(DirectoryConfig::with_paths(vec![
//!     "/etc/data-enums".into(),
//! ])).unwrap();
//! ```
//!
//! ## Disabling Directory Loading
//!
//! ```toml
//! [dependencies]
//! data-enum = { version = "0.3", default-features = false }
//! ```

mod error;
pub use error::{ConfigurationError, Error, Result};

mod value;
pub use value::Value;

mod schema;
pub use schema::{
    AttributeSpec, DEFAULT_PRIMARY_ATTRIBUTE, RESERVED_NAMES, RESERVED_PREFIX,
    Schema, SchemaBuilder,
};

mod args;
pub use args::Args;

mod member;
pub use member::Member;

mod unique;

mod registry;
pub use registry::Registry;

mod data_enum;
pub use data_enum::{DataEnum, RegistrationMode};

mod lookup;
pub use lookup::DEFAULT_KEYWORD;

mod catalog;
pub use catalog::Catalog;

mod global_catalog;
pub use global_catalog::*;

#[cfg(feature = "directory-loading")]
mod directory_loader;

#[cfg(feature = "directory-loading")]
pub use directory_loader::{
    ConfigError, DefinitionFile, DirectoryConfig, LoadError, LoadResult,
    MemberEntry, add_search_paths, load_from_config, load_from_directory,
    set_directory_config,
};

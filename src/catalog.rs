use std::{collections::HashMap, sync::Arc};
#[cfg(feature = "directory-loading")]
use std::path::Path;

use crate::{DataEnum, Member, Result, Value};

/// A collection of enumeration types, keyed by type name.
///
/// The `Catalog` lets enumerations declared in different places, or loaded
/// from definition files, be found by name at runtime:
/// - Find an enumeration type by its name
/// - Resolve a member of a named type by primary key
/// - Extend the collection with types declared in code or on disk
///
/// # Examples
///
/// ```
/// use data_enum::{Catalog, DataEnum, Schema, args};
///
/// let mut currencies = DataEnum::eager(
///     Schema::builder("Currency").attribute("symbol").build().unwrap(),
/// );
/// currencies.construct(args!("USD", "$")).unwrap();
///
/// let mut catalog = Catalog::new([currencies]);
/// assert_eq!(catalog.len(), 1);
///
/// let usd = catalog.member("Currency", "USD").unwrap().unwrap();
/// assert_eq!(usd.to_string(), "USD");
///
/// // Members may still be added to an eager type held by the catalog.
/// catalog
///     .enumeration_mut("Currency")
///     .unwrap()
///     .construct(args!("EUR", "€"))
///     .unwrap();
/// assert_eq!(catalog.enumeration("Currency").unwrap().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    enumerations_by_name: HashMap<String, DataEnum>,
}

impl Catalog {
    /// Creates a catalog holding the given enumeration types.
    ///
    /// When two types share a name the later one wins.
    pub fn new<T>(enumerations: T) -> Self
    where
        T: IntoIterator<Item = DataEnum>,
    {
        let mut catalog = Self::default();
        for data_enum in enumerations {
            catalog.insert(data_enum);
        }
        catalog
    }

    /// Inserts an enumeration type, returning any type it replaced.
    pub fn insert(&mut self, data_enum: DataEnum) -> Option<DataEnum> {
        self.enumerations_by_name
            .insert(data_enum.name().to_string(), data_enum)
    }

    pub fn remove(&mut self, name: &str) -> Option<DataEnum> {
        self.enumerations_by_name.remove(name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&DataEnum> {
        self.enumerations_by_name.get(name)
    }

    pub fn enumeration_mut(&mut self, name: &str) -> Option<&mut DataEnum> {
        self.enumerations_by_name.get_mut(name)
    }

    /// Type names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> =
            self.enumerations_by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize { self.enumerations_by_name.len() }

    pub fn is_empty(&self) -> bool { self.enumerations_by_name.is_empty() }

    /// Resolves a member of a named type by primary key.
    ///
    /// Returns `None` when the catalog has no such type; lookup errors from
    /// the type itself are passed through.
    pub fn member(
        &self,
        enumeration: &str,
        key: impl Into<Value>,
    ) -> Option<Result<Arc<Member>>> {
        self.enumeration(enumeration)
            .map(|data_enum| data_enum.member(key))
    }

    /// Loads enumeration types from a directory of JSON definition files.
    ///
    /// Types loaded from files replace types of the same name already in the
    /// catalog.
    ///
    /// This method is only available when the `directory-loading` feature is
    /// enabled.
    ///
    /// # Returns
    ///
    /// Returns `Ok(count)` with the number of types loaded, or the first
    /// error encountered.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use data_enum::Catalog;
    /// use std::path::Path;
    ///
    /// let mut catalog = Catalog::default();
    /// let count = catalog.load_from_directory(Path::new("/etc/data-enums"))?;
    /// println!("Loaded {} enumerations", count);
    /// ```
    #[cfg(feature = "directory-loading")]
    pub fn load_from_directory(
        &mut self,
        path: &Path,
    ) -> std::result::Result<usize, crate::LoadError> {
        let enumerations = crate::directory_loader::load_from_directory(path)?;
        let count = enumerations.len();
        for data_enum in enumerations {
            self.insert(data_enum);
        }
        Ok(count)
    }

    /// Loads enumeration types from every directory in the configuration.
    ///
    /// Directories are processed in order, so a type defined in a later
    /// directory replaces one of the same name from an earlier directory.
    /// Files that fail to load are reported in the returned `LoadResult`
    /// and skipped.
    ///
    /// This method is only available when the `directory-loading` feature is
    /// enabled.
    #[cfg(feature = "directory-loading")]
    pub fn load_from_config(
        &mut self,
        config: &crate::DirectoryConfig,
    ) -> crate::LoadResult {
        let result = crate::directory_loader::load_from_config(config);
        for data_enum in result.enumerations.values() {
            self.insert(data_enum.clone());
        }
        result
    }
}

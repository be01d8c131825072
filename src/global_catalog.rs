use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use super::Catalog;

/// A lazily initialized singleton that holds the process-wide catalog.
///
/// The catalog is created on first access. With the `directory-loading`
/// feature it is then populated from the directory configuration, which is
/// locked from that point on; definition files that fail to load are logged
/// and skipped.
///
/// # Thread Safety
///
/// The implementation uses a mutex to protect the catalog, and initialization
/// is performed only once across all threads using `std::sync::Once`.
#[doc(hidden)]
#[derive(Debug)]
pub struct LazyCatalog {
    init: Once,
    data: Mutex<Option<Catalog>>,
}

impl LazyCatalog {
    /// Gets the process-wide catalog, initializing it if necessary.
    pub fn get(&self) -> MutexGuard<'_, Option<Catalog>> {
        self.init.call_once(|| {
            #[allow(unused_mut)]
            let mut catalog = Catalog::default();

            #[cfg(feature = "directory-loading")]
            {
                let config = crate::directory_loader::get_and_lock_config();
                let result = catalog.load_from_config(&config);
                for (path, error) in &result.errors {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "skipped enumeration definition"
                    );
                }
                tracing::debug!(
                    enumerations = catalog.len(),
                    files = result.files_processed.len(),
                    "initialized catalog"
                );
            }

            *self.data.lock().unwrap_or_else(PoisonError::into_inner) =
                Some(catalog);
        });
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The process-wide catalog of enumeration types.
///
/// Types may be inserted during startup and looked up by name afterwards.
///
/// # Examples
///
/// ```
/// use data_enum::{CATALOG, DataEnum, Schema, args};
///
/// let mut planets = DataEnum::eager(
///     Schema::builder("Planet").attribute("moons").build().unwrap(),
/// );
/// planets.construct(args!("Earth", 1)).unwrap();
///
/// let mut binding = CATALOG.get();
/// let catalog = binding.as_mut().unwrap();
/// catalog.insert(planets);
///
/// let earth = catalog.member("Planet", "Earth").unwrap().unwrap();
/// assert_eq!(earth.value("moons").and_then(|moons| moons.as_int()), Some(1));
/// ```
pub static CATALOG: LazyCatalog = LazyCatalog {
    init: Once::new(),
    data: Mutex::new(None),
};

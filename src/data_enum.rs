use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    Args, ConfigurationError, Member, Registry, Result, Schema, unique,
};

/// How constructed members enter an enumeration's registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "directory-loading",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RegistrationMode {
    /// Each member is checked and appended as it is constructed. The
    /// registry never closes.
    #[default]
    Eager,
    /// Members are held by the caller until one [`DataEnum::register`] call
    /// validates them as a batch and seals the registry.
    Deferred,
}

/// An enumeration type: its schema plus the registry of its members.
///
/// # Examples
///
/// ```
/// use data_enum::{DataEnum, Schema, Value, args};
///
/// let mut currencies = DataEnum::eager(
///     Schema::builder("Currency")
///         .attribute("symbol")
///         .attribute("name")
///         .attribute("plural_name")
///         .build()
///         .unwrap(),
/// );
/// let usd = currencies
///     .construct(args!(
///         "USD",
///         symbol = "$",
///         name = "United States dollar",
///         plural_name = "United States dollars",
///     ))
///     .unwrap();
///
/// assert_eq!(currencies.member("USD").unwrap(), usd);
/// assert_eq!(currencies.get(args!("AAA", default = &usd)).unwrap(), Value::from(&usd));
/// assert!(currencies.member("AAA").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct DataEnum {
    schema: Arc<Schema>,
    mode: RegistrationMode,
    registry: Registry,
    constructed: usize,
}

impl DataEnum {
    /// Creates an enumeration type with no members.
    pub fn new(schema: Schema, mode: RegistrationMode) -> Self {
        Self {
            schema: Arc::new(schema),
            mode,
            registry: Registry::default(),
            constructed: 0,
        }
    }

    /// Creates a type whose members are registered as they are constructed.
    pub fn eager(schema: Schema) -> Self {
        Self::new(schema, RegistrationMode::Eager)
    }

    /// Creates a type whose members are registered in one batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use data_enum::{DataEnum, Schema, args};
    ///
    /// let mut units = DataEnum::deferred(
    ///     Schema::builder("Unit").primary_attribute("symbol").build().unwrap(),
    /// );
    /// let metre = units.construct(args!("m")).unwrap();
    /// assert!(units.is_empty());
    ///
    /// units.register([metre]).unwrap();
    /// assert!(units.is_sealed());
    /// assert_eq!(units.member("m").unwrap().to_string(), "m");
    /// ```
    pub fn deferred(schema: Schema) -> Self {
        Self::new(schema, RegistrationMode::Deferred)
    }

    pub fn name(&self) -> &str { self.schema.name() }

    pub fn schema(&self) -> &Arc<Schema> { &self.schema }

    pub fn mode(&self) -> RegistrationMode { self.mode }

    /// The registered members and their lookup indices.
    pub fn registry(&self) -> &Registry { &self.registry }

    /// Registered members in insertion order.
    pub fn members(&self) -> &[Arc<Member>] { self.registry.members() }

    pub fn len(&self) -> usize { self.registry.len() }

    pub fn is_empty(&self) -> bool { self.registry.is_empty() }

    /// Whether a batch was registered, after which no member may be added.
    pub fn is_sealed(&self) -> bool { self.registry.is_sealed() }

    /// Builds a member of this type.
    ///
    /// In eager mode the member is checked for collisions and registered
    /// before it is returned. In deferred mode it is only built; pass it to
    /// [`register`](Self::register) later.
    ///
    /// A member constructed without a primary key gets the number of members
    /// of this type constructed before it.
    pub fn construct(&mut self, args: Args) -> Result<Arc<Member>> {
        if self.registry.is_sealed() {
            return Err(ConfigurationError::Sealed(self.name().to_string()).into());
        }

        let auto_key = match self.mode {
            RegistrationMode::Eager => self.registry.len(),
            RegistrationMode::Deferred => self.constructed,
        };
        let member = Arc::new(Member::construct(&self.schema, args, auto_key)?);

        if self.mode == RegistrationMode::Eager {
            unique::check_candidate(&self.schema, &self.registry, &member)?;
            self.registry.push(member.clone());
            trace!(enumeration = %self.name(), member = ?member, "registered member");
        }
        self.constructed += 1;
        Ok(member)
    }

    /// Validates a batch of members built by [`construct`](Self::construct)
    /// and makes it the sealed member set.
    ///
    /// Only available in deferred mode, and only once.
    pub fn register<T>(&mut self, members: T) -> Result<()>
    where
        T: IntoIterator<Item = Arc<Member>>,
    {
        if self.mode != RegistrationMode::Deferred {
            return Err(
                ConfigurationError::NotDeferred(self.name().to_string()).into()
            );
        }
        if self.registry.is_sealed() {
            return Err(ConfigurationError::AlreadyRegistered(
                self.name().to_string(),
            )
            .into());
        }

        let batch: Vec<Arc<Member>> = members.into_iter().collect();
        if let Some(foreign) =
            batch.iter().find(|member| !member.belongs_to(&self.schema))
        {
            return Err(ConfigurationError::ForeignMember {
                enumeration: self.name().to_string(),
                member: format!("{:?}", foreign),
            }
            .into());
        }
        unique::check_batch(&self.schema, &batch)?;

        debug!(
            enumeration = %self.name(),
            members = batch.len(),
            "registered and sealed enumeration"
        );
        self.registry.seal_with(batch);
        Ok(())
    }
}

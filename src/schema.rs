use std::collections::HashMap;

use tracing::debug;

use crate::{ConfigurationError, Member, Result, Value};

/// The primary attribute used when a type does not name one.
///
/// Keys under this attribute are not exposed by name, and auto-generated
/// keys under it are never returned by lookups.
pub const DEFAULT_PRIMARY_ATTRIBUTE: &str = "_id_";

/// Attribute names beginning with this prefix are reserved for internal use.
pub const RESERVED_PREFIX: &str = "_";

/// Names used by enumeration and member operations, which therefore cannot be
/// attribute names.
pub const RESERVED_NAMES: &[&str] = &[
    "get",
    "members",
    "attributes",
    "primary_attribute",
    "value",
    "default",
    "is_auto",
];

/// One declared data attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSpec {
    name: String,
    unique: bool,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), unique: false }
    }

    /// An attribute whose values are unique across members and which can
    /// therefore be used as a lookup key.
    pub fn unique(name: impl Into<String>) -> Self {
        Self { name: name.into(), unique: true }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn is_unique(&self) -> bool { self.unique }
}

impl From<&str> for AttributeSpec {
    fn from(name: &str) -> Self { Self::new(name) }
}

impl From<(&str, bool)> for AttributeSpec {
    fn from((name, unique): (&str, bool)) -> Self {
        Self { name: name.to_string(), unique }
    }
}

/// Where a key's value lives on a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum KeySlot {
    Primary,
    Attribute(usize),
}

impl KeySlot {
    pub(crate) fn value_of(self, member: &Member) -> &Value {
        match self {
            KeySlot::Primary => member.primary_key(),
            KeySlot::Attribute(index) => &member.values()[index],
        }
    }
}

/// The validated shape of one enumeration type.
///
/// A schema is immutable once built. Besides the declared attributes it holds
/// two views derived at build time: the keys checked for uniqueness (primary
/// first, then unique attributes in declaration order) and the dispatch table
/// from lookup names to key slots.
///
/// # Examples
///
/// ```
/// use data_enum::Schema;
///
/// let schema = Schema::builder("Currency")
///     .primary_attribute("code")
///     .attribute("symbol")
///     .unique_attribute("name")
///     .attribute("plural_name")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     schema.attribute_names().collect::<Vec<_>>(),
///     ["symbol", "name", "plural_name"]
/// );
/// assert_eq!(schema.unique_attribute_names().collect::<Vec<_>>(), ["name"]);
/// ```
#[derive(Debug)]
pub struct Schema {
    name: String,
    primary_attribute: String,
    attributes: Vec<AttributeSpec>,
    checked_keys: Vec<KeySlot>,
    lookup_keys: HashMap<String, KeySlot>,
}

impl Schema {
    /// Starts declaring an enumeration type called `name`.
    ///
    /// Nothing is validated until [`SchemaBuilder::build`].
    ///
    /// # Examples
    ///
    /// ```
    /// use data_enum::{DEFAULT_PRIMARY_ATTRIBUTE, Schema};
    ///
    /// let schema = Schema::builder("Planet").attribute("moons").build().unwrap();
    /// assert_eq!(schema.name(), "Planet");
    /// assert_eq!(schema.primary_attribute(), DEFAULT_PRIMARY_ATTRIBUTE);
    /// ```
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            primary_attribute: None,
            attributes: Vec::new(),
        }
    }

    /// The enumeration type's name, as shown in a member's debug form.
    pub fn name(&self) -> &str { &self.name }

    /// The name under which the primary key is declared.
    pub fn primary_attribute(&self) -> &str { &self.primary_attribute }

    /// Whether the type fell back to [`DEFAULT_PRIMARY_ATTRIBUTE`].
    pub fn has_default_primary(&self) -> bool {
        self.primary_attribute == DEFAULT_PRIMARY_ATTRIBUTE
    }

    /// Declared attributes in schema order, primary attribute excluded.
    pub fn attributes(&self) -> &[AttributeSpec] { &self.attributes }

    pub fn attribute_count(&self) -> usize { self.attributes.len() }

    /// Attribute names in schema order, which is also positional order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(AttributeSpec::name)
    }

    /// Names of the attributes usable as lookup keys.
    pub fn unique_attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|spec| spec.is_unique())
            .map(AttributeSpec::name)
    }

    /// Position of a declared attribute in schema order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|spec| spec.name() == name)
    }

    pub(crate) fn checked_keys(&self) -> &[KeySlot] { &self.checked_keys }

    pub(crate) fn lookup_slot(&self, name: &str) -> Option<KeySlot> {
        self.lookup_keys.get(name).copied()
    }

    pub(crate) fn key_name(&self, slot: KeySlot) -> &str {
        match slot {
            KeySlot::Primary => &self.primary_attribute,
            KeySlot::Attribute(index) => self.attributes[index].name(),
        }
    }
}

/// Collects a type's declaration and validates it in [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    name: String,
    primary_attribute: Option<String>,
    attributes: Vec<AttributeSpec>,
}

impl SchemaBuilder {
    /// Names the primary attribute.
    ///
    /// A named primary attribute is a lookup key and may be passed as a
    /// keyword when constructing members. Without one the type uses
    /// [`DEFAULT_PRIMARY_ATTRIBUTE`].
    pub fn primary_attribute(mut self, name: impl Into<String>) -> Self {
        self.primary_attribute = Some(name.into());
        self
    }

    /// Appends an attribute that is not unique.
    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.spec(AttributeSpec::new(name))
    }

    /// Appends a unique attribute, which is also a lookup key.
    pub fn unique_attribute(self, name: impl Into<String>) -> Self {
        self.spec(AttributeSpec::unique(name))
    }

    /// Appends an attribute given as a spec, a name, or a `(name, unique)`
    /// pair.
    pub fn spec(mut self, spec: impl Into<AttributeSpec>) -> Self {
        self.attributes.push(spec.into());
        self
    }

    /// Appends several attributes in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use data_enum::Schema;
    ///
    /// let schema = Schema::builder("Currency")
    ///     .specs([("symbol", false), ("name", true)])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(schema.unique_attribute_names().collect::<Vec<_>>(), ["name"]);
    /// ```
    pub fn specs<T>(mut self, specs: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<AttributeSpec>,
    {
        self.attributes.extend(specs.into_iter().map(Into::into));
        self
    }

    /// Validates the declaration.
    ///
    /// Fails with a [`ConfigurationError`] when a name is empty, declared
    /// twice, reserved, equal to the primary attribute, or begins with
    /// [`RESERVED_PREFIX`].
    pub fn build(self) -> Result<Schema> {
        let primary_attribute = self
            .primary_attribute
            .unwrap_or_else(|| DEFAULT_PRIMARY_ATTRIBUTE.to_string());
        if primary_attribute.is_empty() {
            return Err(ConfigurationError::EmptyName.into());
        }

        let mut lookup_keys = HashMap::new();
        if primary_attribute != DEFAULT_PRIMARY_ATTRIBUTE {
            lookup_keys.insert(primary_attribute.clone(), KeySlot::Primary);
        }
        let mut checked_keys = vec![KeySlot::Primary];

        for (index, spec) in self.attributes.iter().enumerate() {
            let name = spec.name();
            if name.is_empty() {
                return Err(ConfigurationError::EmptyName.into());
            }
            if name == primary_attribute || RESERVED_NAMES.contains(&name) {
                return Err(
                    ConfigurationError::ReservedName(name.to_string()).into()
                );
            }
            if name.starts_with(RESERVED_PREFIX) {
                return Err(ConfigurationError::ReservedPrefix {
                    name: name.to_string(),
                    prefix: RESERVED_PREFIX,
                }
                .into());
            }
            if self.attributes[..index].iter().any(|prev| prev.name() == name)
            {
                return Err(ConfigurationError::DuplicateAttribute(
                    name.to_string(),
                )
                .into());
            }
            if spec.is_unique() {
                checked_keys.push(KeySlot::Attribute(index));
                lookup_keys.insert(name.to_string(), KeySlot::Attribute(index));
            }
        }

        debug!(
            enumeration = %self.name,
            primary = %primary_attribute,
            attributes = self.attributes.len(),
            "declared enumeration schema"
        );

        Ok(Schema {
            name: self.name,
            primary_attribute,
            attributes: self.attributes,
            checked_keys,
            lookup_keys,
        })
    }
}

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{Args, Error, Result, Schema, Value, args::take_keyword};

/// One singleton value of an enumeration type.
///
/// A member carries its primary key and one value per declared attribute, in
/// schema order. Identity is the primary key alone: two members are equal,
/// and hash equally, exactly when their primary keys are equal.
///
/// The string form is the primary key's text; the debug form reads like the
/// constructor call that would rebuild the member.
///
/// # Examples
///
/// ```
/// use data_enum::{DataEnum, Schema, args};
///
/// let schema = Schema::builder("TestStringEnum")
///     .attribute("name")
///     .attribute("age")
///     .build()
///     .unwrap();
/// let mut people = DataEnum::eager(schema);
/// let susan = people.construct(args!("person A", "Susan", 13)).unwrap();
///
/// assert_eq!(susan.to_string(), "person A");
/// assert_eq!(
///     format!("{:?}", susan),
///     r#"TestStringEnum("person A", name="Susan", age=13)"#
/// );
/// assert_eq!(susan.value("age").and_then(|age| age.as_int()), Some(13));
/// ```
pub struct Member {
    schema: Arc<Schema>,
    primary_key: Value,
    is_auto: bool,
    values: Vec<Value>,
}

impl Member {
    /// Builds a member from call arguments.
    ///
    /// The primary key is the first positional argument, else the keyword
    /// named after the primary attribute, else `auto_key`. Remaining
    /// positionals fill attributes in schema order and keywords fill the
    /// rest.
    ///
    /// Fewer keywords than uncovered attributes is reported as missing
    /// attributes, even when some of those keywords are also unknown.
    pub(crate) fn construct(
        schema: &Arc<Schema>,
        args: Args,
        auto_key: usize,
    ) -> Result<Self> {
        let (positional, mut keywords) = args.into_parts();
        let mut positional = positional.into_iter();

        let (primary_key, is_auto) = match positional.next() {
            Some(key) => (key, false),
            None => match take_keyword(&mut keywords, schema.primary_attribute())
            {
                Some(key) => (key, false),
                None => (auto_value(auto_key), true),
            },
        };

        let expected = schema.attribute_count();
        let mut values: Vec<Option<Value>> = positional.map(Some).collect();
        let covered = values.len();
        if covered > expected {
            return Err(Error::Arity { expected, got: covered });
        }
        values.resize(expected, None);

        // Too few keywords to cover the rest: report what is absent before
        // judging any keyword.
        if keywords.len() < expected - covered {
            let missing: Vec<String> = schema
                .attribute_names()
                .skip(covered)
                .filter(|name| {
                    !keywords.iter().any(|(key, _)| key.as_str() == *name)
                })
                .map(str::to_string)
                .collect();
            return Err(Error::MissingAttributes(missing));
        }

        for (name, value) in keywords {
            match schema.position(&name) {
                Some(index) if index >= covered && values[index].is_none() => {
                    values[index] = Some(value);
                }
                _ => return Err(Error::UnexpectedAttribute(name)),
            }
        }

        let missing: Vec<String> = schema
            .attribute_names()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingAttributes(missing));
        }

        Ok(Self {
            schema: schema.clone(),
            primary_key,
            is_auto,
            values: values.into_iter().flatten().collect(),
        })
    }

    pub fn schema(&self) -> &Arc<Schema> { &self.schema }

    pub fn primary_key(&self) -> &Value { &self.primary_key }

    /// Whether the primary key was synthesized rather than supplied.
    pub fn is_auto(&self) -> bool { self.is_auto }

    /// Attribute values in schema order.
    pub fn values(&self) -> &[Value] { &self.values }

    /// The value of a declared attribute, or of a named primary attribute.
    ///
    /// The reserved default primary attribute is not exposed by name; use
    /// [`primary_key`](Self::primary_key) instead.
    pub fn value(&self, name: &str) -> Option<&Value> {
        if name == self.schema.primary_attribute() {
            return (!self.schema.has_default_primary())
                .then_some(&self.primary_key);
        }
        self.schema.position(name).map(|index| &self.values[index])
    }

    /// `(name, value)` pairs in schema order, primary attribute excluded.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.attribute_names().zip(&self.values)
    }

    pub(crate) fn belongs_to(&self, schema: &Arc<Schema>) -> bool {
        Arc::ptr_eq(&self.schema, schema)
    }
}

fn auto_value(auto_key: usize) -> Value {
    Value::Int(i64::try_from(auto_key).unwrap_or(i64::MAX))
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool { self.primary_key == other.primary_key }
}

impl Eq for Member {}

/// A member equals a value only when that value refers to a member with the
/// same primary key.
impl PartialEq<Value> for Member {
    fn eq(&self, other: &Value) -> bool {
        other.as_member().is_some_and(|member| **member == *self)
    }
}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) { self.primary_key.hash(state); }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary_key)
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}", self.schema.name(), self.primary_key)?;
        for (name, value) in self.attributes() {
            write!(f, ", {}={:?}", name, value)?;
        }
        f.write_str(")")
    }
}

/// Members whose primary key is an integer convert to it.
impl TryFrom<&Member> for i64 {
    type Error = Value;

    fn try_from(member: &Member) -> std::result::Result<Self, Self::Error> {
        member
            .primary_key
            .as_int()
            .ok_or_else(|| member.primary_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    use super::*;
    use crate::args;

    fn currency() -> Arc<Schema> {
        Arc::new(
            Schema::builder("Currency")
                .attribute("symbol")
                .attribute("name")
                .attribute("plural_name")
                .build()
                .unwrap(),
        )
    }

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_keyword_construction() {
        let schema = currency();
        let usd = Member::construct(
            &schema,
            args!(
                "USD",
                symbol = "$",
                name = "United States dollar",
                plural_name = "United States dollars",
            ),
            0,
        )
        .unwrap();
        assert_eq!(usd.primary_key(), &Value::from("USD"));
        assert!(!usd.is_auto());
        assert_eq!(usd.value("symbol"), Some(&Value::from("$")));
        assert_eq!(usd.value(crate::DEFAULT_PRIMARY_ATTRIBUTE), None);
        assert_eq!(usd.value("count"), None);
    }

    #[test]
    fn test_mixed_construction() {
        let schema = currency();
        let usd = Member::construct(
            &schema,
            args!(
                "USD",
                "$",
                "United States dollar",
                plural_name = "United States dollars",
            ),
            0,
        )
        .unwrap();
        assert_eq!(
            usd.attributes().map(|(name, _)| name).collect::<Vec<_>>(),
            ["symbol", "name", "plural_name"]
        );
        assert_eq!(
            usd.value("plural_name"),
            Some(&Value::from("United States dollars"))
        );
    }

    #[test]
    fn test_auto_key() {
        let schema = currency();
        let member = Member::construct(
            &schema,
            args!(symbol = "₿", name = "Bitcoin", plural_name = "Bitcoins"),
            4,
        )
        .unwrap();
        assert!(member.is_auto());
        assert_eq!(member.primary_key(), &Value::from(4));
        assert_eq!(i64::try_from(&member), Ok(4));
    }

    #[test]
    fn test_primary_by_keyword() {
        let schema = Arc::new(
            Schema::builder("Currency")
                .primary_attribute("code")
                .attribute("symbol")
                .build()
                .unwrap(),
        );
        let member =
            Member::construct(&schema, args!(code = "EUR", symbol = "€"), 0)
                .unwrap();
        assert!(!member.is_auto());
        assert_eq!(member.value("code"), Some(&Value::from("EUR")));
        assert_eq!(format!("{:?}", member), r#"Currency("EUR", symbol="€")"#);
    }

    #[test]
    fn test_no_arguments_is_missing() {
        let schema = Arc::new(
            Schema::builder("TestEnum").attribute("description").build().unwrap(),
        );
        let err = Member::construct(&schema, args!(), 0).unwrap_err();
        assert_eq!(
            err,
            Error::MissingAttributes(vec!["description".to_string()])
        );
    }

    #[test]
    fn test_missing_lists_every_name() {
        let err = Member::construct(&currency(), args!("MXN", symbol = "$"), 0)
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingAttributes(vec![
                "name".to_string(),
                "plural_name".to_string()
            ])
        );
    }

    #[test]
    fn test_missing_wins_over_unknown_keyword() {
        let schema = currency();
        let err = Member::construct(
            &schema,
            args!("MXN", symbol = "$", count = 10),
            0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::MissingAttributes(vec![
                "name".to_string(),
                "plural_name".to_string()
            ])
        );

        // With enough keywords the unknown one is reported instead.
        let err = Member::construct(
            &schema,
            args!("MXN", symbol = "$", name = "Mexican peso", count = 10),
            0,
        )
        .unwrap_err();
        assert_eq!(err, Error::UnexpectedAttribute("count".to_string()));
    }

    #[test]
    fn test_too_many_positionals() {
        let err = Member::construct(
            &currency(),
            args!("USD", "$", "United States dollar", "United States dollars", 100),
            0,
        )
        .unwrap_err();
        assert_eq!(err, Error::Arity { expected: 3, got: 4 });
    }

    #[test]
    fn test_unexpected_keywords() {
        let schema = currency();
        let err = Member::construct(
            &schema,
            args!(
                "MXN",
                symbol = "$",
                name = "Mexican peso",
                plural_name = "Mexican pesos",
                count = 10,
            ),
            0,
        )
        .unwrap_err();
        assert_eq!(err, Error::UnexpectedAttribute("count".to_string()));

        // Already covered positionally.
        let err = Member::construct(
            &schema,
            args!("MXN", "$", symbol = "$", name = "x", plural_name = "y"),
            0,
        )
        .unwrap_err();
        assert_eq!(err, Error::UnexpectedAttribute("symbol".to_string()));

        // Given twice.
        let err = Member::construct(
            &schema,
            args!("MXN", "$", "x", plural_name = "y", plural_name = "z"),
            0,
        )
        .unwrap_err();
        assert_eq!(err, Error::UnexpectedAttribute("plural_name".to_string()));

        // The primary key was already supplied positionally.
        let err = Member::construct(
            &schema,
            args!("MXN", "$", "x", "y", _id_ = "MXN"),
            0,
        )
        .unwrap_err();
        assert_eq!(err, Error::UnexpectedAttribute("_id_".to_string()));
    }

    #[test]
    fn test_identity() {
        let schema = currency();
        let a = Member::construct(&schema, args!(1, "$", "a", "as"), 0).unwrap();
        let b = Member::construct(&schema, args!(1, "€", "b", "bs"), 0).unwrap();
        let c = Member::construct(&schema, args!(2, "$", "a", "as"), 0).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(hash_of(&a), hash_of(&Value::from(1)));

        let a = Arc::new(a);
        assert!(b == Value::from(&a));
        assert!(c != Value::from(&a));
        assert!(*a != Value::from("bitcoin"));
        assert!(*a != Value::from(1));
    }

    #[test]
    fn test_non_integer_key() {
        let member =
            Member::construct(&currency(), args!("USD", "$", "a", "b"), 0)
                .unwrap();
        assert_eq!(i64::try_from(&member), Err(Value::from("USD")));
    }
}

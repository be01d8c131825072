//! Member lookup by primary key or unique attribute.

use std::sync::Arc;

use crate::{
    Args, DataEnum, Error, Member, Result, Value, args::take_keyword,
    schema::KeySlot,
};

/// Keyword that carries a lookup default.
pub const DEFAULT_KEYWORD: &str = "default";

impl DataEnum {
    /// Looks up a member from call-like arguments.
    ///
    /// Exactly one key is accepted: a single positional value, matched
    /// against the primary key, or a single `attribute = value` keyword,
    /// where the attribute is the named primary attribute or a unique one. A
    /// default may follow as a second positional or as `default = ...`.
    ///
    /// A hit is returned as [`Value::Member`]. On a miss the default is
    /// returned exactly as given, whatever its value; only its presence
    /// matters. Without a default a miss is [`Error::MemberNotFound`].
    ///
    /// When the type uses the default primary attribute, members whose
    /// primary key was auto-generated are never matched.
    ///
    /// # Examples
    ///
    /// ```
    /// use data_enum::{DataEnum, Schema, Value, args};
    ///
    /// let mut currencies = DataEnum::eager(
    ///     Schema::builder("Currency")
    ///         .attribute("symbol")
    ///         .unique_attribute("name")
    ///         .build()
    ///         .unwrap(),
    /// );
    /// let eur = currencies.construct(args!("EUR", "€", "Euro")).unwrap();
    ///
    /// assert_eq!(currencies.get(args!(name = "Euro")).unwrap(), Value::from(&eur));
    /// assert_eq!(currencies.get(args!("AAA", &eur)).unwrap(), Value::from(&eur));
    /// assert_eq!(currencies.get(args!("AAA", default = 0)).unwrap(), Value::from(0));
    /// assert!(currencies.get(args!(symbol = "€")).is_err());
    /// ```
    pub fn get(&self, args: Args) -> Result<Value> {
        let (mut positional, mut keywords) = args.into_parts();

        let default = if positional.len() == 2 {
            positional.pop()
        } else {
            take_keyword(&mut keywords, DEFAULT_KEYWORD)
        };

        let given = positional.len() + keywords.len();
        let (slot, value) = match (positional.pop(), keywords.pop()) {
            (Some(value), None) if given == 1 => (KeySlot::Primary, value),
            (None, Some((attribute, value))) if given == 1 => {
                let slot = self.schema().lookup_slot(&attribute).ok_or_else(
                    || Error::NoSuchLookupAttribute {
                        enumeration: self.name().to_string(),
                        attribute,
                    },
                )?;
                (slot, value)
            }
            _ => {
                return Err(Error::ArgumentShape(format!(
                    "expected exactly one lookup key; got {}",
                    given
                )));
            }
        };

        match (self.resolve(slot, &value), default) {
            (Some(member), _) => Ok(Value::Member(member.clone())),
            (None, Some(default)) => Ok(default),
            (None, None) => Err(self.not_found(slot, value)),
        }
    }

    /// Looks up a member by primary key.
    pub fn member(&self, key: impl Into<Value>) -> Result<Arc<Member>> {
        let key = key.into();
        self.resolve(KeySlot::Primary, &key)
            .cloned()
            .ok_or_else(|| self.not_found(KeySlot::Primary, key))
    }

    /// Looks up a member by the named primary attribute or a unique
    /// attribute.
    pub fn member_by(
        &self,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<Arc<Member>> {
        let slot = self.schema().lookup_slot(attribute).ok_or_else(|| {
            Error::NoSuchLookupAttribute {
                enumeration: self.name().to_string(),
                attribute: attribute.to_string(),
            }
        })?;
        let value = value.into();
        self.resolve(slot, &value)
            .cloned()
            .ok_or_else(|| self.not_found(slot, value))
    }

    fn resolve(&self, slot: KeySlot, value: &Value) -> Option<&Arc<Member>> {
        let hide_auto =
            slot == KeySlot::Primary && self.schema().has_default_primary();
        self.registry()
            .find(slot, value)
            .filter(|member| !(hide_auto && member.is_auto()))
    }

    fn not_found(&self, slot: KeySlot, value: Value) -> Error {
        Error::MemberNotFound {
            enumeration: self.name().to_string(),
            attribute: self.schema().key_name(slot).to_string(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Schema, args};

    fn currencies() -> (DataEnum, Arc<Member>) {
        let mut currencies = DataEnum::eager(
            Schema::builder("Currency")
                .attribute("symbol")
                .unique_attribute("name")
                .attribute("plural_name")
                .build()
                .unwrap(),
        );
        currencies
            .construct(args!("CAD", "$", "Canadian dollar", "Canadian dollars"))
            .unwrap();
        let usd = currencies
            .construct(args!(
                "USD",
                "$",
                "United States dollar",
                "United States dollars"
            ))
            .unwrap();
        (currencies, usd)
    }

    #[test]
    fn test_get_by_primary_key() {
        let (currencies, usd) = currencies();
        assert_eq!(currencies.get(args!("USD")).unwrap(), Value::from(&usd));
        assert_eq!(currencies.member("USD").unwrap(), usd);
    }

    #[test]
    fn test_get_by_unique_attribute() {
        let (currencies, usd) = currencies();
        assert_eq!(
            currencies.get(args!(name = "United States dollar")).unwrap(),
            Value::from(&usd)
        );
        assert_eq!(
            currencies.member_by("name", "United States dollar").unwrap(),
            usd
        );
    }

    #[test]
    fn test_defaults() {
        let (currencies, usd) = currencies();
        assert_eq!(
            currencies.get(args!("AAA", &usd)).unwrap(),
            Value::from(&usd)
        );
        assert_eq!(
            currencies.get(args!("AAA", default = &usd)).unwrap(),
            Value::from(&usd)
        );
        assert_eq!(
            currencies.get(args!(name = "nope", default = &usd)).unwrap(),
            Value::from(&usd)
        );
        assert_eq!(
            currencies.get(args!("AAA", default = None::<i64>)).unwrap(),
            Value::None
        );
        // A hit ignores the default.
        let cad = currencies.member("CAD").unwrap();
        assert_eq!(
            currencies.get(args!("CAD", default = &usd)).unwrap(),
            Value::from(&cad)
        );
    }

    #[test]
    fn test_not_found() {
        let (currencies, _) = currencies();
        let err = currencies.get(args!("AAA")).unwrap_err();
        assert_eq!(
            err,
            Error::MemberNotFound {
                enumeration: "Currency".to_string(),
                attribute: "_id_".to_string(),
                value: Value::from("AAA"),
            }
        );
        assert!(matches!(
            currencies.member_by("name", "nope"),
            Err(Error::MemberNotFound { .. })
        ));
    }

    #[test]
    fn test_argument_shapes() {
        let (currencies, usd) = currencies();
        for args in [
            args!(),
            args!(default = &usd),
            args!("USD", &usd, "extra"),
            args!("USD", &usd, hello = "there"),
            args!("USD", name = "United States dollar"),
            args!(name = "United States dollar", symbol = "$"),
            args!("USD", &usd, default = &usd),
        ] {
            assert!(matches!(
                currencies.get(args),
                Err(Error::ArgumentShape(_))
            ));
        }
    }

    #[test]
    fn test_falsy_defaults_are_returned() {
        let (currencies, _) = currencies();
        assert_eq!(
            currencies.get(args!("AAA", default = 0)).unwrap(),
            Value::from(0)
        );
        assert_eq!(
            currencies.get(args!("AAA", default = "")).unwrap(),
            Value::from("")
        );
        assert_eq!(currencies.get(args!("AAA", false)).unwrap(), Value::from(false));
        assert_eq!(
            currencies.get(args!(name = "nope", default = 0)).unwrap(),
            Value::from(0)
        );
    }

    #[test]
    fn test_no_such_lookup_attribute() {
        let (currencies, _) = currencies();
        for attribute in ["three_letters", "symbol", "_id_"] {
            let err = currencies
                .get(Args::new().keyword(attribute, "AAA"))
                .unwrap_err();
            assert_eq!(
                err,
                Error::NoSuchLookupAttribute {
                    enumeration: "Currency".to_string(),
                    attribute: attribute.to_string(),
                }
            );
        }
        assert!(matches!(
            currencies.member_by("symbol", "$"),
            Err(Error::NoSuchLookupAttribute { .. })
        ));
    }

    #[test]
    fn test_auto_keys_are_hidden_under_default_primary() {
        let mut names = DataEnum::eager(
            Schema::builder("TestAutoEnum").attribute("name").build().unwrap(),
        );
        let sharon = names.construct(args!(name = "Sharon")).unwrap();
        assert_eq!(sharon.primary_key(), &Value::from(0));

        assert!(matches!(
            names.get(args!(0)),
            Err(Error::MemberNotFound { .. })
        ));
        assert!(names.member(0).is_err());
        assert_eq!(names.get(args!(0, &sharon)).unwrap(), Value::from(&sharon));
        assert_eq!(names.get(args!(0, default = None::<i64>)).unwrap(), Value::None);

        // Explicit keys under the default primary attribute stay visible.
        let linda = names.construct(args!(1, "Linda")).unwrap();
        assert_eq!(names.member(1).unwrap(), linda);
    }

    #[test]
    fn test_auto_keys_are_visible_under_named_primary() {
        let mut names = DataEnum::eager(
            Schema::builder("Named")
                .primary_attribute("id")
                .attribute("name")
                .build()
                .unwrap(),
        );
        let sharon = names.construct(args!(name = "Sharon")).unwrap();
        assert!(sharon.is_auto());
        assert_eq!(names.member(0).unwrap(), sharon);
        assert_eq!(names.get(args!(id = 0)).unwrap(), Value::from(&sharon));
    }
}

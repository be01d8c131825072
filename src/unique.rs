//! Collision checks on the primary key and unique attributes.
//!
//! Keys are checked in the schema's checked-key order (primary first, then
//! unique attributes in declaration order) and members in declaration order,
//! so the conflict reported is always the first one found.

use std::{collections::HashMap, sync::Arc};

use crate::{Error, Member, Registry, Result, Schema, Value, schema::KeySlot};

/// Checks one candidate against every member already in the registry.
pub(crate) fn check_candidate(
    schema: &Schema,
    registry: &Registry,
    candidate: &Member,
) -> Result<()> {
    for &slot in schema.checked_keys() {
        let value = slot.value_of(candidate);
        if registry.iter().any(|member| slot.value_of(member) == value) {
            return Err(duplicate(schema, slot, value));
        }
    }
    Ok(())
}

/// Checks a batch against itself, grouping members by each checked key.
pub(crate) fn check_batch(schema: &Schema, batch: &[Arc<Member>]) -> Result<()> {
    for &slot in schema.checked_keys() {
        let mut groups: HashMap<&Value, usize> = HashMap::new();
        for member in batch {
            *groups.entry(slot.value_of(member)).or_default() += 1;
        }
        let conflict = batch
            .iter()
            .map(|member| slot.value_of(member))
            .find(|value| groups.get(value).is_some_and(|&size| size > 1));
        if let Some(value) = conflict {
            return Err(duplicate(schema, slot, value));
        }
    }
    Ok(())
}

fn duplicate(schema: &Schema, slot: KeySlot, value: &Value) -> Error {
    Error::DuplicateValue {
        value: value.clone(),
        attribute: schema.key_name(slot).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataEnum, args};

    fn currencies() -> DataEnum {
        DataEnum::deferred(
            Schema::builder("Currency")
                .attribute("symbol")
                .unique_attribute("name")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_batch_reports_primary_before_attributes() {
        let mut currencies = currencies();
        let batch = vec![
            currencies.construct(args!("CAD", "$", "Canadian dollar")).unwrap(),
            currencies.construct(args!("USD", "$", "Canadian dollar")).unwrap(),
            currencies.construct(args!("USD", "$", "US dollar")).unwrap(),
        ];
        let err = check_batch(currencies.schema(), &batch).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateValue {
                value: Value::from("USD"),
                attribute: "_id_".to_string(),
            }
        );

        let err = check_batch(currencies.schema(), &batch[..2]).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateValue {
                value: Value::from("Canadian dollar"),
                attribute: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_batch_reports_earliest_group() {
        let mut currencies = currencies();
        let batch = vec![
            currencies.construct(args!("A", "$", "a")).unwrap(),
            currencies.construct(args!("B", "$", "b")).unwrap(),
            currencies.construct(args!("B", "$", "c")).unwrap(),
            currencies.construct(args!("A", "$", "d")).unwrap(),
        ];
        let err = check_batch(currencies.schema(), &batch).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateValue {
                value: Value::from("A"),
                attribute: "_id_".to_string(),
            }
        );
    }

    #[test]
    fn test_non_unique_attributes_may_repeat() {
        let mut currencies = currencies();
        let batch = vec![
            currencies.construct(args!("CAD", "$", "Canadian dollar")).unwrap(),
            currencies.construct(args!("USD", "$", "US dollar")).unwrap(),
        ];
        assert!(check_batch(currencies.schema(), &batch).is_ok());
    }
}

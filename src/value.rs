use std::{fmt, sync::Arc};

use crate::Member;

/// A primary key or attribute value.
///
/// Values are compared and hashed structurally, except for [`Value::Member`],
/// which compares by the referenced member's primary key. This lets one
/// enumeration's attributes point at another enumeration's members.
///
/// `Display` renders the plain text form used by a member's string form;
/// `Debug` renders the literal form used inside a member's debug form.
///
/// # Examples
///
/// ```
/// use data_enum::Value;
///
/// assert_eq!(Value::from("USD").to_string(), "USD");
/// assert_eq!(format!("{:?}", Value::from("USD")), "\"USD\"");
/// assert_eq!(Value::from(13).as_int(), Some(13));
/// assert!(Value::None.is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// The absence of a value.
    None,
    Bool(bool),
    Int(i64),
    Text(String),
    /// A member of some enumeration type.
    Member(Arc<Member>),
}

impl Value {
    pub fn is_none(&self) -> bool { matches!(self, Value::None) }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The referenced member, for example a hit returned by
    /// [`DataEnum::get`](crate::DataEnum::get).
    pub fn as_member(&self) -> Option<&Arc<Member>> {
        match self {
            Value::Member(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Member(m) => write!(f, "{}", m),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Member(m) => write!(f, "{:?}", m),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Int(n.into()) }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self { Value::Int(n.into()) }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Int(n) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}

impl From<Arc<Member>> for Value {
    fn from(member: Arc<Member>) -> Self { Value::Member(member) }
}

impl From<&Arc<Member>> for Value {
    fn from(member: &Arc<Member>) -> Self { Value::Member(member.clone()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

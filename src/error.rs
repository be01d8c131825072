use thiserror::Error;

use crate::Value;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while declaring, building, registering or querying an
/// enumeration.
///
/// Every error is a programmer-input error: nothing here is transient, and
/// construction and registration never partially succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The enumeration type is set up incorrectly or used against its
    /// registration mode.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// More positional arguments than declared attributes.
    #[error("expected {expected} data attributes; got {got}")]
    Arity { expected: usize, got: usize },

    /// Declared attributes left without a value after construction.
    #[error("expected data attributes: {}", .0.join(", "))]
    MissingAttributes(Vec<String>),

    /// A keyword argument that does not name a remaining declared attribute.
    #[error("unexpected data attribute: {0}")]
    UnexpectedAttribute(String),

    /// A member collides with another on the primary key or a unique
    /// attribute.
    #[error("duplicate enum value \"{value}\" for unique attribute \"{attribute}\"")]
    DuplicateValue { value: Value, attribute: String },

    /// A lookup call with the wrong number or kind of arguments.
    #[error("unexpected lookup arguments: {0}")]
    ArgumentShape(String),

    /// A lookup keyword that is neither the primary attribute nor unique.
    #[error("\"{enumeration}\" has no lookup attribute \"{attribute}\"")]
    NoSuchLookupAttribute {
        enumeration: String,
        attribute: String,
    },

    /// No member matches the lookup and no default was supplied.
    #[error("\"{enumeration}\" has no member with {attribute} = {value:?}")]
    MemberNotFound {
        enumeration: String,
        attribute: String,
        value: Value,
    },
}

/// The ways an enumeration type can be misconfigured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("expected a list of attribute names")]
    NotASequence,

    #[error("invalid attribute specification: {0}")]
    InvalidAttributeSpec(String),

    #[error("attribute names must not be empty")]
    EmptyName,

    #[error("unexpected data attribute name \"{0}\"")]
    ReservedName(String),

    #[error("unexpected data attribute prefix \"{prefix}\" in \"{name}\"")]
    ReservedPrefix { name: String, prefix: &'static str },

    #[error("data attribute \"{0}\" is declared more than once")]
    DuplicateAttribute(String),

    #[error("unsupported attribute value: {0}")]
    UnsupportedValue(String),

    #[error("\"{0}\" does not use deferred registration")]
    NotDeferred(String),

    #[error("\"{0}\" is already registered")]
    AlreadyRegistered(String),

    #[error("\"{0}\" is sealed; no new members may be constructed")]
    Sealed(String),

    #[error("member {member} does not belong to \"{enumeration}\"")]
    ForeignMember { enumeration: String, member: String },
}

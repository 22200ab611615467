use thiserror::Error;

/// Typed runtime-error catalog.
///
/// Runtime failures are first-class `Value::Error` values; this enum is the
/// single place their message templates live. `Value::error` renders a
/// variant with `to_string` at the point of failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("invalid operator '{operator}' for type {type_name}")]
    InvalidPrefixOperator {
        operator: String,
        type_name: &'static str,
    },
    #[error("unknown operator '{operator}' for types {left}, {right}")]
    UnknownOperator {
        operator: String,
        left: &'static str,
        right: &'static str,
    },
    #[error("type error: cannot perform '{operator}' on {left}, {right}")]
    TypeMismatch {
        operator: String,
        left: &'static str,
        right: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("undefined callable '{type_name}'")]
    UndefinedCallable { type_name: &'static str },
    #[error("index out of bounds: {index}")]
    IndexOutOfBounds { index: i64 },
    #[error("cannot index {container} with {index}")]
    InvalidIndexType {
        container: &'static str,
        index: &'static str,
    },
    #[error("type {type_name} does not support indexing")]
    NotIndexable { type_name: &'static str },
    #[error("unusable as map key: {type_name}")]
    UnusableMapKey { type_name: &'static str },
    #[error("no key found for {key}")]
    MissingKey { key: String },
    #[error("object {object} has no property {property}")]
    UnknownProperty { object: String, property: String },
    #[error("cannot access property '{property}' on type {type_name}")]
    PropertyAccessUnsupported {
        property: String,
        type_name: &'static str,
    },
    #[error("cannot set property '{property}' on type {type_name}")]
    PropertyAssignUnsupported {
        property: String,
        type_name: &'static str,
    },
    #[error("invalid assignment target")]
    InvalidAssignTarget,
    #[error("invalid number of args {found}, expected {expected}")]
    InvalidArgCount { found: usize, expected: usize },
    #[error("invalid argument {type_name}")]
    InvalidArgument { type_name: &'static str },
}

use thiserror::Error;

/// Errors that can occur when parsing predicate terms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateParseError {
    #[error("Invalid predicate '{0}': expected 'field:value'")]
    InvalidExpression(String),

    #[error("Empty value for predicate field '{0}'")]
    EmptyValue(String),

    #[error("Invalid predicate field name '{0}': use letters, digits, '_' and '.' separators")]
    InvalidField(String),
}

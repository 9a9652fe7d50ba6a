//! Error type for generation operations.

/// Error type for generation operations.
///
/// Every variant describes a misconfigured strategy rather than a transient
/// fault; callers should fail the run instead of retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// A directed or test tuple does not match the argument count
    #[error("{collection} vector '{name}' has {actual} values, expected {expected}")]
    ArityMismatch {
        collection: &'static str,
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Per-argument predicate/validator retry ceiling hit
    #[error("No valid value for argument '{argument}' after {attempts} attempts")]
    GenerationExhausted { argument: String, attempts: usize },

    /// Vector-level constraint retry ceiling hit
    #[error("Could not satisfy constraint '{constraint}' after {attempts} attempts")]
    ConstraintExhausted { constraint: String, attempts: usize },

    /// Malformed generator parameters
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Lookup of a nonexistent directed/test vector or argument
    #[error("No {collection} named '{name}'. Available: {available}")]
    UnknownName {
        collection: &'static str,
        name: String,
        available: String,
    },

    /// Lookup by index past the end of a collection
    #[error("{collection} index {index} out of range (have {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// Two arguments share a name
    #[error("Duplicate argument name: {0}")]
    DuplicateName(String),

    /// Exhaustive expansion requested on a vector without sequence arguments
    #[error("No sequence arguments found; exhaustive generation needs at least one")]
    NoSequenceArguments,

    /// Argument definition with no way to produce values
    #[error("Argument '{0}' must have either a value or a generator")]
    MissingGenerator(String),

    /// Unrecognised generation mode or sample count
    #[error("Invalid {kind} '{value}'")]
    InvalidSetting { kind: &'static str, value: String },
}

impl GenerationError {
    pub(crate) fn unknown_name<'a>(
        collection: &'static str,
        name: &str,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        GenerationError::UnknownName {
            collection,
            name: name.to_string(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}

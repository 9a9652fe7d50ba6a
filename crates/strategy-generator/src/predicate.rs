//! Accept/reject callbacks.
//!
//! A [`Predicate`] never transforms a value; it only decides whether a draw
//! is kept. Predicates are opaque to metadata export, which reports only
//! whether one is present and its optional description.

use std::fmt;
use std::sync::Arc;
use strategy_core::Value;

/// Boolean callback over a value of type `T`, with an optional description.
pub struct Predicate<T: ?Sized> {
    check: Arc<dyn Fn(&T) -> bool + Send + Sync>,
    description: Option<String>,
}

/// Filter over a single generated value.
pub type ValuePredicate = Predicate<Value>;

/// Filter over a complete vector, checked after per-argument filters.
pub type VectorConstraint = Predicate<[Value]>;

impl<T: ?Sized> Predicate<T> {
    /// Wrap a closure as an undescribed predicate.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            description: None,
        }
    }

    /// Wrap a closure with a human-readable description.
    pub fn described<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            description: Some(description.into()),
        }
    }

    /// Attach or replace the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Evaluate the predicate.
    pub fn test(&self, value: &T) -> bool {
        (self.check)(value)
    }

    /// The description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The description, or a positional fallback such as `constraint #2`.
    pub fn label(&self, kind: &str, index: usize) -> String {
        match &self.description {
            Some(d) => d.clone(),
            None => format!("{kind} #{index}"),
        }
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            description: self.description.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

//! Builder pattern utilities
//!
//! This module provides marker types for implementing the builder
//! pattern with compile-time validation of required collaborators.

/// Represents a collaborator that has not yet been provided to a builder.
///
/// Builders only expose `build` once every `Unset` slot has been
/// replaced by a [`Set`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Unset;

/// Represents a collaborator that has been provided to a builder.
#[derive(Debug, Clone)]
pub struct Set<T> {
    value: T,
}

impl<T> Set<T> {
    /// Creates a new set slot holding the given value.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

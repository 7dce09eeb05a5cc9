//! Initializers waiting for their variable declaration.
//!
//! The dump lists a pattern binding (pattern + initializer) before the
//! variable declaration it initializes. The binding is stored here under the
//! variable's identifier and type and taken back when the declaration is
//! translated.

use crate::ast::Expression;
use std::collections::HashMap;

/// Pending initializers keyed by `(identifier, type)`.
#[derive(Debug, Default)]
pub struct PendingBindings {
    bindings: HashMap<(String, String), Expression>,
}

impl PendingBindings {
    /// Store the initializer for `identifier: type_name`, replacing any
    /// earlier one with the same key.
    pub fn insert(&mut self, identifier: &str, type_name: &str, expression: Expression) {
        self.bindings
            .insert((identifier.to_string(), type_name.to_string()), expression);
    }

    /// Remove and return the initializer for `identifier: type_name`.
    pub fn take(&mut self, identifier: &str, type_name: &str) -> Option<Expression> {
        self.bindings
            .remove(&(identifier.to_string(), type_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

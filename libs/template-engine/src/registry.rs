//! # Template Registry
//!
//! Ordered template list shared by every file of a run. The front of the
//! list has priority, so the most recently inserted template wins.
//!
//! The list is filled once through [`TemplateRegistry::load_if_empty`],
//! whose loader runs under a mutex so concurrent first uses load it only
//! once, and is read through cheap snapshots afterwards.

use intermediate_ast::Expression;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::debug;

/// A pattern expression and the Kotlin text that replaces its matches.
///
/// Names in `replacement` that start with `_` refer to the captures of
/// `pattern`.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub pattern: Expression,
    pub replacement: String,
}

/// Thread-safe, front-prioritized template list.
///
/// ## Example
///
/// ```rust
/// use intermediate_ast::Expression;
/// use template_engine::{Template, TemplateRegistry};
///
/// let registry = TemplateRegistry::new();
/// registry.insert_front(Template {
///     pattern: Expression::LiteralInt { value: 1 },
///     replacement: "one".to_string(),
/// });
/// registry.insert_front(Template {
///     pattern: Expression::LiteralInt { value: 1 },
///     replacement: "uno".to_string(),
/// });
/// assert_eq!(registry.snapshot()[0].replacement, "uno");
/// ```
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: RwLock<Arc<Vec<Template>>>,
    load_guard: Mutex<()>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template ahead of every existing one.
    pub fn insert_front(&self, template: Template) {
        self.extend_front(vec![template]);
    }

    /// Insert templates given in declaration order, so that the last one
    /// ends up first.
    pub fn extend_front(&self, templates: Vec<Template>) {
        let mut guard = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated: Vec<Template> = templates.into_iter().rev().collect();
        updated.extend(guard.iter().cloned());
        *guard = Arc::new(updated);
    }

    /// Run `load` and insert its templates, unless the registry already
    /// holds templates.
    ///
    /// ## Returns
    ///
    /// `Ok(true)` when `load` ran, `Ok(false)` when the registry was already
    /// populated, or the loader's error.
    pub fn load_if_empty<E>(&self, load: impl FnOnce() -> Result<Vec<Template>, E>) -> Result<bool, E> {
        let _guard = self.load_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_empty() {
            return Ok(false);
        }

        let templates = load()?;
        debug!(count = templates.len(), "loaded templates");
        self.extend_front(templates);
        Ok(true)
    }

    /// The current list, front first.
    pub fn snapshot(&self) -> Arc<Vec<Template>> {
        Arc::clone(&self.templates.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn template(value: i64, replacement: &str) -> Template {
        Template {
            pattern: Expression::LiteralInt { value },
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_extend_front_puts_last_declared_first() {
        let registry = TemplateRegistry::new();
        registry.insert_front(template(0, "old"));
        registry.extend_front(vec![template(1, "a"), template(2, "b")]);

        let replacements: Vec<_> = registry
            .snapshot()
            .iter()
            .map(|template| template.replacement.clone())
            .collect();
        assert_eq!(replacements, vec!["b", "a", "old"]);
    }

    #[test]
    fn test_load_if_empty_runs_once() {
        let registry = TemplateRegistry::new();
        let calls = AtomicUsize::new(0);
        let load = || -> Result<Vec<Template>, ()> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![template(1, "one")])
        };

        assert_eq!(registry.load_if_empty(load), Ok(true));
        assert_eq!(registry.load_if_empty(load), Ok(false));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_loads_initialize_once() {
        let registry = TemplateRegistry::new();
        let calls = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    registry
                        .load_if_empty(|| -> Result<Vec<Template>, ()> {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(vec![template(1, "one"), template(2, "two")])
                        })
                        .unwrap();
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_load_leaves_registry_empty() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.load_if_empty(|| Err::<Vec<Template>, _>("broken")), Err("broken"));
        assert!(registry.is_empty());
    }
}

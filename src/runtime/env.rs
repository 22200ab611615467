use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::runtime::value::Value;

/// A lexically-chained name-to-value mapping.
///
/// Environments are shared handles: cloning one yields another view of the
/// same frame, which is how closures observe later `define`/`update`
/// mutations of their captured scope. Frames created for function calls
/// extend the closure's definition environment, not the caller's.
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

struct Scope {
    bindings: HashMap<String, Value>,
    outer: Option<Environment>,
}

impl Environment {
    /// An empty root environment.
    pub fn new() -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                bindings: HashMap::new(),
                outer: None,
            })),
        }
    }

    /// A fresh frame whose lookups fall through to `outer`.
    pub fn enclosed(outer: &Environment) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                bindings: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    /// Walks the chain outward for `name`.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let scope = self.scope.borrow();
        if let Some(value) = scope.bindings.get(name) {
            return Some(value.clone());
        }
        scope.outer.as_ref().and_then(|outer| outer.lookup(name))
    }

    /// Creates or overwrites a binding in the current frame.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.scope.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Rebinds the nearest existing `name`, walking outward. Returns false
    /// when no frame contains it.
    pub fn update(&self, name: &str, value: Value) -> bool {
        let mut scope = self.scope.borrow_mut();
        if let Some(slot) = scope.bindings.get_mut(name) {
            *slot = value;
            return true;
        }
        match &scope.outer {
            Some(outer) => outer.update(name, value),
            None => false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// The chain can contain cycles (a closure bound in the environment it
// captured), so Debug stays shallow.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Environment")
    }
}

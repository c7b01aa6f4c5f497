//! Match results.
//!
//! A successful match produces a fresh [`BindingSet`]: an immutable map of
//! named results plus a default slot holding the unnamed result a finder
//! wraps. Sets are never mutated after construction; combining two sets
//! builds a third. Backed by `im::HashMap` so combination shares structure
//! instead of copying.

use im::HashMap;

use crate::core::Entity;

/// One bound result: a single entity, or the collection a pattern matched.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    One(Entity),
    Many(Vec<Entity>),
}

impl BoundValue {
    /// The bound entities as a slice, regardless of cardinality
    pub fn entities(&self) -> &[Entity] {
        match self {
            BoundValue::One(e) => std::slice::from_ref(e),
            BoundValue::Many(es) => es,
        }
    }

    pub fn len(&self) -> usize {
        self.entities().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities().is_empty()
    }
}

/// The named results of a successful match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingSet {
    default: Option<BoundValue>,
    named: HashMap<String, BoundValue>,
}

impl BindingSet {
    /// An empty set: a match that bound nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// A set wrapping a single unnamed result
    pub fn of(default: BoundValue) -> Self {
        Self {
            default: Some(default),
            named: HashMap::new(),
        }
    }

    /// Add a named binding, returning the extended set
    pub fn with_binding(self, name: impl Into<String>, value: BoundValue) -> Self {
        Self {
            default: self.default,
            named: self.named.update(name.into(), value),
        }
    }

    /// The unnamed result wrapped by the innermost finder, if any
    pub fn default_binding(&self) -> Option<&BoundValue> {
        self.default.as_ref()
    }

    pub fn binding(&self, name: &str) -> Option<&BoundValue> {
        self.named.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.named.keys()
    }

    /// Number of named bindings
    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// Union with a later set. On key collision the later set wins; the
    /// later set's default also wins when present.
    pub fn combine(self, later: BindingSet) -> BindingSet {
        BindingSet {
            default: later.default.or(self.default),
            // im's union is left-biased, so the later map goes on the left
            named: later.named.union(self.named),
        }
    }

    /// Promote the default slot to a named binding, keeping existing names
    pub(crate) fn bind_default(self, name: &str) -> BindingSet {
        match self.default.clone() {
            Some(value) => self.with_binding(name, value),
            None => self,
        }
    }
}

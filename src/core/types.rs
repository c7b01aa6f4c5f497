//! Entity model consumed by the pointcut engine.
//!
//! These are lightweight stand-ins for the host IDE's AST and project model:
//! the engine only ever reads names, member lists, annotations, and project
//! natures. Entities are shared via `Arc` so that binding sets can reference
//! them without copying declaration data.

use std::sync::Arc;

/// An annotation attached to a type, field, or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDeclaration {
    pub name: String,
}

impl AnnotationDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A field declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub type_name: String,
    pub annotations: Vec<Arc<AnnotationDeclaration>>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, name: impl Into<String>) -> Self {
        self.annotations
            .push(Arc::new(AnnotationDeclaration::new(name)));
        self
    }
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub return_type: String,
    pub parameter_types: Vec<String>,
    pub annotations: Vec<Arc<AnnotationDeclaration>>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameter_types: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, type_name: impl Into<String>) -> Self {
        self.parameter_types.push(type_name.into());
        self
    }

    pub fn with_annotation(mut self, name: impl Into<String>) -> Self {
        self.annotations
            .push(Arc::new(AnnotationDeclaration::new(name)));
        self
    }
}

/// A type declaration: the usual subject a pointcut is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub fields: Vec<Arc<FieldDeclaration>>,
    pub methods: Vec<Arc<MethodDeclaration>>,
    pub annotations: Vec<Arc<AnnotationDeclaration>>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn with_annotation(mut self, name: impl Into<String>) -> Self {
        self.annotations
            .push(Arc::new(AnnotationDeclaration::new(name)));
        self
    }
}

/// A handle on the host project, read by project-scoped checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub natures: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            natures: Vec::new(),
        }
    }

    pub fn with_nature(mut self, nature: impl Into<String>) -> Self {
        self.natures.push(nature.into());
        self
    }

    pub fn has_nature(&self, nature: &str) -> bool {
        self.natures.iter().any(|n| n == nature)
    }
}

/// Any entity a pointcut can bind: a type, one of its members, or an
/// annotation on either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Type(Arc<TypeDeclaration>),
    Field(Arc<FieldDeclaration>),
    Method(Arc<MethodDeclaration>),
    Annotation(Arc<AnnotationDeclaration>),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Type(t) => &t.name,
            Entity::Field(f) => &f.name,
            Entity::Method(m) => &m.name,
            Entity::Annotation(a) => &a.name,
        }
    }

    /// Annotations carried by this entity. Annotations themselves carry none.
    pub fn annotations(&self) -> &[Arc<AnnotationDeclaration>] {
        match self {
            Entity::Type(t) => &t.annotations,
            Entity::Field(f) => &f.annotations,
            Entity::Method(m) => &m.annotations,
            Entity::Annotation(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_name_covers_all_kinds() {
        let ty = Arc::new(TypeDeclaration::new("Foo"));
        let field = Arc::new(FieldDeclaration::new("bar", "String"));
        let method = Arc::new(MethodDeclaration::new("baz", "void"));
        let ann = Arc::new(AnnotationDeclaration::new("Deprecated"));

        assert_eq!(Entity::Type(ty).name(), "Foo");
        assert_eq!(Entity::Field(field).name(), "bar");
        assert_eq!(Entity::Method(method).name(), "baz");
        assert_eq!(Entity::Annotation(ann).name(), "Deprecated");
    }

    #[test]
    fn annotations_accessor_is_empty_for_annotations() {
        let ann = Arc::new(AnnotationDeclaration::new("Deprecated"));
        assert!(Entity::Annotation(ann).annotations().is_empty());
    }

    #[test]
    fn project_nature_lookup() {
        let project = Project::new("demo").with_nature("org.eclipse.jdt.core.javanature");
        assert!(project.has_nature("org.eclipse.jdt.core.javanature"));
        assert!(!project.has_nature("org.example.missing"));
    }
}

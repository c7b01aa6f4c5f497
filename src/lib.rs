//! dsld: pointcut matching and normalization engine for IDE DSL
//! contributions.
//!
//! A *pointcut* is a declarative pattern over a program-analysis context (a
//! type, the file it lives in, the enclosing project) that decides where a
//! contribution applies and binds sub-results (fields, methods,
//! annotations) for the contribution step to consume.
//!
//! # Example
//!
//! ```
//! use dsld::{FieldDeclaration, MatchContext, PointcutFactory, TypeDeclaration};
//! use std::sync::Arc;
//!
//! let factory = PointcutFactory::new("example.dsld");
//! let mut finder = factory.create_pointcut("findField").unwrap();
//! finder.add_argument("endpoint").unwrap();
//! let pointcut = finder.build().unwrap().normalize();
//!
//! let subject = TypeDeclaration::new("Service")
//!     .with_field(FieldDeclaration::new("endpoint", "URL"));
//! let ctx = MatchContext::new(Arc::new(subject), "conf/service.groovy");
//!
//! let bindings = pointcut.matches(&ctx).expect("field is present");
//! assert_eq!(bindings.default_binding().unwrap().len(), 1);
//! ```

// Export modules for library usage
pub mod core;
pub mod pointcuts;

// Re-export commonly used types
pub use crate::core::{
    AnnotationDeclaration, Entity, Error, FieldDeclaration, MethodDeclaration, Project, Result,
    TypeDeclaration,
};

pub use crate::pointcuts::{
    match_all, match_all_parallel, Argument, ArgumentList, ArgumentValue, BindingSet, BoundValue,
    MatchContext, Pointcut, PointcutBuilder, PointcutFactory, PointcutKind, UserPredicate,
};

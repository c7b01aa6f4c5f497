//! Core data types shared across the crate

pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    AnnotationDeclaration, Entity, FieldDeclaration, MethodDeclaration, Project, TypeDeclaration,
};

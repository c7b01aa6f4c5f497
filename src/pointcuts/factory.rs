//! Pointcut construction and rule-name registry.
//!
//! One factory exists per defining script: it stamps its container
//! identifier and optional project handle onto every builder it hands out.
//! Built-ins live in a fixed function table; script-local registrations
//! shadow it. An unknown name is reported as `None`, never an error, so
//! callers treat absence as the only failure signal.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::Project;
use crate::pointcuts::builder::PointcutBuilder;
use crate::pointcuts::pointcut::{PointcutKind, UserPredicate};

type KindCtor = fn() -> PointcutKind;

static BUILTIN_POINTCUTS: &[(&str, KindCtor)] = &[
    ("and", || PointcutKind::Conjunction),
    ("annotatedBy", || PointcutKind::AnnotatedBy),
    ("bind", || PointcutKind::Bind),
    ("currentType", || PointcutKind::CurrentType),
    ("fileExtension", || PointcutKind::FileExtension),
    ("findField", || PointcutKind::FindField),
    ("findMethod", || PointcutKind::FindMethod),
    ("nature", || PointcutKind::ProjectNature),
    ("or", || PointcutKind::Disjunction),
];

pub struct PointcutFactory {
    container_id: String,
    project: Option<Arc<Project>>,
    local: HashMap<String, UserPredicate>,
}

impl PointcutFactory {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            project: None,
            local: HashMap::new(),
        }
    }

    /// One-time project association; stamped onto every builder produced
    pub fn with_project(container_id: impl Into<String>, project: Arc<Project>) -> Self {
        Self {
            container_id: container_id.into(),
            project: Some(project),
            local: HashMap::new(),
        }
    }

    pub fn container_identifier(&self) -> &str {
        &self.container_id
    }

    /// Register a script-defined pointcut under the given rule name. Local
    /// registrations shadow built-ins of the same name.
    pub fn register_local_pointcut(&mut self, name: impl Into<String>, predicate: UserPredicate) {
        self.local.insert(name.into(), predicate);
    }

    /// Create a builder for the named rule, or `None` if nothing is
    /// registered under that name.
    pub fn create_pointcut(&self, name: &str) -> Option<PointcutBuilder> {
        if let Some(predicate) = self.local.get(name) {
            return Some(PointcutBuilder::new(
                name,
                PointcutKind::UserExtensible(predicate.clone()),
                &self.container_id,
                self.project.clone(),
            ));
        }

        match BUILTIN_POINTCUTS.iter().find(|(rule, _)| *rule == name) {
            Some((_, ctor)) => Some(PointcutBuilder::new(
                name,
                ctor(),
                &self.container_id,
                self.project.clone(),
            )),
            None => {
                log::debug!(
                    "no pointcut registered under '{}' in container '{}'",
                    name,
                    self.container_id
                );
                None
            }
        }
    }
}

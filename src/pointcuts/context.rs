//! Per-evaluation match context.
//!
//! One context describes one subject under test: the current type, the file
//! it came from, and optionally the enclosing project. Contexts are owned by
//! the caller and shared immutably with the tree; intermediate results from
//! enclosing pointcuts travel as an explicit parameter through the match
//! call instead of living here, so one context can never observe another
//! evaluation's state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::{Project, TypeDeclaration};

#[derive(Debug, Clone)]
pub struct MatchContext {
    current_type: Arc<TypeDeclaration>,
    file_path: PathBuf,
    project: Option<Arc<Project>>,
}

impl MatchContext {
    pub fn new(current_type: Arc<TypeDeclaration>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            current_type,
            file_path: file_path.into(),
            project: None,
        }
    }

    pub fn with_project(mut self, project: Arc<Project>) -> Self {
        self.project = Some(project);
        self
    }

    pub fn current_type(&self) -> &Arc<TypeDeclaration> {
        &self.current_type
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Extension of the file under analysis, without the dot
    pub fn file_extension(&self) -> Option<&str> {
        self.file_path.extension().and_then(|e| e.to_str())
    }

    pub fn project(&self) -> Option<&Arc<Project>> {
        self.project.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_extension_strips_the_dot() {
        let ctx = MatchContext::new(Arc::new(TypeDeclaration::new("Foo")), "scripts/build.gradle");
        assert_eq!(ctx.file_extension(), Some("gradle"));
    }

    #[test]
    fn file_without_extension() {
        let ctx = MatchContext::new(Arc::new(TypeDeclaration::new("Foo")), "Makefile");
        assert_eq!(ctx.file_extension(), None);
    }
}

//! Staged pointcut construction.
//!
//! The builder is the only mutable stage of a pointcut's life: arguments are
//! appended one by one, `verify` checks the arity and shape the kind
//! requires, and `build` consumes the builder into an immutable
//! [`Pointcut`]. Freezing-by-consumption makes "no mutation after
//! normalize" a compile-time property.

use std::sync::Arc;

use crate::core::{Error, Project, Result};
use crate::pointcuts::arguments::{Argument, ArgumentList, ArgumentValue};
use crate::pointcuts::pointcut::{Pointcut, PointcutKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgumentStyle {
    Named,
    Unnamed,
}

/// Mutable first stage of a pointcut, produced by the factory.
#[derive(Debug, Clone)]
pub struct PointcutBuilder {
    rule_name: String,
    container_id: String,
    project: Option<Arc<Project>>,
    kind: PointcutKind,
    args: Vec<Argument>,
    style: Option<ArgumentStyle>,
}

impl PointcutBuilder {
    pub(crate) fn new(
        rule_name: impl Into<String>,
        kind: PointcutKind,
        container_id: impl Into<String>,
        project: Option<Arc<Project>>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            container_id: container_id.into(),
            project,
            kind,
            args: Vec::new(),
            style: None,
        }
    }

    /// Rule name this builder was created under, for diagnostics
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    pub fn kind(&self) -> &PointcutKind {
        &self.kind
    }

    /// Append an unnamed argument. Fails fast if a named argument was
    /// already added; one pointcut uses exactly one style.
    pub fn add_argument(&mut self, value: impl Into<ArgumentValue>) -> Result<()> {
        self.push(Argument::unnamed(value.into()), ArgumentStyle::Unnamed)
    }

    /// Append a named argument. Fails fast on style conflict.
    pub fn add_named_argument(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ArgumentValue>,
    ) -> Result<()> {
        self.push(Argument::named(name, value.into()), ArgumentStyle::Named)
    }

    fn push(&mut self, arg: Argument, style: ArgumentStyle) -> Result<()> {
        match self.style {
            Some(existing) if existing != style => Err(Error::argument_style(&self.rule_name)),
            _ => {
                self.style = Some(style);
                self.args.push(arg);
                Ok(())
            }
        }
    }

    /// Check the arity and argument shape this kind requires. Run again by
    /// [`Self::build`]; a failed verification halts the pipeline before any
    /// matching happens.
    pub fn verify(&self) -> Result<()> {
        match &self.kind {
            PointcutKind::Conjunction | PointcutKind::Disjunction => {
                if self.args.is_empty() {
                    return self.invalid("expecting at least one nested pointcut argument");
                }
                if self.args.iter().any(|a| a.value().as_pointcut().is_none()) {
                    return self.invalid("all arguments must be nested pointcuts");
                }
                Ok(())
            }
            PointcutKind::Bind => {
                let named_pointcut = self.args.len() == 1
                    && self.args[0].name().is_some()
                    && self.args[0].value().as_pointcut().is_some();
                if named_pointcut {
                    Ok(())
                } else {
                    self.invalid("expecting exactly one named argument holding a nested pointcut")
                }
            }
            PointcutKind::CurrentType
            | PointcutKind::AnnotatedBy
            | PointcutKind::FindField
            | PointcutKind::FindMethod => {
                if self.args.len() == 1 {
                    Ok(())
                } else {
                    self.invalid("expecting exactly one argument: a name or a nested pointcut")
                }
            }
            PointcutKind::FileExtension => self.verify_one_literal("the file extension"),
            PointcutKind::ProjectNature => self.verify_one_literal("the project nature id"),
            PointcutKind::UserExtensible(_) => Ok(()),
        }
    }

    fn verify_one_literal(&self, what: &str) -> Result<()> {
        let one_literal = self.args.len() == 1 && self.args[0].value().as_literal().is_some();
        if one_literal {
            Ok(())
        } else {
            self.invalid(&format!("expecting exactly one string argument: {what}"))
        }
    }

    fn invalid(&self, message: &str) -> Result<()> {
        Err(Error::verification(&self.rule_name, message))
    }

    /// Verify, then freeze into an immutable [`Pointcut`].
    pub fn build(self) -> Result<Pointcut> {
        self.verify()?;
        Ok(Pointcut::new(
            self.container_id,
            self.project,
            ArgumentList::from(self.args),
            self.kind,
        ))
    }
}

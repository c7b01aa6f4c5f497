//! Pointcut arguments.
//!
//! An argument is either a string literal or a nested pointcut, optionally
//! carrying a name. A single pointcut uses exactly one style, named or
//! unnamed; the builder enforces that before the list is frozen here.

use crate::pointcuts::pointcut::Pointcut;

/// The value of a single pointcut argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Literal(String),
    Pointcut(Box<Pointcut>),
}

impl ArgumentValue {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            ArgumentValue::Literal(s) => Some(s),
            ArgumentValue::Pointcut(_) => None,
        }
    }

    pub fn as_pointcut(&self) -> Option<&Pointcut> {
        match self {
            ArgumentValue::Literal(_) => None,
            ArgumentValue::Pointcut(p) => Some(p),
        }
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::Literal(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::Literal(value)
    }
}

impl From<Pointcut> for ArgumentValue {
    fn from(value: Pointcut) -> Self {
        ArgumentValue::Pointcut(Box::new(value))
    }
}

/// One argument: an optional name plus a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: Option<String>,
    value: ArgumentValue,
}

impl Argument {
    pub fn unnamed(value: ArgumentValue) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: ArgumentValue) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    pub fn into_value(self) -> ArgumentValue {
        self.value
    }

    pub fn into_parts(self) -> (Option<String>, ArgumentValue) {
        (self.name, self.value)
    }
}

/// The frozen, insertion-ordered argument list of a built pointcut.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentList {
    args: Vec<Argument>,
}

impl ArgumentList {
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Value of the first argument, if any
    pub fn first(&self) -> Option<&ArgumentValue> {
        self.args.first().map(Argument::value)
    }

    /// Name of the first argument, if it has one
    pub fn first_name(&self) -> Option<&str> {
        self.args.first().and_then(Argument::name)
    }

    /// Value of the argument with the given name
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.args
            .iter()
            .find(|a| a.name() == Some(name))
            .map(Argument::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &ArgumentValue> {
        self.args.iter().map(Argument::value)
    }

    pub fn names(&self) -> impl Iterator<Item = Option<&str>> {
        self.args.iter().map(Argument::name)
    }

    /// Nested pointcut arguments, in insertion order, skipping literals
    pub fn pointcuts(&self) -> impl Iterator<Item = &Pointcut> {
        self.args.iter().filter_map(|a| a.value().as_pointcut())
    }

    pub(crate) fn into_args(self) -> Vec<Argument> {
        self.args
    }
}

impl From<Vec<Argument>> for ArgumentList {
    fn from(args: Vec<Argument>) -> Self {
        Self { args }
    }
}

//! The pointcut matching and normalization engine.
//!
//! A pointcut decides where a DSL contribution applies. Its life has two
//! stages: a mutable [`PointcutBuilder`] collecting arguments, and the
//! immutable [`Pointcut`] that `build` produces, which is normalized once
//! and then matched any number of times, concurrently.

pub mod arguments;
pub mod binding;
pub mod builder;
pub mod context;
pub mod eval;
pub mod factory;
pub mod pointcut;

pub use arguments::{Argument, ArgumentList, ArgumentValue};
pub use binding::{BindingSet, BoundValue};
pub use builder::PointcutBuilder;
pub use context::MatchContext;
pub use eval::{match_all, match_all_parallel};
pub use factory::PointcutFactory;
pub use pointcut::{Pointcut, PointcutKind, UserPredicate};

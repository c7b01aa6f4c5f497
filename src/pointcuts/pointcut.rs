//! The immutable pointcut tree.
//!
//! A [`Pointcut`] is produced by [`PointcutBuilder::build`] and never changes
//! afterwards: matching takes `&self`, the tree is `Send + Sync`, and any
//! number of threads may evaluate it against their own contexts. The
//! intermediate results an enclosing finder hands to a nested pointcut are
//! threaded as an explicit `inherited` parameter, never stored.
//!
//! [`PointcutBuilder::build`]: crate::pointcuts::builder::PointcutBuilder::build

use std::fmt;
use std::sync::Arc;

use crate::core::{Entity, Project, TypeDeclaration};
use crate::pointcuts::arguments::{Argument, ArgumentList, ArgumentValue};
use crate::pointcuts::binding::{BindingSet, BoundValue};
use crate::pointcuts::context::MatchContext;

/// An externally supplied predicate backing a script-defined pointcut.
///
/// Invoked with the context under test and the pointcut's resolved
/// arguments; returns the binding set on a match. The engine enforces no
/// purity on the closure, that is the script author's responsibility.
#[derive(Clone)]
pub struct UserPredicate(
    Arc<dyn Fn(&MatchContext, &ArgumentList) -> Option<BindingSet> + Send + Sync>,
);

impl UserPredicate {
    pub fn new(
        predicate: impl Fn(&MatchContext, &ArgumentList) -> Option<BindingSet> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(predicate))
    }

    pub fn evaluate(&self, ctx: &MatchContext, args: &ArgumentList) -> Option<BindingSet> {
        (self.0)(ctx, args)
    }

    fn same(&self, other: &UserPredicate) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for UserPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPredicate(..)")
    }
}

/// The closed set of built-in pattern kinds, plus the open extension point.
#[derive(Debug, Clone)]
pub enum PointcutKind {
    /// `and`: every child must match, bindings unioned
    Conjunction,
    /// `or`: first matching child wins
    Disjunction,
    /// `bind`: names the inner result for the contribution step
    Bind,
    /// `currentType`: the type under analysis
    CurrentType,
    /// `fileExtension`: extension of the file under analysis
    FileExtension,
    /// `annotatedBy`: annotations on the candidates
    AnnotatedBy,
    /// `findField`: fields of the candidates
    FindField,
    /// `findMethod`: methods of the candidates
    FindMethod,
    /// `nature`: the project's configured natures
    ProjectNature,
    /// a script-registered predicate
    UserExtensible(UserPredicate),
}

impl PartialEq for PointcutKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PointcutKind::UserExtensible(a), PointcutKind::UserExtensible(b)) => a.same(b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// An immutable, verified pattern ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointcut {
    container_id: String,
    project: Option<Arc<Project>>,
    args: ArgumentList,
    kind: PointcutKind,
}

impl Pointcut {
    pub(crate) fn new(
        container_id: String,
        project: Option<Arc<Project>>,
        args: ArgumentList,
        kind: PointcutKind,
    ) -> Self {
        Self {
            container_id,
            project,
            args,
            kind,
        }
    }

    /// Identifier of the script that defined this pointcut
    pub fn container_identifier(&self) -> &str {
        &self.container_id
    }

    /// Project handle stamped by the factory, if any
    pub fn project(&self) -> Option<&Arc<Project>> {
        self.project.as_ref()
    }

    pub fn kind(&self) -> &PointcutKind {
        &self.kind
    }

    pub fn arguments(&self) -> &ArgumentList {
        &self.args
    }

    pub fn first_argument(&self) -> Option<&ArgumentValue> {
        self.args.first()
    }

    pub fn first_argument_name(&self) -> Option<&str> {
        self.args.first_name()
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentValue> {
        self.args.get(name)
    }

    pub fn argument_values(&self) -> impl Iterator<Item = &ArgumentValue> {
        self.args.values()
    }

    pub fn argument_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.args.names()
    }

    /// Authoritative evaluation against one context.
    ///
    /// Safe to call concurrently with distinct contexts; never mutates the
    /// tree. `None` means no match, which is an expected outcome and not an
    /// error.
    pub fn matches(&self, ctx: &MatchContext) -> Option<BindingSet> {
        self.match_inner(ctx, None)
    }

    fn match_inner(
        &self,
        ctx: &MatchContext,
        inherited: Option<&BoundValue>,
    ) -> Option<BindingSet> {
        match &self.kind {
            PointcutKind::Conjunction => self.match_conjunction(ctx, inherited),
            PointcutKind::Disjunction => self.match_disjunction(ctx, inherited),
            PointcutKind::Bind => self.match_bind(ctx, inherited),
            PointcutKind::CurrentType => self.match_finder(ctx, inherited, CandidateKind::Types),
            PointcutKind::FindField => self.match_finder(ctx, inherited, CandidateKind::Fields),
            PointcutKind::FindMethod => self.match_finder(ctx, inherited, CandidateKind::Methods),
            PointcutKind::AnnotatedBy => {
                self.match_finder(ctx, inherited, CandidateKind::Annotations)
            }
            PointcutKind::FileExtension => self.match_file_extension(ctx),
            PointcutKind::ProjectNature => self.match_project_nature(ctx),
            PointcutKind::UserExtensible(predicate) => predicate.evaluate(ctx, &self.args),
        }
    }

    /// Every child must match; bindings are unioned with later children
    /// winning on key collisions. Short-circuits on the first non-match.
    fn match_conjunction(
        &self,
        ctx: &MatchContext,
        inherited: Option<&BoundValue>,
    ) -> Option<BindingSet> {
        let mut combined = BindingSet::new();
        for child in self.args.pointcuts() {
            let result = child.match_inner(ctx, inherited)?;
            combined = combined.combine(result);
        }
        Some(combined)
    }

    /// First matching child's bindings are returned unmodified; evaluation
    /// order is the normalized argument order.
    fn match_disjunction(
        &self,
        ctx: &MatchContext,
        inherited: Option<&BoundValue>,
    ) -> Option<BindingSet> {
        self.args
            .pointcuts()
            .find_map(|child| child.match_inner(ctx, inherited))
    }

    fn match_bind(&self, ctx: &MatchContext, inherited: Option<&BoundValue>) -> Option<BindingSet> {
        let name = self.args.first_name()?;
        let inner = self.args.first()?.as_pointcut()?;
        let result = inner.match_inner(ctx, inherited)?;
        Some(result.bind_default(name))
    }

    /// Shared body of the finder leaves: derive candidates, then either
    /// filter by the literal name or hand the whole pool to the nested
    /// pointcut and return its result unchanged.
    fn match_finder(
        &self,
        ctx: &MatchContext,
        inherited: Option<&BoundValue>,
        kind: CandidateKind,
    ) -> Option<BindingSet> {
        let candidates = kind.derive(ctx, inherited);
        if candidates.is_empty() {
            return None;
        }
        match self.args.first()? {
            ArgumentValue::Literal(name) => {
                let found: Vec<Entity> = candidates
                    .into_iter()
                    .filter(|e| e.name() == name)
                    .collect();
                wrap_found(found)
            }
            ArgumentValue::Pointcut(inner) => {
                let pool = BoundValue::Many(candidates);
                inner.match_inner(ctx, Some(&pool))
            }
        }
    }

    fn match_file_extension(&self, ctx: &MatchContext) -> Option<BindingSet> {
        let expected = self.args.first()?.as_literal()?;
        if ctx.file_extension() == Some(expected) {
            Some(BindingSet::new())
        } else {
            None
        }
    }

    fn match_project_nature(&self, ctx: &MatchContext) -> Option<BindingSet> {
        let expected = self.args.first()?.as_literal()?;
        let project = ctx.project()?;
        project.has_nature(expected).then(BindingSet::new)
    }

    /// Cheap, conservative pre-check. `false` guarantees [`Self::matches`]
    /// cannot succeed for this context; `true` promises nothing.
    pub fn fast_match(&self, ctx: &MatchContext) -> bool {
        match &self.kind {
            PointcutKind::Conjunction => self.args.pointcuts().all(|c| c.fast_match(ctx)),
            PointcutKind::Disjunction => self.args.pointcuts().any(|c| c.fast_match(ctx)),
            PointcutKind::Bind => self.args.pointcuts().all(|c| c.fast_match(ctx)),
            PointcutKind::FileExtension => match self.args.first().and_then(ArgumentValue::as_literal) {
                Some(expected) => ctx.file_extension() == Some(expected),
                None => true,
            },
            PointcutKind::ProjectNature => match self.args.first().and_then(ArgumentValue::as_literal) {
                Some(expected) => ctx.project().is_some_and(|p| p.has_nature(expected)),
                None => true,
            },
            _ => true,
        }
    }

    /// Rewrite into an equivalent tree that evaluates faster: nested
    /// conjunctions/disjunctions of the same kind are flattened, single-child
    /// combinators collapse to the child, and conjunction children are
    /// stably reordered cheapest-fail-first. Idempotent.
    pub fn normalize(self) -> Pointcut {
        let Pointcut {
            container_id,
            project,
            args,
            kind,
        } = self;

        let args: Vec<Argument> = args
            .into_args()
            .into_iter()
            .map(normalize_argument)
            .collect();

        if !matches!(kind, PointcutKind::Conjunction | PointcutKind::Disjunction) {
            return Pointcut::new(container_id, project, ArgumentList::from(args), kind);
        }

        let mut flat: Vec<Argument> = Vec::with_capacity(args.len());
        for arg in args {
            let (name, value) = arg.into_parts();
            match value {
                ArgumentValue::Pointcut(child) if name.is_none() && child.kind == kind => {
                    let child = *child;
                    log::debug!(
                        "flattening nested '{}' with {} children",
                        combinator_name(&kind),
                        child.args.len()
                    );
                    flat.extend(child.args.into_args());
                }
                value => flat.push(reassemble(name, value)),
            }
        }

        // a combinator of one is just its child
        if flat.len() == 1 {
            if let Some(arg) = flat.pop() {
                match arg.into_parts() {
                    (None, ArgumentValue::Pointcut(child)) => return *child,
                    (name, value) => flat.push(reassemble(name, value)),
                }
            }
        }

        if matches!(kind, PointcutKind::Conjunction) {
            flat.sort_by_key(|arg| {
                arg.value()
                    .as_pointcut()
                    .map_or(u8::MAX, Pointcut::cost_rank)
            });
        }

        Pointcut::new(container_id, project, ArgumentList::from(flat), kind)
    }

    /// Relative evaluation cost, used to order conjunction children so the
    /// cheapest potential failure is tried first.
    fn cost_rank(&self) -> u8 {
        match &self.kind {
            PointcutKind::FileExtension | PointcutKind::ProjectNature => 0,
            PointcutKind::CurrentType
            | PointcutKind::AnnotatedBy
            | PointcutKind::FindField
            | PointcutKind::FindMethod => {
                if self.args.first().and_then(ArgumentValue::as_literal).is_some() {
                    1
                } else {
                    3
                }
            }
            PointcutKind::Bind | PointcutKind::Conjunction | PointcutKind::Disjunction => 3,
            PointcutKind::UserExtensible(_) => 4,
        }
    }
}

fn normalize_argument(arg: Argument) -> Argument {
    let (name, value) = arg.into_parts();
    let value = match value {
        ArgumentValue::Pointcut(p) => ArgumentValue::Pointcut(Box::new(p.normalize())),
        literal => literal,
    };
    reassemble(name, value)
}

fn reassemble(name: Option<String>, value: ArgumentValue) -> Argument {
    match name {
        Some(name) => Argument::named(name, value),
        None => Argument::unnamed(value),
    }
}

fn combinator_name(kind: &PointcutKind) -> &'static str {
    match kind {
        PointcutKind::Conjunction => "and",
        _ => "or",
    }
}

/// Cardinality policy shared by the finder leaves: zero is a no-match, one
/// wraps the entity, several wrap the collection.
fn wrap_found(mut found: Vec<Entity>) -> Option<BindingSet> {
    match found.len() {
        0 => None,
        1 => found.pop().map(|e| BindingSet::of(BoundValue::One(e))),
        _ => Some(BindingSet::of(BoundValue::Many(found))),
    }
}

/// Which entity kind a finder draws its candidates from.
#[derive(Debug, Clone, Copy)]
enum CandidateKind {
    Types,
    Fields,
    Methods,
    Annotations,
}

impl CandidateKind {
    /// Candidates come from the inherited binding when an enclosing finder
    /// supplied one, otherwise from the context's current type.
    fn derive(self, ctx: &MatchContext, inherited: Option<&BoundValue>) -> Vec<Entity> {
        match inherited {
            None => self.from_type(ctx.current_type()),
            Some(pool) => self.from_pool(pool),
        }
    }

    fn from_type(self, ty: &Arc<TypeDeclaration>) -> Vec<Entity> {
        match self {
            CandidateKind::Types => vec![Entity::Type(ty.clone())],
            CandidateKind::Fields => ty.fields.iter().cloned().map(Entity::Field).collect(),
            CandidateKind::Methods => ty.methods.iter().cloned().map(Entity::Method).collect(),
            CandidateKind::Annotations => ty
                .annotations
                .iter()
                .cloned()
                .map(Entity::Annotation)
                .collect(),
        }
    }

    fn from_pool(self, pool: &BoundValue) -> Vec<Entity> {
        // a single inherited type expands to its members, mirroring the
        // no-inheritance case
        if let [Entity::Type(ty)] = pool.entities() {
            if !matches!(self, CandidateKind::Types) {
                return self.from_type(ty);
            }
        }
        match self {
            CandidateKind::Types => pool
                .entities()
                .iter()
                .filter(|e| matches!(e, Entity::Type(_)))
                .cloned()
                .collect(),
            CandidateKind::Fields => pool
                .entities()
                .iter()
                .filter(|e| matches!(e, Entity::Field(_)))
                .cloned()
                .collect(),
            CandidateKind::Methods => pool
                .entities()
                .iter()
                .filter(|e| matches!(e, Entity::Method(_)))
                .cloned()
                .collect(),
            CandidateKind::Annotations => pool
                .entities()
                .iter()
                .flat_map(|e| match e {
                    Entity::Annotation(_) => vec![e.clone()],
                    other => other
                        .annotations()
                        .iter()
                        .cloned()
                        .map(Entity::Annotation)
                        .collect(),
                })
                .collect(),
        }
    }
}

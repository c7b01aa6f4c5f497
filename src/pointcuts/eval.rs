//! Evaluation driver helpers.
//!
//! The host drives matching itself; these helpers cover the common shape of
//! that loop: prune with `fast_match`, then evaluate one normalized tree
//! against many subjects. The parallel variant relies on the tree being
//! immutable and each context caller-owned, so no locking is involved.
//! Output order always equals input order.

use rayon::prelude::*;

use crate::pointcuts::binding::BindingSet;
use crate::pointcuts::context::MatchContext;
use crate::pointcuts::pointcut::Pointcut;

/// Evaluate one pointcut against each context in order.
pub fn match_all(pointcut: &Pointcut, contexts: &[MatchContext]) -> Vec<Option<BindingSet>> {
    contexts.iter().map(|ctx| match_one(pointcut, ctx)).collect()
}

/// Parallel [`match_all`]; results are in input order and identical to the
/// sequential run.
pub fn match_all_parallel(
    pointcut: &Pointcut,
    contexts: &[MatchContext],
) -> Vec<Option<BindingSet>> {
    contexts
        .par_iter()
        .map(|ctx| match_one(pointcut, ctx))
        .collect()
}

fn match_one(pointcut: &Pointcut, ctx: &MatchContext) -> Option<BindingSet> {
    if !pointcut.fast_match(ctx) {
        return None;
    }
    pointcut.matches(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldDeclaration, TypeDeclaration};
    use crate::pointcuts::factory::PointcutFactory;
    use std::sync::Arc;

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let factory = PointcutFactory::new("eval.dsld");
        let mut builder = factory.create_pointcut("findField").unwrap();
        builder.add_argument("x").unwrap();
        let pointcut = builder.build().unwrap().normalize();

        let contexts: Vec<MatchContext> = (0..100)
            .map(|i| {
                let ty = if i % 2 == 0 {
                    TypeDeclaration::new(format!("Even{i}"))
                        .with_field(FieldDeclaration::new("x", "String"))
                } else {
                    TypeDeclaration::new(format!("Odd{i}"))
                };
                MatchContext::new(Arc::new(ty), format!("scripts/file{i}.groovy"))
            })
            .collect();

        let sequential = match_all(&pointcut, &contexts);
        let parallel = match_all_parallel(&pointcut, &contexts);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.iter().filter(|r| r.is_some()).count(), 50);
    }
}

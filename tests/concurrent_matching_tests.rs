//! One normalized tree, many threads, caller-owned contexts: results must be
//! identical to a sequential run.

use dsld::{
    match_all, match_all_parallel, BindingSet, FieldDeclaration, MatchContext, MethodDeclaration,
    Pointcut, PointcutFactory, TypeDeclaration,
};
use std::sync::Arc;
use std::thread;

fn pointcut_under_test() -> Pointcut {
    let factory = PointcutFactory::new("concurrent.dsld");

    let mut field = factory.create_pointcut("findField").unwrap();
    field.add_argument("state").unwrap();

    let mut method = factory.create_pointcut("findMethod").unwrap();
    method.add_argument("execute").unwrap();

    let mut or = factory.create_pointcut("or").unwrap();
    or.add_argument(field.build().unwrap()).unwrap();
    or.add_argument(method.build().unwrap()).unwrap();

    let mut ext = factory.create_pointcut("fileExtension").unwrap();
    ext.add_argument("groovy").unwrap();

    let mut and = factory.create_pointcut("and").unwrap();
    and.add_argument(ext.build().unwrap()).unwrap();
    and.add_argument(or.build().unwrap()).unwrap();

    and.build().unwrap().normalize()
}

fn contexts(count: usize) -> Vec<MatchContext> {
    (0..count)
        .map(|i| {
            let mut ty = TypeDeclaration::new(format!("Subject{i}"));
            if i % 3 == 0 {
                ty = ty.with_field(FieldDeclaration::new("state", "String"));
            }
            if i % 5 == 0 {
                ty = ty.with_method(MethodDeclaration::new("execute", "void"));
            }
            let ext = if i % 2 == 0 { "groovy" } else { "java" };
            MatchContext::new(Arc::new(ty), format!("src/subject{i}.{ext}"))
        })
        .collect()
}

#[test]
fn threaded_matching_agrees_with_sequential() {
    let pointcut = pointcut_under_test();
    let all = contexts(100);
    let sequential = match_all(&pointcut, &all);

    let threaded: Vec<Option<BindingSet>> = thread::scope(|scope| {
        let handles: Vec<_> = all
            .chunks(25)
            .map(|chunk| {
                let pointcut = &pointcut;
                scope.spawn(move || match_all(pointcut, chunk))
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(sequential, threaded);
}

#[test]
fn rayon_matching_agrees_with_sequential() {
    let pointcut = pointcut_under_test();
    let all = contexts(100);
    assert_eq!(match_all(&pointcut, &all), match_all_parallel(&pointcut, &all));
}

#[test]
fn tree_is_unchanged_after_concurrent_evaluation() {
    let pointcut = pointcut_under_test();
    let snapshot = pointcut.clone();
    let all = contexts(100);

    thread::scope(|scope| {
        for chunk in all.chunks(10) {
            let pointcut = &pointcut;
            scope.spawn(move || {
                for ctx in chunk {
                    let _ = pointcut.fast_match(ctx);
                    let _ = pointcut.matches(ctx);
                }
            });
        }
    });

    assert_eq!(pointcut, snapshot);
}

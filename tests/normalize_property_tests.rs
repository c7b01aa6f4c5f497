//! Property tests over randomly generated pointcut trees: normalization
//! preserves whether a context matches, is idempotent, and fast-match never
//! produces a false negative.

use dsld::{MatchContext, Pointcut, PointcutFactory};
use dsld::{FieldDeclaration, MethodDeclaration, TypeDeclaration};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Node {
    And(Vec<Node>),
    Or(Vec<Node>),
    FindField(String),
    FindMethod(String),
    CurrentType(String),
    FileExtension(String),
}

fn leaf() -> impl Strategy<Value = Node> {
    let member = proptest::sample::select(vec!["x", "y", "missing"]);
    let type_name = proptest::sample::select(vec!["Widget", "Gadget"]);
    let extension = proptest::sample::select(vec!["groovy", "gradle"]);
    prop_oneof![
        member.clone().prop_map(|n| Node::FindField(n.to_string())),
        member.prop_map(|n| Node::FindMethod(n.to_string())),
        type_name.prop_map(|n| Node::CurrentType(n.to_string())),
        extension.prop_map(|e| Node::FileExtension(e.to_string())),
    ]
}

fn tree() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Node::And),
            prop::collection::vec(inner, 1..4).prop_map(Node::Or),
        ]
    })
}

fn build(node: &Node, factory: &PointcutFactory) -> Pointcut {
    match node {
        Node::And(children) | Node::Or(children) => {
            let rule = if matches!(node, Node::And(_)) { "and" } else { "or" };
            let mut builder = factory.create_pointcut(rule).unwrap();
            for child in children {
                builder.add_argument(build(child, factory)).unwrap();
            }
            builder.build().unwrap()
        }
        Node::FindField(name) => build_leaf(factory, "findField", name),
        Node::FindMethod(name) => build_leaf(factory, "findMethod", name),
        Node::CurrentType(name) => build_leaf(factory, "currentType", name),
        Node::FileExtension(ext) => build_leaf(factory, "fileExtension", ext),
    }
}

fn build_leaf(factory: &PointcutFactory, rule: &str, arg: &str) -> Pointcut {
    let mut builder = factory.create_pointcut(rule).unwrap();
    builder.add_argument(arg).unwrap();
    builder.build().unwrap()
}

fn context(type_name: &str, extension: &str) -> MatchContext {
    let ty = TypeDeclaration::new(type_name)
        .with_field(FieldDeclaration::new("x", "String"))
        .with_field(FieldDeclaration::new("y", "Integer"))
        .with_method(MethodDeclaration::new("x", "void"));
    MatchContext::new(Arc::new(ty), format!("scripts/subject.{extension}"))
}

fn any_context() -> impl Strategy<Value = MatchContext> {
    (
        proptest::sample::select(vec!["Widget", "Other"]),
        proptest::sample::select(vec!["groovy", "gradle"]),
    )
        .prop_map(|(name, ext)| context(name, ext))
}

proptest! {
    #[test]
    fn normalization_preserves_whether_a_context_matches(node in tree(), ctx in any_context()) {
        let factory = PointcutFactory::new("prop.dsld");
        let raw = build(&node, &factory);
        let normalized = build(&node, &factory).normalize();
        prop_assert_eq!(raw.matches(&ctx).is_some(), normalized.matches(&ctx).is_some());
    }

    #[test]
    fn normalization_is_idempotent(node in tree()) {
        let factory = PointcutFactory::new("prop.dsld");
        let once = build(&node, &factory).normalize();
        let twice = once.clone().normalize();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn fast_match_has_no_false_negatives(node in tree(), ctx in any_context()) {
        let factory = PointcutFactory::new("prop.dsld");
        let pointcut = build(&node, &factory).normalize();
        if !pointcut.fast_match(&ctx) {
            prop_assert!(pointcut.matches(&ctx).is_none());
        }
    }
}

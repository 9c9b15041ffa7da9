//! What assignment calls store, and when they are refused.

use std::convert::Infallible;

use facet_builder::{
    Args, ArityError, AttrValue, Attrs, BuildError, BuilderDefinition, Constructor, Mode,
    Signature, Value, create_builder_with,
};
use facet_testhelpers::test;

fn echo(mode: Mode) -> BuilderDefinition<Attrs> {
    let sig = Signature::new().key("a").key("b").key("c");
    let ctor = Constructor::new("echo", sig, |attrs: Attrs| Ok::<_, Infallible>(attrs));
    create_builder_with(ctor, mode).unwrap()
}

#[test]
fn rich_single_argument_is_stored_as_is() {
    let attrs = echo(Mode::Rich)
        .build(&Attrs::new(), |s| {
            s.set("c", 1)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(attrs["c"], AttrValue::from(1));
}

#[test]
fn rich_several_arguments_become_a_list() {
    let attrs = echo(Mode::Rich)
        .build(&Attrs::new(), |s| {
            s.set_many("c", [1, 2, 3])?;
            Ok(())
        })
        .unwrap();
    assert_eq!(
        attrs["c"],
        AttrValue::List(vec![1.into(), 2.into(), 3.into()])
    );
}

#[test]
fn rich_keyword_arguments_become_a_map() {
    let attrs = echo(Mode::Rich)
        .build(&Attrs::new(), |s| {
            s.set_kwargs("c", [("x", 1), ("y", 2)])?;
            Ok(())
        })
        .unwrap();
    let map = attrs["c"].as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["x"], AttrValue::from(1));
    assert_eq!(map["y"], AttrValue::from(2));
}

#[test]
fn rich_block_is_stored_uncalled() {
    let attrs = echo(Mode::Rich)
        .build(&Attrs::new(), |s| {
            s.set_block("c", || panic!("blocks are not called on assignment"))?;
            Ok(())
        })
        .unwrap();
    assert!(attrs["c"].as_block().is_some());
}

#[test]
fn rich_refuses_empty_and_mixed_calls() {
    let builder = echo(Mode::Rich);

    let err = builder
        .build(&Attrs::new(), |s| {
            s.assign("c", Args::new())?;
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err.arity(), Some(ArityError::ExpectedAtLeastOne));
    insta::assert_snapshot!(err.to_string(), @"c: expected at least one argument or block");

    let err = builder
        .build(&Attrs::new(), |s| {
            s.assign("c", Args::value(1).kwarg("x", 2))?;
            Ok(())
        })
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"c: cannot provide both keyword and positional arguments"
    );
}

#[test]
fn strict_takes_exactly_one_value_or_block() {
    let builder = echo(Mode::Strict);
    let attrs = builder
        .build(&Attrs::new(), |s| {
            s.set("a", 7)?.set_block("b", || Value::from(5))?;
            Ok(())
        })
        .unwrap();
    assert_eq!(attrs["a"], AttrValue::from(7));
    assert_eq!(attrs["b"].as_block().unwrap().call(), Value::from(5));
}

#[test]
fn strict_refuses_everything_else() {
    let builder = echo(Mode::Strict);
    let attempt = |args: Args| {
        builder
            .build(&Attrs::new(), |s| {
                s.assign("a", args)?;
                Ok(())
            })
            .unwrap_err()
    };

    insta::assert_snapshot!(attempt(Args::new()).to_string(), @"a: expected 1 or block");
    insta::assert_snapshot!(
        attempt(Args::new().args([1, 2])).to_string(),
        @"a: expected 1 or block, got 2 arguments"
    );
    insta::assert_snapshot!(
        attempt(Args::value(1).block(|| Value::NULL)).to_string(),
        @"a: cannot provide both immediate and block value"
    );
}

#[test]
fn every_key_is_assigned_at_most_once() {
    let builder = echo(Mode::Rich);
    let err = builder
        .build(&Attrs::new(), |s| {
            s.set("a", 1)?.set("b", 2)?.set("a", 3)?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateAssignment { ref key } if key == "a"));
    insta::assert_snapshot!(err.to_string(), @"a already provided");
}

#[test]
fn initial_attributes_count_as_assigned() {
    let builder = echo(Mode::Strict);
    let mut initial = Attrs::new();
    initial.insert("b".into(), 2.into());

    let err = builder
        .build(&initial, |s| {
            assert!(s.is_assigned("b"));
            s.set("b", 3)?;
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err.key(), Some("b"));
    assert!(matches!(err, BuildError::DuplicateAssignment { .. }));
}

#[test]
fn failed_assignment_stores_nothing_but_is_remembered() {
    let builder = echo(Mode::Strict);
    let mut instance = builder.instance(&Attrs::new());
    assert!(instance.assign("a", Args::new()).is_err());
    assert!(!instance.is_assigned("a"));
    instance.set("a", 1).unwrap();
    assert_eq!(instance.get("a"), Some(&AttrValue::from(1)));

    assert_eq!(
        instance.failure().and_then(BuildError::arity),
        Some(ArityError::ExpectedValueOrBlock)
    );
    let err = instance.finish().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"a: expected 1 or block");
}

#[test]
fn only_the_first_failure_is_kept() {
    let builder = echo(Mode::Rich);
    let err = builder
        .build(&Attrs::new(), |s| {
            let _ = s.set("q", 1);
            let _ = s.assign("a", Args::new());
            s.set("b", 2)?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownKey { ref key, .. } if key == "q"));
}

#[test]
fn unknown_keys_are_refused() {
    let builder = echo(Mode::Rich);
    let err = builder
        .build(&Attrs::new(), |s| {
            s.set("q", 5)?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownKey { ref key, .. } if key == "q"));
    assert!(err.to_string().starts_with("no such operation `q` on builder for IndexMap<"));
}

#[test]
fn unknown_key_wins_over_arity() {
    let builder = echo(Mode::Strict);
    let err = builder
        .build(&Attrs::new(), |s| {
            s.assign("q", Args::new())?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownKey { .. }));
}

#[test]
fn instance_introspection() {
    let builder = echo(Mode::Rich);
    let mut initial = Attrs::new();
    initial.insert("a".into(), 1.into());

    let mut instance = builder.instance(&initial);
    assert!(instance.responds_to("b"));
    assert!(!instance.responds_to("q"));
    assert_eq!(instance.keys().collect::<Vec<_>>(), ["a", "b", "c"]);

    instance.set("c", "x").unwrap();
    assert_eq!(
        instance.attrs().keys().collect::<Vec<_>>(),
        ["a", "c"]
    );
    assert!(!instance.is_assigned("b"));

    let attrs = instance.finish().unwrap();
    assert_eq!(attrs.len(), 2);
    // the caller's copy is untouched
    assert_eq!(initial.len(), 1);
}

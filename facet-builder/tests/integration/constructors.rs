//! Hand-written constructors and the errors they raise.

use std::fmt;

use facet_builder::{
    AttrValue, Attrs, BuildError, Constructor, Mode, Signature, Value, create_builder_with,
};
use facet_testhelpers::test;

#[derive(Debug, PartialEq)]
struct Range {
    start: i64,
    end: i64,
}

#[derive(Debug)]
struct Backwards;

impl fmt::Display for Backwards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range ends before it starts")
    }
}

impl std::error::Error for Backwards {}

fn int(attrs: &Attrs, key: &str) -> i64 {
    match attrs.get(key) {
        Some(AttrValue::Value(v)) => v.as_number().and_then(|n| n.to_i64()).unwrap_or(0),
        Some(AttrValue::Block(b)) => b.call().as_number().and_then(|n| n.to_i64()).unwrap_or(0),
        _ => 0,
    }
}

fn range_ctor() -> Constructor<Range> {
    Constructor::new(
        "checked",
        Signature::new().key_req("start").key_req("end"),
        |attrs: Attrs| {
            let (start, end) = (int(&attrs, "start"), int(&attrs, "end"));
            if end < start {
                return Err(Backwards);
            }
            Ok(Range { start, end })
        },
    )
}

#[test]
fn named_constructor_is_selected() {
    let builder = create_builder_with(range_ctor(), Mode::Strict).unwrap();
    assert_eq!(builder.constructor_name(), "checked");
    assert_eq!(builder.target(), "Range");
    assert_eq!(builder.keys().collect::<Vec<_>>(), ["start", "end"]);

    let range = builder
        .build(&Attrs::new(), |r| {
            r.set("start", 1)?.set_block("end", || Value::from(4))?;
            Ok(())
        })
        .unwrap();
    assert_eq!(range, Range { start: 1, end: 4 });
}

#[test]
fn constructor_errors_come_back_unchanged() {
    let builder = create_builder_with(range_ctor(), Mode::Strict).unwrap();
    let err = builder
        .build(&Attrs::new(), |r| {
            r.set("start", 4)?.set("end", 1)?;
            Ok(())
        })
        .unwrap_err();
    let BuildError::Construct(inner) = err else {
        panic!("expected a construct error");
    };
    assert!(inner.downcast_ref::<Backwards>().is_some());
    insta::assert_snapshot!(inner.to_string(), @"range ends before it starts");
}

#[test]
fn blocks_reach_closures_uncalled() {
    let sig = Signature::new().key("body");
    let ctor = Constructor::new("raw", sig, |attrs: Attrs| {
        Ok::<_, std::convert::Infallible>(attrs.get("body").and_then(AttrValue::as_block).cloned())
    });
    let builder = create_builder_with(ctor, Mode::Strict).unwrap();
    let block = builder
        .build(&Attrs::new(), |r| {
            r.set_block("body", || Value::from("hello"))?;
            Ok(())
        })
        .unwrap()
        .unwrap();
    assert_eq!(block.call(), Value::from("hello"));
}

#[test]
fn definitions_can_be_cloned_and_debugged() {
    let builder = create_builder_with(range_ctor(), Mode::Rich).unwrap();
    let copy = builder.clone();
    assert_eq!(copy.keys().collect::<Vec<_>>(), builder.keys().collect::<Vec<_>>());
    let dbg = format!("{builder:?}");
    assert!(dbg.contains("checked"));
    assert!(dbg.contains("Rich"));
}

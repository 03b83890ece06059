use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use insta::assert_snapshot;
use lockstep_core::{AnyValue, reflect};
use lockstep_pretty::{PrettyPrinter, format_full, format_short};
use lockstep_testhelpers::test;

struct Point {
    x: i64,
    y: i64,
}
lockstep_core::reflect!(Point { x, y });

struct Holder {
    items: Vec<i64>,
    label: String,
}
lockstep_core::reflect!(Holder { items, label });

struct Meters(f64);
lockstep_core::reflect!(Meters(0));

struct Marker;
lockstep_core::reflect!(Marker);

#[allow(dead_code)]
enum Shape {
    Circle { r: f64 },
    Square(f64),
    Empty,
}
lockstep_core::reflect!(enum Shape {
    Circle { r: f64 },
    Square(side: f64),
    Empty,
});

struct Node {
    name: &'static str,
    next: Option<Rc<RefCell<Node>>>,
}
lockstep_core::reflect!(Node { name, next });

#[test]
fn scalars_show_type_only_when_wanted() {
    assert_eq!(format_short(&reflect(&1i64), false), "1");
    assert_eq!(format_short(&reflect(&1i64), true), "i64(1)");
    assert_eq!(format_short(&reflect(&0.1f32), true), "f32(0.1)");
    assert_eq!(format_short(&reflect(&f64::NAN), false), "NaN");
    assert_eq!(format_short(&reflect(&true), true), "true");
    assert_eq!(format_short(&reflect(&'x'), true), "'x'");
}

#[test]
fn strings_are_quoted_and_escaped() {
    let v = reflect(&String::from("a\nb\u{1b}"));
    assert_eq!(format_short(&v, true), r#""a\nb\u{1b}""#);
}

#[test]
fn records() {
    let p = reflect(&Point { x: 1, y: 2 });
    assert_eq!(format_short(&p, true), "Point { x: 1, y: 2 }");
    assert_eq!(format_short(&p, false), "{ x: 1, y: 2 }");
    assert_eq!(format_short(&reflect(&Meters(1.5)), true), "Meters(1.5)");
    assert_eq!(format_short(&reflect(&Marker), false), "Marker");
    assert_eq!(format_short(&reflect(&(1u8, "a")), true), r#"(1, "a")"#);
    assert_eq!(format_short(&reflect(&(1u8,)), true), "(1,)");
    assert_eq!(format_short(&reflect(&()), true), "()");
}

#[test]
fn enums() {
    let circle = reflect(&Shape::Circle { r: 1.0 });
    assert_eq!(format_short(&circle, true), "Shape::Circle { r: 1.0 }");
    assert_eq!(format_short(&circle, false), "Circle { r: 1.0 }");
    assert_eq!(format_short(&reflect(&Shape::Square(2.0)), true), "Shape::Square(2.0)");
    assert_eq!(format_short(&reflect(&Shape::Empty), false), "Empty");
}

#[test]
fn nested_containers_collapse_in_short_mode() {
    let h = reflect(&Holder {
        items: vec![1, 2],
        label: "h".into(),
    });
    assert_eq!(format_short(&h, true), r#"Holder { items: [...], label: "h" }"#);

    let empty = reflect(&Holder {
        items: vec![],
        label: String::new(),
    });
    assert_eq!(format_short(&empty, false), r#"{ items: [], label: "" }"#);

    let points = reflect(&vec![Point { x: 1, y: 2 }]);
    assert_eq!(format_short(&points, false), "[{...}]");
}

#[test]
fn long_containers_are_truncated() {
    let v = reflect(&(0..25).collect::<Vec<u32>>());
    let out = format_short(&v, false);
    assert_eq!(out.matches("...").count(), 1);
    assert!(out.ends_with("19, ...]"));

    let all = PrettyPrinter::short()
        .with_max_items(None)
        .format(&v, false);
    assert!(all.ends_with("23, 24]"));
}

#[test]
fn maps_and_sets_are_sorted() {
    let m: HashMap<i32, &str> = [(2, "b"), (1, "a"), (3, "c")].into();
    assert_eq!(format_short(&reflect(&m), false), r#"{1: "a", 2: "b", 3: "c"}"#);

    let s: BTreeSet<u8> = [3, 1].into();
    assert_eq!(format_short(&reflect(&s), true), "BTreeSet<u8> {1, 3}");

    let empty: BTreeMap<u8, u8> = BTreeMap::new();
    assert_eq!(format_short(&reflect(&empty), false), "{}");
}

#[test]
fn byte_lists() {
    assert_eq!(format_short(&reflect(&b"abc".to_vec()), false), r#"b"abc""#);
    assert_eq!(
        format_short(&reflect(&vec![0xffu8, 0, b'a']), true),
        r#"Vec<u8> b"\xff\x00a""#
    );
}

#[test]
fn options_and_pointers() {
    assert_eq!(format_short(&reflect(&Some(1i64)), false), "Some(1)");
    assert_eq!(format_short(&reflect(&None::<i64>), true), "Option<i64>::None");
    assert_eq!(format_short(&reflect(&Box::new(1i64)), false), "&1");
    assert_eq!(format_short(&reflect(&Box::new(1i64)), true), "&i64(1)");
    assert_eq!(
        format_short(&reflect(&Box::new(Point { x: 0, y: 0 })), false),
        "{ x: 0, y: 0 }"
    );
    assert_eq!(
        format_short(&reflect(&Box::new(Point { x: 0, y: 0 })), true),
        "&Point { x: 0, y: 0 }"
    );
}

#[test]
fn chained_pointers_show_their_types() {
    let v = reflect(&Box::new(Box::new(0i64)));
    assert_eq!(format_short(&v, false), "&&i64(0)");
}

#[test]
fn dynamic_values_show_their_types() {
    let v: Vec<AnyValue> = vec![Box::new(1i64), Box::new("x"), Box::new(Some(2u8))];
    assert_eq!(format_short(&reflect(&v), false), r#"[i64(1), "x", Some(u8(2))]"#);
}

#[test]
fn functions_and_raw_pointers() {
    fn double(x: i64) -> i64 {
        x * 2
    }
    let f: fn(i64) -> i64 = double;
    assert_eq!(format_short(&reflect(&f), true), "fn(i64) -> i64 {...}");

    let p: *const u8 = core::ptr::null();
    assert_eq!(format_short(&reflect(&p), true), "*const u8(0x0)");
}

#[test]
fn cycles_print_in_finite_space() {
    let a = Rc::new(RefCell::new(Node {
        name: "a",
        next: None,
    }));
    a.borrow_mut().next = Some(a.clone());
    let v = reflect(&a);
    a.borrow_mut().next = None;

    assert_eq!(format_short(&v, false), r#"{ name: "a", next: Some(...) }"#);
    assert_snapshot!(format_full(&v), @r#"
    &Node {
        name: "a",
        next: Some(...),
    }
    "#);
}

#[test]
fn full_mode_aligns_keys() {
    let h = reflect(&Holder {
        items: vec![1, 2],
        label: "h".into(),
    });
    assert_snapshot!(format_full(&h), @r#"
    Holder {
        items: [
            1,
            2,
        ],
        label: "h",
    }
    "#);

    let m: BTreeMap<&str, u8> = [("a", 1), ("long", 2)].into();
    assert_snapshot!(format_full(&reflect(&m)), @r#"
    BTreeMap<&str, u8> {
        "a":    1,
        "long": 2,
    }
    "#);
}

#[test]
fn full_mode_keeps_single_items_inline() {
    assert_eq!(format_full(&reflect(&vec![Some(1u8)])), "Vec<Option<u8>> [Some(1)]");
    assert_eq!(format_full(&reflect(&Meters(2.0))), "Meters(2.0)");
}

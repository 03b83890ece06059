//! End-to-end comparisons through the public entry points.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use indoc::indoc;
use insta::assert_snapshot;
use lockstep_core::AnyValue;
use lockstep_diff::{Options, differences, each};
use lockstep_testhelpers::test;

struct Point {
    x: i64,
    y: i64,
}
lockstep_core::reflect!(Point { x, y });

struct Node {
    name: &'static str,
    next: Option<Rc<RefCell<Node>>>,
}
lockstep_core::reflect!(Node { name, next });

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

struct Doc {
    title: String,
    tags: Vec<String>,
}
lockstep_core::reflect!(Doc { title, tags });

fn diff<T: lockstep_core::Reflect>(a: &T, b: &T) -> Vec<String> {
    differences(a, b, &Options::new())
}

fn node(name: &'static str) -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node { name, next: None }))
}

fn ring(name: &'static str) -> Rc<RefCell<Node>> {
    let n = node(name);
    n.borrow_mut().next = Some(n.clone());
    n
}

fn unlink(nodes: &[&Rc<RefCell<Node>>]) {
    for n in nodes {
        n.borrow_mut().next = None;
    }
}

#[test]
fn replaced_element_is_reported_at_its_index() {
    assert_eq!(diff(&vec![1, 2, 3], &vec![1, 9, 3]), ["Vec<i32>[1]: 2 != 9\n"]);
}

#[test]
fn map_keys_are_walked_in_order() {
    let a: HashMap<i32, i32> = [(0, 0), (1, 0), (2, 0), (3, -1)].into();
    let b: HashMap<i32, i32> = [(2, 2), (3, -1), (4, 4), (5, 5)].into();
    assert_eq!(
        diff(&a, &b),
        [
            "HashMap<i32, i32>[0]: (removed)\n",
            "HashMap<i32, i32>[1]: (removed)\n",
            "HashMap<i32, i32>[2]: 0 != 2\n",
            "HashMap<i32, i32>[4]: (added) 4\n",
            "HashMap<i32, i32>[5]: (added) 5\n",
        ]
    );
}

#[test]
fn map_output_is_stable() {
    let a: HashMap<String, u8> = (0..20).map(|i| (format!("k{i}"), i)).collect();
    let b: HashMap<String, u8> = (5..25).map(|i| (format!("k{i}"), i + 1)).collect();
    let first = diff(&a, &b);
    assert_eq!(first.len(), 25);
    assert_eq!(first, diff(&a, &b));
}

#[test]
fn set_members() {
    let a: BTreeSet<u8> = [1, 2].into();
    let b: BTreeSet<u8> = [2, 3].into();
    assert_eq!(
        diff(&a, &b),
        ["BTreeSet<u8>[1]: (removed)\n", "BTreeSet<u8>[3]: (added)\n"]
    );
}

#[test]
fn isomorphic_cycles_are_equal() {
    let (a, b) = (ring("a"), ring("a"));
    assert!(diff(&a, &b).is_empty());
    unlink(&[&a, &b]);
}

#[test]
fn cycles_report_only_the_differing_field() {
    let (a, b) = (ring("a"), ring("b"));
    assert_eq!(diff(&a, &b), ["Node.name: \"a\" != \"b\"\n"]);
    unlink(&[&a, &b]);
}

#[test]
fn uneven_cycles_are_reported_once() {
    let a = ring("x");
    let (b1, b2) = (node("x"), node("x"));
    b2.borrow_mut().next = Some(b1.clone());
    b1.borrow_mut().next = Some(b2.clone());
    assert_eq!(diff(&a, &b1), ["Node.next: uneven cycle\n"]);
    unlink(&[&a, &b1, &b2]);
}

#[test]
fn short_strings_are_shown_whole() {
    assert_eq!(
        diff(&String::from("hello"), &String::from("help")),
        ["\"hello\" != \"help\"\n"]
    );
}

#[test]
fn multi_line_strings_get_a_unified_diff() {
    let a = String::from("a\nb\nc\nd\ne\nf\ng\nh");
    let b = String::from("a\nb\nc\nd\nE\nf\ng\nh");
    let expected = indoc! {"
        --- a
        +++ b
        @@ -2,7 +2,7 @@
         b
         c
         d
        -e
        +E
         f
         g
         h
    "};
    assert_eq!(diff(&a, &b), [expected]);
}

#[test]
fn prose_is_diffed_by_word() {
    let a = String::from("one two three four five six");
    let b = String::from("one two THREE four five six");
    assert_eq!(diff(&a, &b), ["String[8:14]: \"three \" != \"THREE \"\n"]);
}

#[test]
fn tokens_are_diffed_by_char() {
    let a = String::from("abcdefghijklmnopqrstuvwxyz");
    let b = String::from("abcdefghijKlmnopqrstuvwxyz");
    assert_eq!(diff(&a, &b), ["String[10:11]: \"k\" != \"K\"\n"]);
}

#[test]
fn trailing_element_is_one_edit() {
    assert_eq!(diff(&vec![1, 2, 3], &vec![1, 2]), ["Vec<i32>[2:3]: [3] != []\n"]);
    assert_eq!(diff(&vec![1, 2], &vec![0, 1, 2]), ["Vec<i32>[0:0]: [] != [0]\n"]);
}

#[test]
fn records_extend_the_path() {
    let a = Doc {
        title: "draft".into(),
        tags: vec!["a".into(), "b".into()],
    };
    let b = Doc {
        title: "final".into(),
        tags: vec!["a".into(), "c".into()],
    };
    assert_eq!(
        diff(&a, &b),
        [
            "Doc.title: \"draft\" != \"final\"\n",
            "Doc.tags[1]: \"b\" != \"c\"\n",
        ]
    );
}

#[test]
fn enums_compare_variant_then_payload() {
    assert_eq!(
        diff(&Shape::Circle { r: 1.0 }, &Shape::Circle { r: 2.0 }),
        ["Shape::Circle.r: 1.0 != 2.0\n"]
    );
    assert_eq!(
        diff(&Shape::Square(1.0), &Shape::Square(3.0)),
        ["Shape::Square.0: 1.0 != 3.0\n"]
    );
    assert_eq!(
        diff(&Shape::Circle { r: 1.0 }, &Shape::Empty),
        ["Shape::Circle { r: 1.0 } != Shape::Empty\n"]
    );
}

#[test]
fn options_differ_in_presence() {
    assert_eq!(
        diff(&None::<i64>, &Some(1)),
        ["Option<i64>::None != Some(i64(1))\n"]
    );
    assert!(diff(&Some(Point { x: 1, y: 2 }), &Some(Point { x: 1, y: 2 })).is_empty());
}

#[test]
fn dynamic_values_show_their_types() {
    let a: Vec<AnyValue> = vec![Box::new(1i64), Box::new(2u8)];
    let b: Vec<AnyValue> = vec![Box::new(String::from("x")), Box::new(3u8)];
    assert_eq!(
        diff(&a, &b),
        [
            "Vec<Box<dyn Reflect>>[0]: i64(1) != \"x\"\n",
            "Vec<Box<dyn Reflect>>[1]: u8(2) != u8(3)\n",
        ]
    );
}

#[test]
fn byte_lists() {
    assert_eq!(
        diff(&b"hello".to_vec(), &b"help".to_vec()),
        ["\"hello\" != \"help\"\n"]
    );
    assert_eq!(
        diff(&vec![0xffu8, 1], &vec![0xfeu8, 1]),
        ["binary: b\"\\xff\\x01\" != b\"\\xfe\\x01\"\n"]
    );
}

#[test]
fn functions_differ_unless_both_are_absent() {
    fn one() -> i32 {
        1
    }
    let f: fn() -> i32 = one;
    assert_eq!(diff(&f, &f).len(), 1);
    assert!(diff(&None::<fn() -> i32>, &None).is_empty());
    assert!(differences(&f, &f, &Options::new().equal_funcs(true)).is_empty());
}

#[test]
fn raw_pointers_compare_by_address() {
    let (x, y) = (1u8, 1u8);
    let (p, q): (*const u8, *const u8) = (&x, &y);
    assert!(diff(&p, &p).is_empty());
    assert_eq!(diff(&p, &q).len(), 1);
}

#[test]
fn shared_data_is_skipped() {
    let v = vec![f64::NAN];
    assert!(diff(&v, &v).is_empty());
    assert_eq!(diff(&v, &v.clone()), ["Vec<f64>[0]: NaN != NaN\n"]);
}

#[test]
fn acyclic_values_equal_themselves() {
    let doc = Doc {
        title: "t".into(),
        tags: (0..50).map(|i| i.to_string()).collect(),
    };
    assert!(diff(&doc, &doc).is_empty());
}

#[test]
fn sink_sees_each_message_once() {
    let mut n = 0;
    each(|_| n += 1, &vec![1, 2, 3, 4], &vec![0, 2, 3, 5], &Options::new());
    assert_eq!(n, 2);
}

#[test]
fn report_reads_top_to_bottom() {
    let a = Doc {
        title: "Release notes".into(),
        tags: vec!["alpha".into(), "beta".into(), "gamma".into()],
    };
    let b = Doc {
        title: "Release notes v2".into(),
        tags: vec!["alpha".into(), "gamma".into()],
    };
    assert_snapshot!(diff(&a, &b).concat(), @r#"
    Doc.title: "Release notes" != "Release notes v2"
    Doc.tags[1:2]: ["beta"] != []
    "#);
}
